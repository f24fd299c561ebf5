//! The theta to vocabulary-size mapping.
//!
//! A single, strictly increasing function converts abilities on the internal
//! theta scale into vocabulary sizes in words. Every output of an estimate
//! (point, lower bound, upper bound) passes through this one map, which makes
//! bound inversion structurally impossible: if `a <= b <= c` on the theta
//! scale, the mapped sizes are ordered the same way.
//!
//! The map is supplied once at engine initialization from corpus statistics
//! and treated as read-only afterwards.

use crate::error::EngineError;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Curve {
    /// Analytic map derived from the log-rank difficulty calibration:
    /// `size(theta) = factor * exp(theta)` on `[0, ln(corpus_size)]`.
    LogRank { factor: f64 },
    /// Piecewise-linear interpolation of empirical `(theta, cumulative
    /// words)` breakpoints fitted from corpus statistics.
    Piecewise { points: Vec<(f64, f64)> },
}

/// Immutable, strictly increasing theta to vocabulary-size map.
///
/// Shared read-only across sessions; concurrent reads need no locking.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VocabScale {
    curve: Curve,
    theta_min: f64,
    theta_max: f64,
}

impl VocabScale {
    /// Analytic scale for a corpus of `corpus_size` ranked words.
    ///
    /// Vocabulary size at ability theta is the count of words whose
    /// difficulty `ln(rank)` does not exceed theta, scaled by
    /// `productive_factor` (the empirically fitted "productive vocabulary is
    /// a subset of the known corpus" constant, typically around 0.6). The
    /// theta domain is `[0, ln(corpus_size)]`, so mapped sizes span roughly
    /// `[0, productive_factor * corpus_size]`.
    pub fn log_rank(corpus_size: u32, productive_factor: f64) -> Result<Self, EngineError> {
        if corpus_size < 2 {
            return Err(EngineError::Configuration(format!(
                "corpus_size must be at least 2, got {corpus_size}"
            )));
        }
        if !(productive_factor > 0.0 && productive_factor <= 1.0) {
            return Err(EngineError::Configuration(format!(
                "productive_factor must be in (0, 1], got {productive_factor}"
            )));
        }
        Ok(Self {
            curve: Curve::LogRank {
                factor: productive_factor,
            },
            theta_min: 0.0,
            theta_max: f64::from(corpus_size).ln(),
        })
    }

    /// Empirical scale from `(theta, cumulative word count)` breakpoints.
    ///
    /// Values between breakpoints are linearly interpolated. Rejects input
    /// that is not strictly increasing in both coordinates, which is the
    /// monotonicity check that guards the bounds invariant.
    pub fn from_cumulative(points: &[(f64, f64)]) -> Result<Self, EngineError> {
        if points.len() < 2 {
            return Err(EngineError::Configuration(
                "scale needs at least two breakpoints".into(),
            ));
        }
        for pair in points.windows(2) {
            let (t0, s0) = pair[0];
            let (t1, s1) = pair[1];
            if !(t0.is_finite() && t1.is_finite() && s0.is_finite() && s1.is_finite()) {
                return Err(EngineError::Configuration(
                    "scale breakpoints must be finite".into(),
                ));
            }
            if t1 <= t0 || s1 <= s0 {
                return Err(EngineError::Configuration(format!(
                    "scale must be strictly increasing: ({t0}, {s0}) then ({t1}, {s1})"
                )));
            }
        }
        if points[0].1 < 0.0 {
            return Err(EngineError::Configuration(
                "vocabulary sizes must be non-negative".into(),
            ));
        }
        Ok(Self {
            theta_min: points[0].0,
            theta_max: points[points.len() - 1].0,
            curve: Curve::Piecewise {
                points: points.to_vec(),
            },
        })
    }

    /// Lower end of the theta domain.
    pub fn theta_min(&self) -> f64 {
        self.theta_min
    }

    /// Upper end of the theta domain.
    pub fn theta_max(&self) -> f64 {
        self.theta_max
    }

    /// Midpoint of the theta domain, used as the cold-start prior.
    pub fn theta_mid(&self) -> f64 {
        0.5 * (self.theta_min + self.theta_max)
    }

    /// Continuous vocabulary size at `theta`, clamping theta into the domain.
    pub fn size(&self, theta: f64) -> f64 {
        let t = theta.clamp(self.theta_min, self.theta_max);
        match &self.curve {
            Curve::LogRank { factor } => factor * t.exp(),
            Curve::Piecewise { points } => {
                // Find the segment containing t; t is within the domain.
                let idx = points
                    .windows(2)
                    .position(|w| t <= w[1].0)
                    .unwrap_or(points.len() - 2);
                let (t0, s0) = points[idx];
                let (t1, s1) = points[idx + 1];
                s0 + (s1 - s0) * (t - t0) / (t1 - t0)
            }
        }
    }

    /// Vocabulary size at `theta`, rounded to whole words.
    pub fn vocabulary_size(&self, theta: f64) -> u32 {
        self.size(theta).round() as u32
    }

    /// Exact inverse of [`size`](Self::size) on the mapped range; the input
    /// is clamped into that range first.
    pub fn theta_for_size(&self, size: f64) -> f64 {
        let lo = self.size(self.theta_min);
        let hi = self.size(self.theta_max);
        let s = size.clamp(lo, hi);
        match &self.curve {
            Curve::LogRank { factor } => (s / factor).ln().clamp(self.theta_min, self.theta_max),
            Curve::Piecewise { points } => {
                let idx = points
                    .windows(2)
                    .position(|w| s <= w[1].1)
                    .unwrap_or(points.len() - 2);
                let (t0, s0) = points[idx];
                let (t1, s1) = points[idx + 1];
                t0 + (t1 - t0) * (s - s0) / (s1 - s0)
            }
        }
    }

    /// Largest mapped vocabulary size, in whole words.
    pub fn max_size(&self) -> u32 {
        self.vocabulary_size(self.theta_max)
    }
}
