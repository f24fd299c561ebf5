//! Configuration for the adaptive vocabulary estimator.

use crate::error::EngineError;

/// Configuration options for [`VocabOracle`](crate::VocabOracle) sessions.
///
/// Controls the confidence target, adaptive stopping rules, band coverage
/// policy, and model calibration constants.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    // =========================================================================
    // Confidence target
    // =========================================================================
    /// Confidence level for the reported interval. Default: 0.95.
    pub confidence_level: f64,

    /// Stop once the interval is at least this narrow (and `min_items` is
    /// reached). Default: 1000 words absolute.
    pub ci_width_threshold: CiWidthThreshold,

    // =========================================================================
    // Item budget
    // =========================================================================
    /// Minimum probes before precision-based termination may fire.
    ///
    /// Decouples stopping from a fixed question count while still preventing
    /// premature convergence on too little evidence. Default: 15.
    pub min_items: u32,

    /// Hard cap on probes per session regardless of achieved precision.
    /// Default: 40.
    pub max_items: u32,

    // =========================================================================
    // Band coverage
    // =========================================================================
    /// Number of log-spaced bands over the rank range. Default: 10.
    pub bands: usize,

    /// Minimum probes each band near the ability estimate must receive
    /// before the interval is allowed to close. Default: 2.
    pub min_probes_per_band: u32,

    /// How many bands on each side of the ability's own band count as
    /// "near" for forced coverage. Default: 1.
    pub coverage_radius: usize,

    // =========================================================================
    // Model calibration
    // =========================================================================
    /// Discrimination slope of the logistic response model.
    ///
    /// With the default of 1.0, one standard deviation of ability moves a
    /// borderline item from 50% to about 73% success. Calibrated empirically;
    /// treated as configuration, not derived. Default: 1.0.
    pub slope: f64,

    /// Cold-start prior ability. `None` uses the midpoint of the scale's
    /// theta domain. Ignored when a warm-start prior estimate is supplied at
    /// session creation. Default: None.
    pub prior_theta: Option<f64>,

    /// Standard error of the cold-start prior. `None` uses a quarter of the
    /// theta domain, wide enough to cover the full corpus at 95%.
    /// Default: None.
    pub prior_se: Option<f64>,

    // =========================================================================
    // Determinism and numerics
    // =========================================================================
    /// Seed for the selector's in-band sampling. `None` seeds from entropy;
    /// set for reproducible sessions. Default: None.
    pub seed: Option<u64>,

    /// Convergence tolerance of the MLE bisection on the theta scale.
    /// Default: 1e-6.
    pub mle_tolerance: f64,

    /// Iteration cap for the MLE bisection. Default: 200.
    pub mle_max_iterations: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            ci_width_threshold: CiWidthThreshold::Absolute(1_000.0),
            min_items: 15,
            max_items: 40,
            bands: 10,
            min_probes_per_band: 2,
            coverage_radius: 1,
            slope: 1.0,
            prior_theta: None,
            prior_se: None,
            seed: None,
            mle_tolerance: 1e-6,
            mle_max_iterations: 200,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick assessment for low-stakes placement:
    /// 8-20 items, 2500-word precision target, lighter coverage floor.
    pub fn quick() -> Self {
        Self {
            min_items: 8,
            max_items: 20,
            ci_width_threshold: CiWidthThreshold::Absolute(2_500.0),
            bands: 8,
            min_probes_per_band: 1,
            ..Default::default()
        }
    }

    /// Balanced assessment, identical to the defaults: 15-40 items,
    /// 1000-word precision target.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Thorough assessment for high-stakes use:
    /// 25-80 items, 500-word precision target, deeper coverage floor.
    pub fn thorough() -> Self {
        Self {
            min_items: 25,
            max_items: 80,
            ci_width_threshold: CiWidthThreshold::Absolute(500.0),
            min_probes_per_band: 3,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the confidence level.
    pub fn confidence_level(mut self, level: f64) -> Self {
        assert!(
            level > 0.0 && level < 1.0,
            "confidence_level must be in (0, 1)"
        );
        self.confidence_level = level;
        self
    }

    /// Set the CI width stopping threshold.
    pub fn ci_width_threshold(mut self, threshold: CiWidthThreshold) -> Self {
        self.ci_width_threshold = threshold;
        self
    }

    /// Set the minimum item count.
    pub fn min_items(mut self, n: u32) -> Self {
        assert!(n > 0, "min_items must be positive");
        self.min_items = n;
        self
    }

    /// Set the maximum item count.
    pub fn max_items(mut self, n: u32) -> Self {
        assert!(n > 0, "max_items must be positive");
        self.max_items = n;
        self
    }

    /// Set the number of coverage bands.
    pub fn bands(mut self, n: usize) -> Self {
        assert!(n > 0, "bands must be positive");
        self.bands = n;
        self
    }

    /// Set the per-band probe floor.
    pub fn min_probes_per_band(mut self, n: u32) -> Self {
        self.min_probes_per_band = n;
        self
    }

    /// Set the forced-coverage radius in bands.
    pub fn coverage_radius(mut self, radius: usize) -> Self {
        self.coverage_radius = radius;
        self
    }

    /// Set the response-model slope.
    pub fn slope(mut self, slope: f64) -> Self {
        assert!(slope.is_finite() && slope > 0.0, "slope must be positive");
        self.slope = slope;
        self
    }

    /// Set the cold-start prior ability.
    pub fn prior_theta(mut self, theta: f64) -> Self {
        self.prior_theta = Some(theta);
        self
    }

    /// Set a deterministic seed for item sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration, as done at session creation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(EngineError::Configuration(
                "confidence_level must be in (0, 1)".into(),
            ));
        }
        // The z lookup evaluates the quantile at 0.5 + level/2; a level
        // within one ulp of 1.0 rounds that to exactly 1.0.
        if 0.5 + self.confidence_level / 2.0 >= 1.0 {
            return Err(EngineError::Configuration(
                "confidence_level is too close to 1".into(),
            ));
        }
        if self.min_items == 0 {
            return Err(EngineError::Configuration(
                "min_items must be positive".into(),
            ));
        }
        if self.min_items > self.max_items {
            return Err(EngineError::Configuration(format!(
                "min_items ({}) exceeds max_items ({})",
                self.min_items, self.max_items
            )));
        }
        if self.bands == 0 {
            return Err(EngineError::Configuration("bands must be positive".into()));
        }
        if !(self.slope.is_finite() && self.slope > 0.0) {
            return Err(EngineError::Configuration("slope must be positive".into()));
        }
        self.ci_width_threshold.validate()?;
        if !(self.mle_tolerance > 0.0) {
            return Err(EngineError::Configuration(
                "mle_tolerance must be positive".into(),
            ));
        }
        if self.mle_max_iterations == 0 {
            return Err(EngineError::Configuration(
                "mle_max_iterations must be positive".into(),
            ));
        }
        if let Some(se) = self.prior_se {
            if !(se > 0.0) {
                return Err(EngineError::Configuration(
                    "prior_se must be positive".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Stopping threshold on confidence-interval width.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CiWidthThreshold {
    /// Stop once `ci_high - ci_low` is at most this many words.
    Absolute(f64),
    /// Stop once the width is at most this fraction of the point estimate.
    Relative(f64),
}

impl CiWidthThreshold {
    /// Whether a CI of `width` words around a point estimate of
    /// `vocabulary_size` words meets the threshold.
    pub fn is_met(&self, width: f64, vocabulary_size: f64) -> bool {
        match *self {
            Self::Absolute(words) => width <= words,
            Self::Relative(fraction) => width <= fraction * vocabulary_size,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        let ok = match *self {
            Self::Absolute(words) => words.is_finite() && words > 0.0,
            Self::Relative(fraction) => fraction.is_finite() && fraction > 0.0,
        };
        if ok {
            Ok(())
        } else {
            Err(EngineError::Configuration(
                "ci_width_threshold must be positive".into(),
            ))
        }
    }
}
