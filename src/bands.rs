//! Stratified band sampling over the frequency-rank space.
//!
//! An ability-greedy selector starves bands far from the current estimate,
//! which is exactly how a low-ability learner ends up judged on too few easy
//! probes. The band plan partitions the rank range into log-spaced bands
//! (each spanning a roughly constant multiplicative range of rarity) and the
//! coverage table tracks probes per band so the selector can force sampling
//! into under-covered bands near the current ability before the confidence
//! interval is allowed to close.
//!
//! Coverage is used only to steer sampling; the final estimate never reads it.

use crate::error::EngineError;
use crate::types::BandId;

/// Immutable partition of `1..=corpus_size` into log-spaced bands.
///
/// Shared read-only across sessions.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandPlan {
    corpus_size: u32,
    /// Inclusive upper rank edge of each band; the last edge is corpus_size.
    upper_edges: Vec<u32>,
}

impl BandPlan {
    /// Partition `1..=corpus_size` into `bands` log-spaced bands.
    pub fn new(corpus_size: u32, bands: usize) -> Result<Self, EngineError> {
        if bands == 0 {
            return Err(EngineError::Configuration("bands must be positive".into()));
        }
        if (corpus_size as usize) < bands {
            return Err(EngineError::Configuration(format!(
                "corpus of {corpus_size} ranks cannot be split into {bands} bands"
            )));
        }
        let log_corpus = f64::from(corpus_size).ln();
        let mut upper_edges = Vec::with_capacity(bands);
        let mut prev = 0u32;
        for i in 1..=bands {
            let raw = (log_corpus * i as f64 / bands as f64).exp().round() as u32;
            // Log spacing can collapse adjacent edges at small corpus sizes;
            // keep every band non-empty.
            let edge = raw.max(prev + 1).min(corpus_size);
            upper_edges.push(edge);
            prev = edge;
        }
        *upper_edges.last_mut().expect("bands > 0") = corpus_size;
        Ok(Self {
            corpus_size,
            upper_edges,
        })
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.upper_edges.len()
    }

    /// True when the plan has no bands. Construction forbids this; present
    /// for the conventional `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.upper_edges.is_empty()
    }

    /// Total number of ranks covered.
    pub fn corpus_size(&self) -> u32 {
        self.corpus_size
    }

    /// Band containing `rank`. Ranks outside `1..=corpus_size` clamp to the
    /// outermost bands.
    pub fn band_of(&self, rank: u32) -> BandId {
        self.upper_edges
            .partition_point(|&edge| edge < rank)
            .min(self.upper_edges.len() - 1)
    }

    /// Band nearest the given ability: the band containing the rank whose
    /// difficulty equals `theta`.
    pub fn band_for_theta(&self, theta: f64) -> BandId {
        let rank = theta.exp().round().clamp(1.0, f64::from(self.corpus_size));
        self.band_of(rank as u32)
    }

    /// Inclusive rank range `(low, high)` of a band.
    pub fn rank_range(&self, band: BandId) -> (u32, u32) {
        let high = self.upper_edges[band];
        let low = if band == 0 {
            1
        } else {
            self.upper_edges[band - 1] + 1
        };
        (low, high)
    }
}

/// Per-band probe bookkeeping for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandCoverage {
    /// The band this row describes.
    pub band: BandId,
    /// Probes recorded in this band so far.
    pub probes: u32,
    /// Outcome of the most recent probe in this band, if any.
    pub last_outcome: Option<bool>,
}

/// Coverage table owned by a session; one row per band.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageTable {
    rows: Vec<BandCoverage>,
}

impl CoverageTable {
    /// Empty table for `bands` bands.
    pub fn new(bands: usize) -> Self {
        Self {
            rows: (0..bands)
                .map(|band| BandCoverage {
                    band,
                    probes: 0,
                    last_outcome: None,
                })
                .collect(),
        }
    }

    /// Record one probe outcome in a band.
    pub fn record(&mut self, band: BandId, correct: bool) {
        let row = &mut self.rows[band];
        row.probes += 1;
        row.last_outcome = Some(correct);
    }

    /// Probes recorded in a band.
    pub fn probes_in(&self, band: BandId) -> u32 {
        self.rows[band].probes
    }

    /// All rows, in band order.
    pub fn rows(&self) -> &[BandCoverage] {
        &self.rows
    }

    /// The band the selector must probe next to satisfy forced coverage, if
    /// any.
    ///
    /// Considers bands within `radius` of `center` (the band nearest the
    /// current theta). Among those still below `min_probes`, returns the
    /// least-probed; ties break toward the band closest to `center`, then
    /// the lower id, so the choice is deterministic. Returns `None` once
    /// local coverage is satisfied and maximum-information selection may
    /// proceed unconstrained.
    pub fn forced_band(
        &self,
        center: BandId,
        radius: usize,
        min_probes: u32,
    ) -> Option<BandId> {
        let lo = center.saturating_sub(radius);
        let hi = (center + radius).min(self.rows.len() - 1);
        self.rows[lo..=hi]
            .iter()
            .filter(|row| row.probes < min_probes)
            .min_by_key(|row| (row.probes, row.band.abs_diff(center), row.band))
            .map(|row| row.band)
    }
}
