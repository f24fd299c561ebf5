//! Adaptive item selection.
//!
//! Classic maximum-information selection: a logistic item discriminates best
//! when its difficulty matches the learner's ability, so the preferred probe
//! is the rank whose difficulty equals the current theta estimate. Two
//! constraints temper the greedy choice:
//!
//! 1. a rank is never repeated within a session, and
//! 2. while a band near the current ability is below its probe floor,
//!    selection is forced into that band even though it is not maximally
//!    informative, guaranteeing a minimum tested spread before the interval
//!    closes.
//!
//! When the exact maximum-information rank is taken or absent, a random
//! unprobed rank from its band is drawn instead, widening outward band by
//! band before declaring the bank exhausted.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::bands::{BandPlan, CoverageTable};
use crate::bank::ItemBank;
use crate::error::EngineError;
use crate::model::ResponseModel;

/// Chooses the next rank to probe. Owns the session's sampling RNG; item
/// banks and band plans are only ever read.
#[derive(Debug, Clone)]
pub struct ItemSelector {
    plan: Arc<BandPlan>,
    min_probes_per_band: u32,
    coverage_radius: usize,
    rng: Xoshiro256PlusPlus,
}

impl ItemSelector {
    /// Create a selector over the given band plan.
    pub fn new(
        plan: Arc<BandPlan>,
        min_probes_per_band: u32,
        coverage_radius: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_os_rng(),
        };
        Self {
            plan,
            min_probes_per_band,
            coverage_radius,
            rng,
        }
    }

    /// Pick the next rank to probe.
    ///
    /// `probed` holds every rank already issued in this session and is never
    /// selected again. Returns [`EngineError::BankExhausted`] when the bank
    /// cannot supply any eligible rank, or cannot supply a band the coverage
    /// floor requires.
    pub fn select_next(
        &mut self,
        model: &ResponseModel,
        theta: f64,
        coverage: &CoverageTable,
        bank: &dyn ItemBank,
        probed: &BTreeSet<u32>,
    ) -> Result<u32, EngineError> {
        let center = self.plan.band_for_theta(theta);

        // Forced coverage first: an under-probed band near the ability wins
        // over the maximally informative rank.
        if let Some(band) =
            coverage.forced_band(center, self.coverage_radius, self.min_probes_per_band)
        {
            if let Some(rank) = bank.sample_in_band(band, probed, &mut self.rng) {
                return Ok(rank);
            }
            // The bank cannot supply a band the coverage floor requires, and
            // never will: the floor can only be met by probing that band.
            return Err(EngineError::BankExhausted);
        }

        let target = model.information_optimal_rank(theta, self.plan.corpus_size());
        if !probed.contains(&target) && bank.lookup(target).is_some() {
            return Ok(target);
        }

        // Random unprobed rank from the target's band, then widen outward.
        let target_band = self.plan.band_of(target);
        for distance in 0..self.plan.len() {
            let mut candidates = Vec::with_capacity(2);
            if let Some(lower) = target_band.checked_sub(distance) {
                candidates.push(lower);
            }
            if distance > 0 && target_band + distance < self.plan.len() {
                candidates.push(target_band + distance);
            }
            for band in candidates {
                if let Some(rank) = bank.sample_in_band(band, probed, &mut self.rng) {
                    return Ok(rank);
                }
            }
        }

        Err(EngineError::BankExhausted)
    }
}
