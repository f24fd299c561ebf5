//! The item-bank collaborator seam.
//!
//! The corpus itself (word senses, tiers, distractors, audio) lives outside
//! the engine; all the engine needs is the ability to resolve a rank to an
//! item and to draw an unprobed rank from a band. [`RangeBank`] is a dense
//! in-memory implementation over `1..=corpus_size` so the library is fully
//! exercisable (and testable) without external infrastructure.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::bands::BandPlan;
use crate::types::{BandId, Item};

/// Read-only source of probe items, keyed by frequency rank.
///
/// Implementations must be deterministic given the supplied RNG and must
/// never yield a rank in `excluding`.
pub trait ItemBank {
    /// Resolve a rank to its item, or `None` if the bank has no such rank.
    fn lookup(&self, rank: u32) -> Option<Item>;

    /// Draw an unprobed rank from the given band, or `None` if every rank in
    /// the band is excluded or absent.
    fn sample_in_band(
        &self,
        band: BandId,
        excluding: &BTreeSet<u32>,
        rng: &mut dyn RngCore,
    ) -> Option<u32>;
}

/// Dense bank holding every rank in `1..=corpus_size`.
#[derive(Debug, Clone)]
pub struct RangeBank {
    plan: Arc<BandPlan>,
}

impl RangeBank {
    /// Bank over the full rank range of the given band plan.
    pub fn new(plan: Arc<BandPlan>) -> Self {
        Self { plan }
    }
}

impl ItemBank for RangeBank {
    fn lookup(&self, rank: u32) -> Option<Item> {
        if rank >= 1 && rank <= self.plan.corpus_size() {
            Some(Item {
                rank,
                band: self.plan.band_of(rank),
            })
        } else {
            None
        }
    }

    fn sample_in_band(
        &self,
        band: BandId,
        excluding: &BTreeSet<u32>,
        rng: &mut dyn RngCore,
    ) -> Option<u32> {
        let (low, high) = self.plan.rank_range(band);
        let band_size = u64::from(high - low) + 1;
        let excluded_here = excluding.range(low..=high).count() as u64;
        if excluded_here >= band_size {
            return None;
        }
        // Rejection sampling is cheap while the band is mostly unprobed,
        // which it always is at session scale (tens of probes vs thousands
        // of ranks). Fall back to an ascending scan for pathological bands.
        for _ in 0..64 {
            let rank = rng.random_range(low..=high);
            if !excluding.contains(&rank) {
                return Some(rank);
            }
        }
        (low..=high).find(|rank| !excluding.contains(rank))
    }
}
