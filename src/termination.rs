//! Stopping rules for the adaptive session.
//!
//! Stopping is decoupled from any fixed question count: the primary rule is
//! achieved precision (confidence-interval width), gated by a minimum item
//! count so the interval cannot close on too little evidence and by the
//! band-coverage floor so it cannot close before the neighborhood of the
//! estimate has been probed. A maximum item count is the hard safety bound
//! on session length. Rules are checked in priority order and the first that
//! fires names the reason.

use crate::config::Config;
use crate::types::{AbilityEstimate, TerminationReason};

/// Evaluate the stopping rules after a recorded response.
///
/// `coverage_satisfied` is whether the forced-coverage policy has no
/// outstanding band near the current estimate. Returns `None` while the
/// session should continue. Bank exhaustion is not decided here; it surfaces
/// from item selection and is recorded by the session directly.
pub fn evaluate(
    items_administered: u32,
    estimate: &AbilityEstimate,
    coverage_satisfied: bool,
    config: &Config,
) -> Option<TerminationReason> {
    if items_administered >= config.max_items {
        return Some(TerminationReason::MaxItems);
    }
    if items_administered >= config.min_items
        && coverage_satisfied
        && config.ci_width_threshold.is_met(
            f64::from(estimate.ci_width()),
            f64::from(estimate.vocabulary_size),
        )
    {
        return Some(TerminationReason::PrecisionReached);
    }
    None
}
