//! Maximum-likelihood ability estimation.
//!
//! The log-likelihood of the response history under the logistic model is
//! strictly concave in theta, so its derivative (the score) is strictly
//! decreasing and the MLE is the unique root of the score, found by plain
//! bisection over the scale's theta domain. No heuristic bound bookkeeping
//! is involved: when the score has no root inside the domain (all responses
//! correct, or all incorrect) the estimate clamps at the domain boundary and
//! the standard error is computed there, keeping the interval wide instead
//! of letting the point estimate run away.

use std::sync::Arc;

use crate::config::Config;
use crate::model::ResponseModel;
use crate::scale::VocabScale;
use crate::statistics::z_for_confidence;
use crate::types::{AbilityEstimate, Response};

/// Floor on total Fisher information when deriving a standard error, so a
/// zero-information history (empty, or clamped far from every probe) yields
/// a finite, very wide interval instead of a division by zero.
const MIN_INFORMATION: f64 = 1e-9;

/// Ability estimator for one session.
///
/// Pure given the response list: `estimate` recomputes the MLE from scratch
/// on every call and holds no state of its own.
#[derive(Debug, Clone)]
pub struct AbilityEstimator {
    model: ResponseModel,
    scale: Arc<VocabScale>,
    z: f64,
    prior_theta: f64,
    prior_se: f64,
    tolerance: f64,
    max_iterations: u32,
}

impl AbilityEstimator {
    /// Build an estimator from config, scale, and an optional warm-start
    /// prior from an earlier assessment of the same learner.
    pub fn new(
        config: &Config,
        scale: Arc<VocabScale>,
        prior: Option<&AbilityEstimate>,
    ) -> Self {
        let span = scale.theta_max() - scale.theta_min();
        let (prior_theta, prior_se) = match prior {
            Some(p) => (
                p.theta.clamp(scale.theta_min(), scale.theta_max()),
                p.standard_error.max(1e-6),
            ),
            None => (
                config.prior_theta.unwrap_or_else(|| scale.theta_mid()),
                config.prior_se.unwrap_or(span / 4.0),
            ),
        };
        Self {
            model: ResponseModel::new(config.slope),
            scale,
            z: z_for_confidence(config.confidence_level),
            prior_theta,
            prior_se,
            tolerance: config.mle_tolerance,
            max_iterations: config.mle_max_iterations,
        }
    }

    /// The response model in use.
    pub fn model(&self) -> &ResponseModel {
        &self.model
    }

    /// Current estimate from the accumulated responses.
    ///
    /// With zero responses this is the prior with maximal uncertainty; the
    /// bounds still pass through the monotone scale, so they are never
    /// inverted.
    pub fn estimate(&self, responses: &[Response]) -> AbilityEstimate {
        if responses.is_empty() {
            return self.build(self.prior_theta, self.prior_se);
        }
        let theta = self.maximize(responses);
        let info: f64 = responses
            .iter()
            .map(|r| self.model.fisher_information(r.rank, theta))
            .sum();
        let se = 1.0 / info.max(MIN_INFORMATION).sqrt();
        self.build(theta, se)
    }

    /// Derivative of the log-likelihood at theta; strictly decreasing.
    fn score(&self, responses: &[Response], theta: f64) -> f64 {
        let slope = self.model.slope();
        responses
            .iter()
            .map(|r| {
                let p = self.model.probability_correct(r.rank, theta);
                let y = if r.correct { 1.0 } else { 0.0 };
                slope * (y - p)
            })
            .sum()
    }

    /// Root of the score by bisection, clamped to the scale's theta domain.
    fn maximize(&self, responses: &[Response]) -> f64 {
        let mut lo = self.scale.theta_min();
        let mut hi = self.scale.theta_max();
        // Score is positive below the MLE and negative above it. No sign
        // change inside the domain means the maximum sits on a boundary.
        if self.score(responses, lo) <= 0.0 {
            return lo;
        }
        if self.score(responses, hi) >= 0.0 {
            return hi;
        }
        for _ in 0..self.max_iterations {
            let mid = 0.5 * (lo + hi);
            if self.score(responses, mid) > 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
            if hi - lo < self.tolerance {
                break;
            }
        }
        0.5 * (lo + hi)
    }

    /// Map a theta and its standard error into a size-unit estimate. All
    /// three outputs pass through the one monotone scale.
    fn build(&self, theta: f64, se: f64) -> AbilityEstimate {
        let theta_low = (theta - self.z * se).max(self.scale.theta_min());
        let theta_high = (theta + self.z * se).min(self.scale.theta_max());
        AbilityEstimate::new(
            theta,
            self.scale.vocabulary_size(theta),
            self.scale.vocabulary_size(theta_low),
            self.scale.vocabulary_size(theta_high),
            se,
        )
    }
}
