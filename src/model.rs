//! Logistic response model over log-rank.
//!
//! The probability that a learner of ability `theta` knows the word at
//! frequency rank `r` is modeled as a two-parameter logistic with item
//! difficulty `ln(r)`:
//!
//! ```text
//! P(correct | r, theta) = sigmoid(slope * (theta - ln(r)))
//! ```
//!
//! Rarer words (larger rank) are harder. The model is strictly increasing in
//! theta for fixed rank and strictly decreasing in rank for fixed theta; the
//! estimator's correctness (concave log-likelihood, non-inverted bounds)
//! rests on this monotonicity.

/// Logistic response model with a fixed discrimination slope.
///
/// With the default slope of 1.0, one standard deviation of ability moves the
/// success probability on a borderline item from 50% to about 73%. The slope
/// is a calibration constant, intended to be fitted against held-out human
/// assessment data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseModel {
    slope: f64,
}

impl Default for ResponseModel {
    fn default() -> Self {
        Self { slope: 1.0 }
    }
}

impl ResponseModel {
    /// Create a model with the given discrimination slope.
    ///
    /// # Panics
    ///
    /// Panics unless `slope` is finite and positive.
    pub fn new(slope: f64) -> Self {
        assert!(slope.is_finite() && slope > 0.0, "slope must be positive");
        Self { slope }
    }

    /// The discrimination slope.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Item difficulty on the theta scale: `ln(rank)`.
    pub fn difficulty(rank: u32) -> f64 {
        debug_assert!(rank >= 1, "ranks are 1-based");
        f64::from(rank).ln()
    }

    /// P(correct | rank, theta), strictly inside (0, 1).
    pub fn probability_correct(&self, rank: u32, theta: f64) -> f64 {
        sigmoid(self.slope * (theta - Self::difficulty(rank)))
    }

    /// Fisher information contributed by one item at the given ability:
    /// `slope^2 * p * (1 - p)`.
    ///
    /// Maximal when the item's difficulty equals theta, which is what makes
    /// maximum-information selection equivalent to difficulty matching.
    pub fn fisher_information(&self, rank: u32, theta: f64) -> f64 {
        let p = self.probability_correct(rank, theta);
        self.slope * self.slope * p * (1.0 - p)
    }

    /// The rank whose difficulty best matches `theta`, i.e. the
    /// maximum-information probe: `round(exp(theta))` clamped to
    /// `[1, max_rank]`.
    pub fn information_optimal_rank(&self, theta: f64, max_rank: u32) -> u32 {
        let r = theta.exp().round();
        if r < 1.0 {
            1
        } else if r >= f64::from(max_rank) {
            max_rank
        } else {
            r as u32
        }
    }
}

/// Numerically stable logistic function, clamped away from exact 0 and 1 so
/// log-likelihood terms stay finite.
fn sigmoid(x: f64) -> f64 {
    let p = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    };
    p.clamp(1e-12, 1.0 - 1e-12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borderline_item_is_a_coin_flip() {
        let model = ResponseModel::default();
        // rank 1000 has difficulty ln(1000); ability equal to it gives 50%.
        let theta = ResponseModel::difficulty(1000);
        assert!((model.probability_correct(1000, theta) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn one_sd_moves_borderline_to_73_percent() {
        let model = ResponseModel::default();
        let theta = ResponseModel::difficulty(1000) + 1.0;
        let p = model.probability_correct(1000, theta);
        assert!((p - 0.731).abs() < 0.001, "got {p}");
    }

    #[test]
    fn strictly_increasing_in_theta() {
        let model = ResponseModel::new(1.4);
        let mut prev = 0.0;
        for i in 0..100 {
            let theta = -5.0 + 0.2 * f64::from(i);
            let p = model.probability_correct(500, theta);
            assert!(p > prev, "not increasing at theta={theta}");
            prev = p;
        }
    }

    #[test]
    fn strictly_decreasing_in_rank() {
        let model = ResponseModel::default();
        let theta = 8.0;
        let mut prev = 1.0;
        for rank in [1u32, 3, 10, 50, 400, 3_000, 25_000, 200_000] {
            let p = model.probability_correct(rank, theta);
            assert!(p < prev, "not decreasing at rank={rank}");
            prev = p;
        }
    }

    #[test]
    fn information_peaks_at_matching_difficulty() {
        let model = ResponseModel::default();
        let theta = ResponseModel::difficulty(2000);
        let at_match = model.fisher_information(2000, theta);
        assert!(at_match > model.fisher_information(200, theta));
        assert!(at_match > model.fisher_information(20_000, theta));
        // At the match point p = 0.5, so information = slope^2 / 4.
        assert!((at_match - 0.25).abs() < 1e-9);
    }

    #[test]
    fn optimal_rank_matches_exp_theta() {
        let model = ResponseModel::default();
        assert_eq!(model.information_optimal_rank(1000f64.ln(), 50_000), 1000);
        assert_eq!(model.information_optimal_rank(-2.0, 50_000), 1);
        assert_eq!(model.information_optimal_rank(20.0, 50_000), 50_000);
    }

    #[test]
    #[should_panic(expected = "slope must be positive")]
    fn rejects_non_positive_slope() {
        ResponseModel::new(0.0);
    }
}
