//! Core value types shared across the engine.

/// Index of a coverage band. Band 0 holds the most frequent (easiest) ranks.
pub type BandId = usize;

/// A single probe word, characterized by its frequency rank.
///
/// Rank 1 is the most frequent word in the language; smaller rank means more
/// frequent and therefore easier. Items are supplied by the external item
/// bank and never mutated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Frequency rank, 1-based.
    pub rank: u32,
    /// Coverage band containing this rank.
    pub band: BandId,
}

/// Immutable record of one probe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Response {
    /// Rank of the probed item.
    pub rank: u32,
    /// Whether the learner answered correctly.
    pub correct: bool,
    /// Position of this response in the session, 0-based arrival order.
    pub ordinal: u32,
}

/// Point estimate of ability with its confidence interval.
///
/// `theta` lives on the model's internal log-rank scale; `vocabulary_size`
/// and both bounds are obtained by pushing theta values through the single
/// monotone [`VocabScale`](crate::VocabScale) map, which makes
/// `ci_low <= vocabulary_size <= ci_high` hold by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityEstimate {
    /// Latent ability on the internal scale.
    pub theta: f64,
    /// Estimated vocabulary size in words.
    pub vocabulary_size: u32,
    /// Lower confidence bound in words.
    pub ci_low: u32,
    /// Upper confidence bound in words.
    pub ci_high: u32,
    /// Standard error of theta.
    pub standard_error: f64,
}

impl AbilityEstimate {
    /// Assemble an estimate, asserting the central bounds invariant.
    ///
    /// A violation here is a defect in the estimator, not a recoverable
    /// condition, so it fails loudly rather than clamping.
    pub(crate) fn new(
        theta: f64,
        vocabulary_size: u32,
        ci_low: u32,
        ci_high: u32,
        standard_error: f64,
    ) -> Self {
        assert!(
            ci_low <= vocabulary_size && vocabulary_size <= ci_high,
            "estimator defect: inverted bounds [{ci_low}, {vocabulary_size}, {ci_high}]"
        );
        assert!(standard_error >= 0.0, "negative standard error");
        Self {
            theta,
            vocabulary_size,
            ci_low,
            ci_high,
            standard_error,
        }
    }

    /// Width of the confidence interval in words.
    pub fn ci_width(&self) -> u32 {
        self.ci_high - self.ci_low
    }
}

/// Why a session stopped.
///
/// Surfaced to the caller for telemetry and UX; never changes the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// The confidence interval closed below the configured width with at
    /// least `min_items` probes recorded.
    PrecisionReached,
    /// The configured maximum item count was reached before the precision
    /// target; the estimate is still valid, just less precise.
    MaxItems,
    /// The item bank could not supply an eligible rank for a required band.
    BankExhausted,
}

/// Lifecycle state of a session. One-way: `Active` to `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    /// Accepting probes.
    Active,
    /// Immutable; a new assessment requires a new session.
    Terminated,
}
