//! Main `VocabOracle` entry point and builder.

use std::sync::Arc;

use crate::bands::BandPlan;
use crate::config::Config;
use crate::error::EngineError;
use crate::estimator::AbilityEstimator;
use crate::scale::VocabScale;
use crate::session::Session;
use crate::types::AbilityEstimate;

/// Entry point for adaptive vocabulary assessment.
///
/// Owns the immutable inputs shared by every session: the theta scale
/// (corpus statistics) and the configuration. Sessions created from one
/// oracle are fully independent and may be driven concurrently, one per
/// learner.
///
/// # Example
///
/// ```
/// use vocab_oracle::{Config, RangeBank, VocabOracle, VocabScale};
///
/// let scale = VocabScale::log_rank(50_000, 0.6)?;
/// let oracle = VocabOracle::new(scale, 50_000)?.config(Config::balanced().seed(42));
/// let bank = RangeBank::new(oracle.band_plan()?);
///
/// let mut session = oracle.create_session(None)?;
/// while !session.is_terminated().0 {
///     let rank = match session.next_item(&bank) {
///         Ok(rank) => rank,
///         Err(_) => break,
///     };
///     // Present the word at `rank` to the learner; here: knows the top 8000.
///     let correct = rank <= 8_000;
///     session.record_response(rank, correct)?;
/// }
/// let estimate = session.estimate();
/// assert!(estimate.ci_low <= estimate.vocabulary_size);
/// assert!(estimate.vocabulary_size <= estimate.ci_high);
/// # Ok::<(), vocab_oracle::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VocabOracle {
    config: Config,
    scale: Arc<VocabScale>,
    corpus_size: u32,
}

impl VocabOracle {
    /// Create an oracle over a corpus of `corpus_size` ranked words with
    /// default configuration.
    ///
    /// The scale is supplied once here and treated as immutable afterwards.
    pub fn new(scale: VocabScale, corpus_size: u32) -> Result<Self, EngineError> {
        if corpus_size < 2 {
            return Err(EngineError::Configuration(format!(
                "corpus_size must be at least 2, got {corpus_size}"
            )));
        }
        Ok(Self {
            config: Config::default(),
            scale: Arc::new(scale),
            corpus_size,
        })
    }

    /// Replace the configuration.
    ///
    /// Validation happens at [`create_session`](Self::create_session), which
    /// reports problems as [`EngineError::Configuration`].
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The current configuration.
    pub fn config_ref(&self) -> &Config {
        &self.config
    }

    /// The shared theta scale.
    pub fn scale(&self) -> Arc<VocabScale> {
        Arc::clone(&self.scale)
    }

    /// Number of ranks in the corpus.
    pub fn corpus_size(&self) -> u32 {
        self.corpus_size
    }

    /// The band partition implied by the current configuration.
    ///
    /// Useful for wiring up an [`ItemBank`](crate::ItemBank) that needs to
    /// resolve band ids to rank ranges, such as [`RangeBank`](crate::RangeBank).
    pub fn band_plan(&self) -> Result<Arc<BandPlan>, EngineError> {
        Ok(Arc::new(BandPlan::new(self.corpus_size, self.config.bands)?))
    }

    /// Start a new assessment session.
    ///
    /// `prior` warm-starts the estimator from an earlier assessment of the
    /// same learner; `None` uses the cold-start prior. Fails with
    /// [`EngineError::Configuration`] on invalid configuration.
    pub fn create_session(
        &self,
        prior: Option<AbilityEstimate>,
    ) -> Result<Session, EngineError> {
        self.config.validate()?;
        let plan = self.band_plan()?;
        let estimator = AbilityEstimator::new(&self.config, self.scale(), prior.as_ref());
        Ok(Session::new(self.config.clone(), estimator, plan))
    }
}
