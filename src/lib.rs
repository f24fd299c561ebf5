//! # vocab-oracle
//!
//! Estimate the size of a learner's productive vocabulary from a small
//! number of adaptively chosen word-knowledge probes.
//!
//! The engine models the probability of knowing a word as a logistic
//! function of the gap between the learner's latent ability and the word's
//! log-frequency-rank difficulty, estimates ability by maximum likelihood
//! after every response, picks each next probe for maximum Fisher
//! information subject to a stratified band-coverage floor, and stops when
//! the confidence interval is narrow enough (or an item budget runs out),
//! reporting:
//! - an estimated vocabulary size in words
//! - a non-inverted confidence interval at the configured level
//! - a tagged termination reason for telemetry and UX
//!
//! Both confidence bounds are produced by pushing theta values through one
//! strictly increasing theta-to-size map, so `ci_low <= estimate <= ci_high`
//! holds by construction rather than by clamping.
//!
//! ## Quick Start
//!
//! ```
//! use vocab_oracle::{Config, RangeBank, VocabOracle, VocabScale};
//!
//! let scale = VocabScale::log_rank(50_000, 0.6)?;
//! let oracle = VocabOracle::new(scale, 50_000)?.config(Config::quick().seed(1));
//! let bank = RangeBank::new(oracle.band_plan()?);
//!
//! let mut session = oracle.create_session(None)?;
//! while !session.is_terminated().0 {
//!     let Ok(rank) = session.next_item(&bank) else { break };
//!     let learner_knows_it = rank <= 5_000; // stand-in for the real learner
//!     session.record_response(rank, learner_knows_it)?;
//! }
//!
//! let (_, reason) = session.is_terminated();
//! println!(
//!     "estimated {} words [{} - {}], stopped: {:?}",
//!     session.estimate().vocabulary_size,
//!     session.estimate().ci_low,
//!     session.estimate().ci_high,
//!     reason,
//! );
//! # Ok::<(), vocab_oracle::EngineError>(())
//! ```
//!
//! The engine has no internal concurrency and performs no I/O: a session is
//! a sequential state machine driven entirely by its caller (present item,
//! await answer, record response). The item bank and theta scale are shared
//! read-only; sessions share no mutable state with each other.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod oracle;
mod session;
mod types;

// Functional modules
pub mod bands;
pub mod bank;
pub mod estimator;
pub mod model;
pub mod scale;
pub mod selector;
pub mod statistics;
pub mod termination;

// Re-exports for public API
pub use bands::{BandCoverage, BandPlan, CoverageTable};
pub use bank::{ItemBank, RangeBank};
pub use config::{CiWidthThreshold, Config};
pub use error::EngineError;
pub use estimator::AbilityEstimator;
pub use model::ResponseModel;
pub use oracle::VocabOracle;
pub use scale::VocabScale;
pub use session::Session;
pub use types::{AbilityEstimate, BandId, Item, Response, SessionStatus, TerminationReason};
