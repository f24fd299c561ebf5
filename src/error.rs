//! Error taxonomy for the estimation engine.
//!
//! Every fallible operation returns [`EngineError`]. The engine performs no
//! local retries: all operations are synchronous and deterministic, so retry
//! policy (re-prompting the learner, restarting an assessment) belongs to the
//! caller.

/// Errors surfaced by the estimation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// An operation was invoked on a session that has already terminated.
    ///
    /// This is a caller protocol violation: termination must be detected via
    /// [`Session::is_terminated`](crate::Session::is_terminated) before
    /// issuing further probes. Recoverable by starting a new session.
    #[error("session has terminated; create a new session for a new assessment")]
    SessionTerminated,

    /// A response was submitted for an item that is not currently pending.
    ///
    /// Protects against out-of-order or replayed responses: only the rank
    /// most recently issued by `next_item` may be answered.
    #[error("rank {rank} is not the pending item for this session")]
    UnknownItem {
        /// The rank the caller attempted to answer.
        rank: u32,
    },

    /// The item bank cannot supply an eligible rank for the required band.
    ///
    /// Surfaced rather than silently degrading precision: a session that hits
    /// this terminates with [`TerminationReason::BankExhausted`](crate::TerminationReason::BankExhausted).
    #[error("item bank exhausted: no eligible rank remains for the required band")]
    BankExhausted,

    /// Invalid configuration detected at session creation.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}
