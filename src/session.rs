//! The session state machine.
//!
//! A session is a sequential, caller-driven assessment: issue an item, await
//! the learner's answer, record it, repeat until a stopping rule fires. The
//! session exclusively owns its response history and coverage table; the item
//! bank and theta scale are shared read-only inputs. Lifecycle is one-way,
//! `Active` to `Terminated`; a new assessment requires a new session.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::bands::{BandPlan, CoverageTable};
use crate::bank::ItemBank;
use crate::config::Config;
use crate::error::EngineError;
use crate::estimator::AbilityEstimator;
use crate::selector::ItemSelector;
use crate::termination;
use crate::types::{AbilityEstimate, Response, SessionStatus, TerminationReason};

/// One adaptive assessment for one learner.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    estimator: AbilityEstimator,
    selector: ItemSelector,
    plan: Arc<BandPlan>,
    responses: Vec<Response>,
    coverage: CoverageTable,
    probed: BTreeSet<u32>,
    pending: Option<u32>,
    current_estimate: AbilityEstimate,
    status: SessionStatus,
    termination_reason: Option<TerminationReason>,
}

impl Session {
    pub(crate) fn new(
        config: Config,
        estimator: AbilityEstimator,
        plan: Arc<BandPlan>,
    ) -> Self {
        let selector = ItemSelector::new(
            Arc::clone(&plan),
            config.min_probes_per_band,
            config.coverage_radius,
            config.seed,
        );
        let coverage = CoverageTable::new(plan.len());
        let current_estimate = estimator.estimate(&[]);
        Self {
            config,
            estimator,
            selector,
            plan,
            responses: Vec::new(),
            coverage,
            probed: BTreeSet::new(),
            pending: None,
            current_estimate,
            status: SessionStatus::Active,
            termination_reason: None,
        }
    }

    /// Choose the next rank to probe.
    ///
    /// The returned rank becomes the session's pending item and is the only
    /// rank [`record_response`](Self::record_response) will accept. Calling
    /// again before answering reissues the same pending rank. Fails with
    /// [`EngineError::SessionTerminated`] on a terminated session; on
    /// [`EngineError::BankExhausted`] the session terminates with that
    /// reason.
    pub fn next_item(&mut self, bank: &dyn ItemBank) -> Result<u32, EngineError> {
        self.ensure_active()?;
        if let Some(rank) = self.pending {
            return Ok(rank);
        }
        match self.selector.select_next(
            self.estimator.model(),
            self.current_estimate.theta,
            &self.coverage,
            bank,
            &self.probed,
        ) {
            Ok(rank) => {
                self.pending = Some(rank);
                self.probed.insert(rank);
                Ok(rank)
            }
            Err(EngineError::BankExhausted) => {
                self.status = SessionStatus::Terminated;
                self.termination_reason = Some(TerminationReason::BankExhausted);
                Err(EngineError::BankExhausted)
            }
            Err(other) => Err(other),
        }
    }

    /// Record the learner's answer to the pending item.
    ///
    /// Appends the response, updates band coverage, recomputes the ability
    /// estimate, then evaluates the stopping rules and transitions to
    /// `Terminated` if one fires. Returns the fresh estimate. Fails with
    /// [`EngineError::UnknownItem`] if `rank` is not the pending item, which
    /// rejects out-of-order and replayed responses.
    pub fn record_response(
        &mut self,
        rank: u32,
        correct: bool,
    ) -> Result<AbilityEstimate, EngineError> {
        self.ensure_active()?;
        if self.pending != Some(rank) {
            return Err(EngineError::UnknownItem { rank });
        }
        self.pending = None;
        self.responses.push(Response {
            rank,
            correct,
            ordinal: self.responses.len() as u32,
        });
        self.coverage.record(self.plan.band_of(rank), correct);
        self.current_estimate = self.estimator.estimate(&self.responses);

        // Precision may not close the session while a band near the new
        // estimate is still below its probe floor.
        let coverage_satisfied = self
            .coverage
            .forced_band(
                self.plan.band_for_theta(self.current_estimate.theta),
                self.config.coverage_radius,
                self.config.min_probes_per_band,
            )
            .is_none();

        if let Some(reason) = termination::evaluate(
            self.responses.len() as u32,
            &self.current_estimate,
            coverage_satisfied,
            &self.config,
        ) {
            self.status = SessionStatus::Terminated;
            self.termination_reason = Some(reason);
        }
        Ok(self.current_estimate)
    }

    /// Whether the session has terminated, and why.
    pub fn is_terminated(&self) -> (bool, Option<TerminationReason>) {
        (
            self.status == SessionStatus::Terminated,
            self.termination_reason,
        )
    }

    /// Lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The current ability estimate.
    pub fn estimate(&self) -> &AbilityEstimate {
        &self.current_estimate
    }

    /// Responses recorded so far, in arrival order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Per-band coverage bookkeeping.
    pub fn coverage(&self) -> &CoverageTable {
        &self.coverage
    }

    /// Number of items answered.
    pub fn items_administered(&self) -> u32 {
        self.responses.len() as u32
    }

    fn ensure_active(&self) -> Result<(), EngineError> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Terminated => Err(EngineError::SessionTerminated),
        }
    }
}
