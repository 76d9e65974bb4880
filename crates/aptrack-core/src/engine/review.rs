//! The review operation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::ReviewError;
use super::unit::{EnforcementUnit, UnitLockRegistry};
use crate::ledger::CapLedger;
use crate::policy::PointsPolicy;
use crate::store::{ActivityStore, StoreError, TransitionVerdict};
use crate::submission::{ActivitySubmission, ReviewerId, SubmissionId};

/// The reviewer's verdict on a pending submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    /// Approve and award points per the policy table.
    Approve,
    /// Reject without awarding points.
    Reject,
}

/// Who reviewed, and what they told the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerInfo {
    /// The reviewer performing the transition.
    pub reviewer: ReviewerId,
    /// Optional feedback recorded on the terminal status.
    pub feedback: Option<String>,
}

impl ReviewerInfo {
    /// Creates reviewer info without feedback.
    #[must_use]
    pub fn new(reviewer: ReviewerId) -> Self {
        Self {
            reviewer,
            feedback: None,
        }
    }

    /// Attaches feedback.
    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }
}

/// Validates and commits terminal transitions for pending submissions.
///
/// Holds the points policy by value (it is a pure constant) and the store
/// behind an `Arc` so reviewer threads can share one engine.
pub struct ApprovalEngine<S: ActivityStore> {
    store: Arc<S>,
    policy: PointsPolicy,
    ledger: CapLedger,
    units: UnitLockRegistry,
}

impl<S: ActivityStore> ApprovalEngine<S> {
    /// Creates an engine over a store with the fixed points policy.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            policy: PointsPolicy::new(),
            ledger: CapLedger::new(),
            units: UnitLockRegistry::new(),
        }
    }

    /// The store this engine commits to.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Reviews a pending submission.
    ///
    /// A rejection commits immediately with zero points. An approval computes
    /// the point value, then serializes with every other review of the same
    /// `(student, category, year)` unit while it reads current usage, checks
    /// the caps, and commits. On success the returned record carries the
    /// terminal status.
    ///
    /// # Errors
    ///
    /// - [`ReviewError::NotFound`] — unknown id.
    /// - [`ReviewError::AlreadyReviewed`] — the record is already terminal.
    /// - [`ReviewError::InvalidInput`] — the stored category/level pair is
    ///   malformed (cannot happen for records built from a draft).
    /// - [`ReviewError::CapExceeded`] — approval would cross a yearly cap;
    ///   the record stays pending.
    /// - [`ReviewError::Conflict`] — a concurrent review committed first;
    ///   retry the whole call.
    /// - [`ReviewError::Store`] — infrastructure fault.
    pub fn review(
        &self,
        id: SubmissionId,
        decision: ReviewDecision,
        info: ReviewerInfo,
    ) -> Result<ActivitySubmission, ReviewError> {
        let record = self.load_pending(id)?;

        match decision {
            ReviewDecision::Reject => {
                let committed = self.store.commit_transition(
                    id,
                    TransitionVerdict::Rejected {
                        reviewer: info.reviewer,
                        feedback: info.feedback,
                    },
                )?;
                debug!(%id, "submission rejected");
                Ok(committed)
            }
            ReviewDecision::Approve => self.approve(&record, info),
        }
    }

    /// Loads a record and verifies it is still pending.
    fn load_pending(&self, id: SubmissionId) -> Result<ActivitySubmission, ReviewError> {
        let record = self.store.get(id)?;
        if record.status.is_terminal() {
            return Err(ReviewError::AlreadyReviewed {
                id,
                status: record.status.kind(),
            });
        }
        Ok(record)
    }

    /// Cap-checked approval, serialized per enforcement unit.
    fn approve(
        &self,
        record: &ActivitySubmission,
        info: ReviewerInfo,
    ) -> Result<ActivitySubmission, ReviewError> {
        let points = self.policy.points_for(record.category, record.level)?;
        let caps = self.policy.caps_for(record.category);
        let unit = EnforcementUnit::of(record);

        let handle = self
            .units
            .handle(&unit)
            .ok_or(ReviewError::Store(StoreError::LockPoisoned))?;
        let _guard = handle
            .lock()
            .map_err(|_| ReviewError::Store(StoreError::LockPoisoned))?;

        // Usage read and commit happen under the unit lock: no second
        // reviewer can pass the cap check against the same snapshot.
        let usage =
            self.ledger
                .current_usage(self.store.as_ref(), &unit.student, unit.category, unit.year)?;
        if let Err(breach) = self.ledger.check(usage, points, caps) {
            warn!(
                %unit,
                bound = %breach.bound,
                would_total = breach.would_total,
                limit = breach.limit,
                "approval denied: cap exceeded"
            );
            return Err(ReviewError::CapExceeded { breach });
        }

        let committed = self.store.commit_transition(
            record.id,
            TransitionVerdict::Approved {
                points,
                reviewer: info.reviewer,
                feedback: info.feedback,
            },
        )?;
        debug!(%unit, id = %record.id, points, "submission approved");
        Ok(committed)
    }
}
