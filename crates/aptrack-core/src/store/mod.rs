//! Activity record storage layer.
//!
//! This module defines the persistence contract for activity submissions and
//! an in-memory reference backend. The [`ActivityStore`] trait keeps the rest
//! of the crate independent of the storage engine; any backend that supports
//! a conditional single-record update and a range query by student, category
//! and year can implement it.
//!
//! # Single write path
//!
//! [`ActivityStore::commit_transition`] is the only operation that mutates a
//! record after creation. It applies a fully-formed [`TransitionVerdict`]
//! conditionally: the record must still be pending, otherwise the commit
//! fails with [`StoreError::Conflict`]. Status and awarded points land in one
//! write; no partial transition is ever observable.
//!
//! # Invariants
//!
//! - A record is created pending and unawarded.
//! - At most one terminal transition per record.
//! - `find_approved` returns only committed approved records, so cap usage
//!   derived from it never counts an in-flight review.

mod memory;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::Category;
use crate::submission::{ActivitySubmission, ReviewStatus, ReviewerId, StudentId, SubmissionDraft, SubmissionId};

/// Errors from store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// No record with this id.
    #[error("submission not found: {id}")]
    NotFound {
        /// The id that was not found.
        id: SubmissionId,
    },

    /// The record was no longer pending when the transition was applied.
    #[error("submission {id} was already reviewed by a concurrent transition")]
    Conflict {
        /// The id whose transition lost the race.
        id: SubmissionId,
    },

    /// A lock guarding store state was poisoned by a panicking thread.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Transient backend failure; safe to retry with backoff.
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Backend-specific description of the fault.
        reason: String,
    },
}

/// A fully-formed terminal outcome to apply to a pending record.
///
/// Carrying points inside the approved variant is what makes the transition
/// atomic at the type level: there is no way to commit an approval without
/// its points, or points without the approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionVerdict {
    /// Approve and award points.
    Approved {
        /// Points to award.
        points: u32,
        /// Reviewer committing the approval.
        reviewer: ReviewerId,
        /// Optional feedback for the student.
        feedback: Option<String>,
    },
    /// Reject; no points.
    Rejected {
        /// Reviewer committing the rejection.
        reviewer: ReviewerId,
        /// Optional feedback for the student.
        feedback: Option<String>,
    },
}

impl TransitionVerdict {
    /// Materializes the verdict into a terminal [`ReviewStatus`].
    #[must_use]
    pub fn into_status(self, reviewed_at: DateTime<Utc>) -> ReviewStatus {
        match self {
            Self::Approved {
                points,
                reviewer,
                feedback,
            } => ReviewStatus::Approved {
                points,
                reviewer,
                reviewed_at,
                feedback,
            },
            Self::Rejected { reviewer, feedback } => ReviewStatus::Rejected {
                reviewer,
                reviewed_at,
                feedback,
            },
        }
    }
}

/// Persistence contract for activity submissions.
///
/// Implementations must be safe to share across threads; every method takes
/// `&self`.
pub trait ActivityStore: Send + Sync {
    /// Creates a pending submission from a validated draft and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend rejects the write.
    fn create(&self, draft: SubmissionDraft) -> Result<SubmissionId, StoreError>;

    /// Loads a submission by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    fn get(&self, id: SubmissionId) -> Result<ActivitySubmission, StoreError>;

    /// Returns the committed approved submissions for one enforcement unit:
    /// a student, a category, and the calendar year of the activity date.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend query fails.
    fn find_approved(
        &self,
        student: &StudentId,
        category: Category,
        year: i32,
    ) -> Result<Vec<ActivitySubmission>, StoreError>;

    /// Returns all submissions for a student, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend query fails.
    fn find_by_student(&self, student: &StudentId) -> Result<Vec<ActivitySubmission>, StoreError>;

    /// Applies a terminal verdict to a pending record, conditionally.
    ///
    /// The check that the record is still pending and the write of the new
    /// status happen as one atomic step with respect to other callers.
    /// Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::Conflict`] if the record already left pending.
    fn commit_transition(
        &self,
        id: SubmissionId,
        verdict: TransitionVerdict,
    ) -> Result<ActivitySubmission, StoreError>;
}
