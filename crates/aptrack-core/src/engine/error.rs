//! Review error taxonomy.

use thiserror::Error;

use crate::ledger::CapBreach;
use crate::policy::PolicyError;
use crate::store::StoreError;
use crate::submission::{StatusKind, SubmissionId};

/// Errors from reviewing a submission.
///
/// [`ReviewError::CapExceeded`] and [`ReviewError::AlreadyReviewed`] are
/// expected, reviewer-facing outcomes; [`ReviewError::Store`] covers
/// infrastructure faults. Callers can rely on the distinction when mapping to
/// a transport status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ReviewError {
    /// Malformed category/level combination on the stored record.
    #[error("invalid submission data: {0}")]
    InvalidInput(#[from] PolicyError),

    /// No submission with this id.
    #[error("submission not found: {id}")]
    NotFound {
        /// The id that was not found.
        id: SubmissionId,
    },

    /// The submission already has a terminal status.
    #[error("submission {id} was already reviewed: {status}")]
    AlreadyReviewed {
        /// The id of the terminal record.
        id: SubmissionId,
        /// The terminal status it holds.
        status: StatusKind,
    },

    /// Approving would cross a yearly cap; the record stays pending.
    #[error(
        "yearly {bound} cap exceeded: {would_total} > {limit}",
        bound = .breach.bound,
        would_total = .breach.would_total,
        limit = .breach.limit,
    )]
    CapExceeded {
        /// Which bound was hit and the usage at check time.
        breach: CapBreach,
    },

    /// A concurrent review committed first. Retry the whole `review` call;
    /// the record state has changed, so the cap check alone must not be
    /// retried.
    #[error("submission {id} lost a concurrent review race")]
    Conflict {
        /// The contended id.
        id: SubmissionId,
    },

    /// Store infrastructure fault.
    #[error(transparent)]
    Store(StoreError),
}

impl ReviewError {
    /// Returns `true` for expected reviewer-facing outcomes, as opposed to
    /// infrastructure faults.
    #[must_use]
    pub const fn is_business_outcome(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::NotFound { .. }
                | Self::AlreadyReviewed { .. }
                | Self::CapExceeded { .. }
                | Self::Conflict { .. }
        )
    }

    /// Returns `true` if retrying the whole `review` call is safe.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Conflict { .. } | Self::Store(StoreError::Unavailable { .. })
        )
    }
}

impl From<StoreError> for ReviewError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFound { id },
            StoreError::Conflict { id } => Self::Conflict { id },
            other => Self::Store(other),
        }
    }
}
