//! Activity submission data model.
//!
//! This module defines the central entity of the system: a student's
//! [`ActivitySubmission`] and its lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! SubmissionDraft --create--> ActivitySubmission (PENDING)
//!                             |
//!                             v
//!            exactly one terminal transition
//!                             |
//!              +--------------+--------------+
//!              v                             v
//!       Approved { points, .. }      Rejected { .. }
//! ```
//!
//! # Key Concepts
//!
//! - **Draft**: shape-validated input from the intake collaborator; the only
//!   way to construct a submission.
//! - **Terminal transition**: the single, irreversible move out of pending,
//!   performed by the approval engine.
//! - **Closed status**: [`ReviewStatus`] is a tagged variant, so an approved
//!   record without points, or reviewer metadata on a pending record, cannot
//!   be represented.

mod draft;
mod state;

#[cfg(test)]
mod tests;

pub use draft::{DraftError, SubmissionDraft};
pub use state::{
    ActivitySubmission, ReviewStatus, ReviewerId, StatusKind, StudentId, SubmissionId,
};
