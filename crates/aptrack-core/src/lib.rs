//! Points-award invariant engine for student activity tracking.
//!
//! Students submit extracurricular activities; reviewers approve or reject
//! them; approvals award points subject to per-category yearly caps. This
//! crate is the core that makes that award decision correct: the point value,
//! the cap check, and the state transition commit as one atomic unit per
//! `(student, category, year)`, so concurrent reviewers can never double-count
//! toward a cap or double-commit a record.
//!
//! The HTTP surface, authentication, certificate file storage, and the
//! persistence backend live outside this crate and consume it through the
//! [`store::ActivityStore`] trait and the [`engine::ApprovalEngine`] API.
//!
//! # Components
//!
//! - [`policy`] — the fixed (category, level) → points table and yearly caps
//! - [`submission`] — the submission entity and its closed status variants
//! - [`store`] — persistence contract with a conditional single write path
//! - [`ledger`] — yearly usage derived from committed approvals
//! - [`engine`] — the pending → {approved, rejected} state machine
//! - [`report`] — read-only per-student rollups
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use aptrack_core::engine::{ApprovalEngine, ReviewDecision, ReviewerInfo};
//! use aptrack_core::policy::Category;
//! use aptrack_core::store::{ActivityStore, MemoryStore};
//! use aptrack_core::submission::{ReviewerId, StudentId, SubmissionDraft};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ApprovalEngine::new(Arc::new(MemoryStore::new()));
//!
//! let draft = SubmissionDraft::new(
//!     StudentId::new("student-1"),
//!     Category::Sports,
//!     Some(3),
//!     "District championship",
//!     "First place, 400m",
//!     None,
//!     4,
//!     chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
//!     "certificates/championship.pdf",
//! )?;
//! let id = engine.store().create(draft)?;
//!
//! let approved = engine.review(
//!     id,
//!     ReviewDecision::Approve,
//!     ReviewerInfo::new(ReviewerId::new("teacher-1")),
//! )?;
//! assert_eq!(approved.awarded_points(), 25);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod ledger;
pub mod policy;
pub mod report;
pub mod store;
pub mod submission;

pub use engine::{ApprovalEngine, ReviewDecision, ReviewError, ReviewerInfo};
pub use ledger::{CapBound, CapBreach, CapLedger, YearlyUsage};
pub use policy::{Category, CategoryCaps, PointsPolicy, PolicyError};
pub use report::{ReportAggregator, ReportFilter, StatusCounts, StudentSummary};
pub use store::{ActivityStore, MemoryStore, StoreError, TransitionVerdict};
pub use submission::{
    ActivitySubmission, DraftError, ReviewStatus, ReviewerId, StatusKind, StudentId,
    SubmissionDraft, SubmissionId,
};
