//! Submission entity and review status variants.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::policy::Category;

/// Unique identifier of a submission, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the submitting student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Creates a student id from an opaque external identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the reviewer who performed a terminal transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewerId(String);

impl ReviewerId {
    /// Creates a reviewer id from an opaque external identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReviewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review status of a submission.
///
/// Terminal variants carry the reviewer metadata, so it cannot exist on a
/// pending record, and an approved record always has its points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting review; no points awarded.
    Pending,
    /// Approved with points awarded.
    Approved {
        /// Points awarded at approval time.
        points: u32,
        /// Reviewer who approved.
        reviewer: ReviewerId,
        /// When the approval was committed.
        reviewed_at: DateTime<Utc>,
        /// Optional feedback for the student.
        feedback: Option<String>,
    },
    /// Rejected; no points awarded.
    Rejected {
        /// Reviewer who rejected.
        reviewer: ReviewerId,
        /// When the rejection was committed.
        reviewed_at: DateTime<Utc>,
        /// Optional feedback for the student.
        feedback: Option<String>,
    },
}

impl ReviewStatus {
    /// Returns the discriminant without associated data.
    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        match self {
            Self::Pending => StatusKind::Pending,
            Self::Approved { .. } => StatusKind::Approved,
            Self::Rejected { .. } => StatusKind::Rejected,
        }
    }

    /// Returns `true` if the status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Status discriminant, used for filtering and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Awaiting review.
    Pending,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
}

impl StatusKind {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A student's extracurricular activity submission.
///
/// Created from a [`super::SubmissionDraft`] by the store; every field except
/// `status` is immutable for the life of the record. `status` changes exactly
/// once, through the store's conditional transition path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySubmission {
    /// Unique id, assigned at creation.
    pub id: SubmissionId,
    /// The submitting student.
    pub student: StudentId,
    /// Activity category.
    pub category: Category,
    /// Sports level in 1..=5; present if and only if `category` is sports.
    pub level: Option<u8>,
    /// Short title of the activity.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Organizing body of the activity.
    pub organizer: String,
    /// Student's semester at submission time, 1..=8.
    pub semester: u8,
    /// Calendar date the activity took place; never in the future.
    pub occurred_on: NaiveDate,
    /// Reference to the certificate upload, stored out-of-band.
    pub certificate_path: String,
    /// When the submission entered the store.
    pub created_at: DateTime<Utc>,
    /// Review status; starts pending, transitions exactly once.
    pub status: ReviewStatus,
}

impl ActivitySubmission {
    /// Points awarded to this submission. Zero unless approved.
    #[must_use]
    pub const fn awarded_points(&self) -> u32 {
        match &self.status {
            ReviewStatus::Approved { points, .. } => *points,
            ReviewStatus::Pending | ReviewStatus::Rejected { .. } => 0,
        }
    }

    /// Calendar year the activity took place in. Cap enforcement is scoped
    /// to this year, not the submission year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.occurred_on.year()
    }

    /// Returns `true` if the submission is still awaiting review.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, ReviewStatus::Pending)
    }
}
