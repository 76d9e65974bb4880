//! Checked construction of submission drafts.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::Category;

/// Lowest and highest valid semester.
const SEMESTER_RANGE: std::ops::RangeInclusive<u8> = 1..=8;

/// Errors from draft validation.
///
/// These are caller errors: the intake collaborator rejected malformed input
/// and nothing entered the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DraftError {
    /// A required text field was empty or blank.
    #[error("required field is blank: {field}")]
    BlankField {
        /// Name of the blank field.
        field: &'static str,
    },

    /// Semester outside 1..=8.
    #[error("semester must be between 1 and 8, got {semester}")]
    InvalidSemester {
        /// The semester that was supplied.
        semester: u8,
    },

    /// Activity date later than the submission date.
    #[error("activity date {occurred_on} is in the future")]
    FutureDate {
        /// The offending date.
        occurred_on: NaiveDate,
    },

    /// Sports submission without a level.
    #[error("sports activities require a level between 1 and 5")]
    MissingLevel,

    /// Sports level outside 1..=5.
    #[error("sports level must be between 1 and 5, got {level}")]
    InvalidLevel {
        /// The level that was supplied.
        level: u8,
    },
}

/// A shape-validated submission awaiting creation in the store.
///
/// The only way to obtain one is [`SubmissionDraft::new`], which enforces the
/// intake rules: non-blank title/description, semester in 1..=8, no future
/// activity date, and a level if and only if the category is sports (a level
/// supplied for any other category is dropped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub(crate) student: super::StudentId,
    pub(crate) category: Category,
    pub(crate) level: Option<u8>,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) organizer: String,
    pub(crate) semester: u8,
    pub(crate) occurred_on: NaiveDate,
    pub(crate) certificate_path: String,
}

impl SubmissionDraft {
    /// Validates intake fields and builds a draft.
    ///
    /// An absent `organizer` defaults to `"Not specified"`.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] naming the first violated intake rule.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student: super::StudentId,
        category: Category,
        level: Option<u8>,
        title: impl Into<String>,
        description: impl Into<String>,
        organizer: Option<String>,
        semester: u8,
        occurred_on: NaiveDate,
        certificate_path: impl Into<String>,
    ) -> Result<Self, DraftError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DraftError::BlankField { field: "title" });
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DraftError::BlankField {
                field: "description",
            });
        }
        let certificate_path = certificate_path.into();
        if certificate_path.trim().is_empty() {
            return Err(DraftError::BlankField {
                field: "certificate_path",
            });
        }
        if !SEMESTER_RANGE.contains(&semester) {
            return Err(DraftError::InvalidSemester { semester });
        }
        if occurred_on > Utc::now().date_naive() {
            return Err(DraftError::FutureDate { occurred_on });
        }

        let level = if category.requires_level() {
            match level {
                None => return Err(DraftError::MissingLevel),
                Some(level @ 1..=5) => Some(level),
                Some(level) => return Err(DraftError::InvalidLevel { level }),
            }
        } else {
            // Meaningless outside sports; drop rather than store.
            None
        };

        Ok(Self {
            student,
            category,
            level,
            title,
            description,
            organizer: organizer.unwrap_or_else(|| "Not specified".to_string()),
            semester,
            occurred_on,
            certificate_path,
        })
    }

    /// The submitting student.
    #[must_use]
    pub fn student(&self) -> &super::StudentId {
        &self.student
    }

    /// The activity category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// The validated sports level, if the category is sports.
    #[must_use]
    pub const fn level(&self) -> Option<u8> {
        self.level
    }

    /// The date the activity took place.
    #[must_use]
    pub const fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }
}
