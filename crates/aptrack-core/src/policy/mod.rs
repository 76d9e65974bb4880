//! Points policy for activity categories.
//!
//! This module implements the fixed rule table that decides, for each activity
//! category, how many points an approved submission is worth and what a
//! student may accrue per calendar year:
//!
//! - **Point value**: (category, optional sports level) → points
//! - **Count cap**: maximum approved submissions per year, if bounded
//! - **Points cap**: maximum total points per year, if bounded
//!
//! # Design
//!
//! The table is a domain constant, not configuration. [`PointsPolicy`] is a
//! zero-size value constructed once and passed by reference into the approval
//! engine; it is pure and never mutated at runtime. Consulting it has no side
//! effects.
//!
//! # Rule table
//!
//! | category | points | max/year (count) | max/year (points) |
//! |---|---|---|---|
//! | sports level 1..=5 | 8 / 15 / 25 / 40 / 50 | unbounded | 60 |
//! | mooc | 50 | 1 | unbounded |
//! | workshop | 6 | 2 | 12 |
//! | internship | 20 | 1 | unbounded |
//!
//! # Example
//!
//! ```rust
//! use aptrack_core::policy::{Category, PointsPolicy};
//!
//! let policy = PointsPolicy::new();
//!
//! assert_eq!(policy.points_for(Category::Sports, Some(3)).unwrap(), 25);
//! assert_eq!(policy.points_for(Category::Workshop, None).unwrap(), 6);
//!
//! let caps = policy.caps_for(Category::Workshop);
//! assert_eq!(caps.max_count_per_year, Some(2));
//! assert_eq!(caps.max_points_per_year, Some(12));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of activity categories a student can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Sports participation, graded by a level in 1..=5.
    Sports,
    /// Completed MOOC certificate.
    Mooc,
    /// Workshop attendance.
    Workshop,
    /// Internship completion.
    Internship,
}

impl Category {
    /// Returns all categories.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Sports, Self::Mooc, Self::Workshop, Self::Internship]
    }

    /// Returns the string representation used by external callers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sports => "sports",
            Self::Mooc => "mooc",
            Self::Workshop => "workshop",
            Self::Internship => "internship",
        }
    }

    /// Returns `true` if this category requires a sports level.
    #[must_use]
    pub const fn requires_level(&self) -> bool {
        matches!(self, Self::Sports)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sports" => Ok(Self::Sports),
            "mooc" => Ok(Self::Mooc),
            "workshop" => Ok(Self::Workshop),
            "internship" => Ok(Self::Internship),
            other => Err(PolicyError::UnknownCategory {
                value: other.to_string(),
            }),
        }
    }
}

/// Errors from consulting the points policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PolicyError {
    /// Sports level outside the valid 1..=5 range.
    #[error("sports level must be between 1 and 5, got {level}")]
    InvalidLevel {
        /// The level that was supplied.
        level: u8,
    },

    /// Sports submission without a level.
    #[error("sports activities require a level between 1 and 5")]
    MissingLevel,

    /// Category string not in the closed set.
    #[error("unknown activity category: {value}")]
    UnknownCategory {
        /// The unrecognized value.
        value: String,
    },
}

/// Per-category yearly ceilings.
///
/// `None` means the axis is unbounded for that category (e.g. sports has no
/// count cap, only a points cap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCaps {
    /// Maximum approved submissions per calendar year.
    pub max_count_per_year: Option<u32>,
    /// Maximum total awarded points per calendar year.
    pub max_points_per_year: Option<u32>,
}

impl CategoryCaps {
    /// Returns `true` if neither axis is bounded.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_count_per_year.is_none() && self.max_points_per_year.is_none()
    }
}

/// Point values per sports level, indexed by `level - 1`.
const SPORTS_POINTS: [u32; 5] = [8, 15, 25, 40, 50];

/// The fixed rule table mapping categories to point values and yearly caps.
///
/// Pure and stateless; safe to share by reference across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsPolicy;

impl PointsPolicy {
    /// Creates the policy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the point value for an approved submission of this category.
    ///
    /// `level` is mandatory for [`Category::Sports`] and ignored for every
    /// other category.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::MissingLevel`] for sports without a level and
    /// [`PolicyError::InvalidLevel`] for a level outside 1..=5.
    pub fn points_for(&self, category: Category, level: Option<u8>) -> Result<u32, PolicyError> {
        match category {
            Category::Sports => match level {
                None => Err(PolicyError::MissingLevel),
                Some(level @ 1..=5) => Ok(SPORTS_POINTS[usize::from(level) - 1]),
                Some(level) => Err(PolicyError::InvalidLevel { level }),
            },
            Category::Mooc => Ok(50),
            Category::Workshop => Ok(6),
            Category::Internship => Ok(20),
        }
    }

    /// Returns the yearly ceilings for a category.
    #[must_use]
    pub const fn caps_for(&self, category: Category) -> CategoryCaps {
        match category {
            Category::Sports => CategoryCaps {
                max_count_per_year: None,
                max_points_per_year: Some(60),
            },
            Category::Mooc => CategoryCaps {
                max_count_per_year: Some(1),
                max_points_per_year: None,
            },
            Category::Workshop => CategoryCaps {
                max_count_per_year: Some(2),
                max_points_per_year: Some(12),
            },
            Category::Internship => CategoryCaps {
                max_count_per_year: Some(1),
                max_points_per_year: None,
            },
        }
    }
}
