//! Enforcement unit and its lock registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::policy::Category;
use crate::submission::{ActivitySubmission, StudentId};

/// The tuple cap enforcement is scoped to.
///
/// Reviews sharing a unit are serialized; reviews on different units proceed
/// in parallel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnforcementUnit {
    /// The student accruing points.
    pub student: StudentId,
    /// The capped category.
    pub category: Category,
    /// Calendar year of the activity date.
    pub year: i32,
}

impl EnforcementUnit {
    /// Derives the unit a submission's approval would be enforced under.
    #[must_use]
    pub fn of(submission: &ActivitySubmission) -> Self {
        Self {
            student: submission.student.clone(),
            category: submission.category,
            year: submission.year(),
        }
    }
}

impl std::fmt::Display for EnforcementUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.student, self.category, self.year)
    }
}

/// Per-unit exclusive locks.
///
/// The registry map itself is held only long enough to fetch or insert the
/// unit's lock; the returned handle is then locked outside the registry, so
/// units never contend with each other. Entries are never removed: the key
/// space is bounded by real student/category/year cardinality.
#[derive(Debug, Default)]
pub(crate) struct UnitLockRegistry {
    locks: Mutex<HashMap<EnforcementUnit, Arc<Mutex<()>>>>,
}

impl UnitLockRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the lock handle for a unit, creating it on first use.
    ///
    /// Poisoning of the registry or of a unit lock means a reviewer thread
    /// panicked mid-review; `None` lets the caller surface a typed error
    /// instead of propagating the panic.
    pub(crate) fn handle(&self, unit: &EnforcementUnit) -> Option<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().ok()?;
        Some(Arc::clone(
            locks
                .entry(unit.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        ))
    }
}
