//! In-memory store backend.
//!
//! Reference implementation of [`ActivityStore`] over a `RwLock`-guarded map.
//! The conditional transition check runs under the write lock, which gives
//! the compare-and-swap semantics the contract requires. Lock poisoning maps
//! to [`StoreError::LockPoisoned`] rather than panicking in the caller.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use super::{ActivityStore, StoreError, TransitionVerdict};
use crate::policy::Category;
use crate::submission::{ActivitySubmission, ReviewStatus, StudentId, SubmissionDraft, SubmissionId};

/// Thread-safe in-memory activity store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<SubmissionId, ActivitySubmission>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.len())
    }

    /// Returns `true` if the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ActivityStore for MemoryStore {
    fn create(&self, draft: SubmissionDraft) -> Result<SubmissionId, StoreError> {
        let id = SubmissionId::generate();
        let record = ActivitySubmission {
            id,
            student: draft.student,
            category: draft.category,
            level: draft.level,
            title: draft.title,
            description: draft.description,
            organizer: draft.organizer,
            semester: draft.semester,
            occurred_on: draft.occurred_on,
            certificate_path: draft.certificate_path,
            created_at: Utc::now(),
            status: ReviewStatus::Pending,
        };

        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(id, record);
        debug!(%id, "submission created");
        Ok(id)
    }

    fn get(&self, id: SubmissionId) -> Result<ActivitySubmission, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn find_approved(
        &self,
        student: &StudentId,
        category: Category,
        year: i32,
    ) -> Result<Vec<ActivitySubmission>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records
            .values()
            .filter(|record| {
                record.student == *student
                    && record.category == category
                    && record.year() == year
                    && matches!(record.status, ReviewStatus::Approved { .. })
            })
            .cloned()
            .collect())
    }

    fn find_by_student(&self, student: &StudentId) -> Result<Vec<ActivitySubmission>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut found: Vec<ActivitySubmission> = records
            .values()
            .filter(|record| record.student == *student)
            .cloned()
            .collect();
        // Newest first, matching the reviewer-facing listings.
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    fn commit_transition(
        &self,
        id: SubmissionId,
        verdict: TransitionVerdict,
    ) -> Result<ActivitySubmission, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound { id })?;

        if !record.is_pending() {
            return Err(StoreError::Conflict { id });
        }

        record.status = verdict.into_status(Utc::now());
        debug!(%id, status = %record.status.kind(), points = record.awarded_points(), "transition committed");
        Ok(record.clone())
    }
}
