//! Read-only reporting rollups.
//!
//! Per-student summaries and status tallies folded from store queries. The
//! aggregator takes no locks and holds no invariants of its own: it reads
//! whatever is committed at the time of each query, which is all reporting
//! needs. A review landing mid-summary can make totals momentarily stale,
//! never inconsistent per record.

use serde::{Deserialize, Serialize};

use crate::store::{ActivityStore, StoreError};
use crate::submission::{StatusKind, StudentId};

/// Filters applied before folding a student's submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Keep only submissions with this status.
    pub status: Option<StatusKind>,
    /// Keep only submissions from this semester.
    pub semester: Option<u8>,
}

impl ReportFilter {
    /// No filtering; every submission counts.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            status: None,
            semester: None,
        }
    }
}

/// Rollup of one student's submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    /// The student this row describes.
    pub student: StudentId,
    /// Submissions matching the filter.
    pub total_activities: u32,
    /// Approved submissions among them.
    pub approved_count: u32,
    /// Pending submissions among them.
    pub pending_count: u32,
    /// Rejected submissions among them.
    pub rejected_count: u32,
    /// Sum of awarded points among them.
    pub total_points: u32,
}

/// Status tallies across a set of students, for reviewer dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Pending submissions.
    pub pending: u32,
    /// Approved submissions.
    pub approved: u32,
    /// Rejected submissions.
    pub rejected: u32,
}

/// Builds read-only rollups from store queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAggregator;

impl ReportAggregator {
    /// Creates the aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Summarizes each requested student. Students with no matching
    /// submissions still get a zeroed row, so report consumers see the full
    /// roster.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if a backend query fails.
    pub fn summarize<S: ActivityStore + ?Sized>(
        &self,
        store: &S,
        students: &[StudentId],
        filter: ReportFilter,
    ) -> Result<Vec<StudentSummary>, StoreError> {
        students
            .iter()
            .map(|student| {
                let mut summary = StudentSummary {
                    student: student.clone(),
                    total_activities: 0,
                    approved_count: 0,
                    pending_count: 0,
                    rejected_count: 0,
                    total_points: 0,
                };
                for record in store.find_by_student(student)? {
                    let kind = record.status.kind();
                    if filter.status.is_some_and(|wanted| wanted != kind) {
                        continue;
                    }
                    if filter.semester.is_some_and(|wanted| wanted != record.semester) {
                        continue;
                    }
                    summary.total_activities += 1;
                    summary.total_points += record.awarded_points();
                    match kind {
                        StatusKind::Approved => summary.approved_count += 1,
                        StatusKind::Pending => summary.pending_count += 1,
                        StatusKind::Rejected => summary.rejected_count += 1,
                    }
                }
                Ok(summary)
            })
            .collect()
    }

    /// Tallies submission statuses across a set of students.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if a backend query fails.
    pub fn status_counts<S: ActivityStore + ?Sized>(
        &self,
        store: &S,
        students: &[StudentId],
    ) -> Result<StatusCounts, StoreError> {
        let mut counts = StatusCounts::default();
        for student in students {
            for record in store.find_by_student(student)? {
                match record.status.kind() {
                    StatusKind::Pending => counts.pending += 1,
                    StatusKind::Approved => counts.approved += 1,
                    StatusKind::Rejected => counts.rejected += 1,
                }
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::engine::{ApprovalEngine, ReviewDecision, ReviewerInfo};
    use crate::policy::Category;
    use crate::store::MemoryStore;
    use crate::submission::{ReviewerId, SubmissionDraft};

    fn seed() -> (ApprovalEngine<MemoryStore>, Vec<StudentId>) {
        let engine = ApprovalEngine::new(Arc::new(MemoryStore::new()));
        let students = vec![StudentId::new("student-a"), StudentId::new("student-b")];

        let submit = |student: &StudentId, category: Category, semester: u8| {
            let draft = SubmissionDraft::new(
                student.clone(),
                category,
                if category == Category::Sports { Some(1) } else { None },
                "title",
                "description",
                None,
                semester,
                NaiveDate::from_ymd_opt(2025, 5, 10).expect("valid date"),
                "certificates/cert.pdf",
            )
            .expect("valid draft");
            engine.store().create(draft).expect("create")
        };
        let review = |id, decision| {
            engine
                .review(id, decision, ReviewerInfo::new(ReviewerId::new("teacher-1")))
                .expect("review")
        };

        // student-a: one approved mooc (50), one rejected workshop, one pending.
        review(submit(&students[0], Category::Mooc, 3), ReviewDecision::Approve);
        review(submit(&students[0], Category::Workshop, 3), ReviewDecision::Reject);
        submit(&students[0], Category::Sports, 5);

        // student-b: one approved workshop (6).
        review(submit(&students[1], Category::Workshop, 2), ReviewDecision::Approve);

        (engine, students)
    }

    #[test]
    fn test_summarize_folds_per_student() {
        let (engine, students) = seed();
        let report = ReportAggregator::new()
            .summarize(engine.store().as_ref(), &students, ReportFilter::all())
            .expect("summarize");

        assert_eq!(report.len(), 2);
        let a = &report[0];
        assert_eq!(a.total_activities, 3);
        assert_eq!(a.approved_count, 1);
        assert_eq!(a.pending_count, 1);
        assert_eq!(a.rejected_count, 1);
        assert_eq!(a.total_points, 50);

        let b = &report[1];
        assert_eq!(b.total_activities, 1);
        assert_eq!(b.total_points, 6);
    }

    #[test]
    fn test_summarize_filters_by_status_and_semester() {
        let (engine, students) = seed();
        let aggregator = ReportAggregator::new();

        let approved_only = aggregator
            .summarize(
                engine.store().as_ref(),
                &students,
                ReportFilter {
                    status: Some(StatusKind::Approved),
                    semester: None,
                },
            )
            .expect("summarize");
        assert_eq!(approved_only[0].total_activities, 1);
        assert_eq!(approved_only[0].total_points, 50);

        let semester_five = aggregator
            .summarize(
                engine.store().as_ref(),
                &students,
                ReportFilter {
                    status: None,
                    semester: Some(5),
                },
            )
            .expect("summarize");
        assert_eq!(semester_five[0].total_activities, 1);
        assert_eq!(semester_five[0].pending_count, 1);
        assert_eq!(semester_five[1].total_activities, 0);
    }

    #[test]
    fn test_unknown_student_gets_zeroed_row() {
        let (engine, _) = seed();
        let ghost = vec![StudentId::new("student-z")];
        let report = ReportAggregator::new()
            .summarize(engine.store().as_ref(), &ghost, ReportFilter::all())
            .expect("summarize");
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].total_activities, 0);
        assert_eq!(report[0].total_points, 0);
    }

    #[test]
    fn test_status_counts_across_students() {
        let (engine, students) = seed();
        let counts = ReportAggregator::new()
            .status_counts(engine.store().as_ref(), &students)
            .expect("counts");
        assert_eq!(
            counts,
            StatusCounts {
                pending: 1,
                approved: 2,
                rejected: 1,
            }
        );
    }
}
