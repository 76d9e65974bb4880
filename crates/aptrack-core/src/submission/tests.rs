//! Tests for the submission data model.

use chrono::{Duration, NaiveDate, Utc};

use super::*;
use crate::policy::Category;

fn valid_draft(category: Category, level: Option<u8>) -> Result<SubmissionDraft, DraftError> {
    SubmissionDraft::new(
        StudentId::new("student-1"),
        category,
        level,
        "Inter-college tournament",
        "Represented the college team",
        None,
        3,
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        "certificates/cert-1.pdf",
    )
}

#[test]
fn test_draft_accepts_valid_input() {
    let draft = valid_draft(Category::Sports, Some(2)).expect("valid draft");
    assert_eq!(draft.category(), Category::Sports);
    assert_eq!(draft.level(), Some(2));
}

#[test]
fn test_draft_defaults_organizer() {
    let draft = valid_draft(Category::Workshop, None).expect("valid draft");
    assert_eq!(draft.organizer, "Not specified");
}

#[test]
fn test_draft_rejects_blank_title() {
    let err = SubmissionDraft::new(
        StudentId::new("student-1"),
        Category::Workshop,
        None,
        "   ",
        "description",
        None,
        3,
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        "certificates/cert-1.pdf",
    )
    .expect_err("blank title must be rejected");
    assert_eq!(err, DraftError::BlankField { field: "title" });
}

#[test]
fn test_draft_rejects_semester_out_of_range() {
    for semester in [0u8, 9] {
        let err = SubmissionDraft::new(
            StudentId::new("student-1"),
            Category::Workshop,
            None,
            "title",
            "description",
            None,
            semester,
            NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
            "certificates/cert-1.pdf",
        )
        .expect_err("out-of-range semester must be rejected");
        assert_eq!(err, DraftError::InvalidSemester { semester });
    }
}

#[test]
fn test_draft_rejects_future_date() {
    let tomorrow = (Utc::now() + Duration::days(1)).date_naive();
    let err = SubmissionDraft::new(
        StudentId::new("student-1"),
        Category::Workshop,
        None,
        "title",
        "description",
        None,
        3,
        tomorrow,
        "certificates/cert-1.pdf",
    )
    .expect_err("future date must be rejected");
    assert!(matches!(err, DraftError::FutureDate { .. }));
}

#[test]
fn test_draft_requires_level_for_sports() {
    assert_eq!(
        valid_draft(Category::Sports, None).expect_err("missing level"),
        DraftError::MissingLevel
    );
    assert_eq!(
        valid_draft(Category::Sports, Some(7)).expect_err("invalid level"),
        DraftError::InvalidLevel { level: 7 }
    );
}

#[test]
fn test_draft_drops_level_for_non_sports() {
    let draft = valid_draft(Category::Mooc, Some(4)).expect("valid draft");
    assert_eq!(draft.level(), None);
}

#[test]
fn test_awarded_points_zero_unless_approved() {
    let pending = ActivitySubmission {
        id: SubmissionId::generate(),
        student: StudentId::new("student-1"),
        category: Category::Mooc,
        level: None,
        title: "Rust fundamentals".to_string(),
        description: "Completed with distinction".to_string(),
        organizer: "Not specified".to_string(),
        semester: 5,
        occurred_on: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
        certificate_path: "certificates/mooc.pdf".to_string(),
        created_at: Utc::now(),
        status: ReviewStatus::Pending,
    };
    assert_eq!(pending.awarded_points(), 0);
    assert!(pending.is_pending());

    let rejected = ActivitySubmission {
        status: ReviewStatus::Rejected {
            reviewer: ReviewerId::new("teacher-1"),
            reviewed_at: Utc::now(),
            feedback: Some("certificate unreadable".to_string()),
        },
        ..pending.clone()
    };
    assert_eq!(rejected.awarded_points(), 0);
    assert!(rejected.status.is_terminal());

    let approved = ActivitySubmission {
        status: ReviewStatus::Approved {
            points: 50,
            reviewer: ReviewerId::new("teacher-1"),
            reviewed_at: Utc::now(),
            feedback: None,
        },
        ..pending
    };
    assert_eq!(approved.awarded_points(), 50);
}

#[test]
fn test_year_uses_activity_date() {
    let submission = ActivitySubmission {
        id: SubmissionId::generate(),
        student: StudentId::new("student-1"),
        category: Category::Workshop,
        level: None,
        title: "t".to_string(),
        description: "d".to_string(),
        organizer: "Not specified".to_string(),
        semester: 1,
        occurred_on: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
        certificate_path: "certificates/w.pdf".to_string(),
        created_at: Utc::now(),
        status: ReviewStatus::Pending,
    };
    assert_eq!(submission.year(), 2024);
}

#[test]
fn test_status_kind_round_trip() {
    assert_eq!(ReviewStatus::Pending.kind(), StatusKind::Pending);
    assert_eq!(StatusKind::Approved.as_str(), "approved");
    assert_eq!(StatusKind::Rejected.to_string(), "rejected");
}

#[test]
fn test_status_serializes_as_tagged_variant() {
    let approved = ReviewStatus::Approved {
        points: 25,
        reviewer: ReviewerId::new("teacher-1"),
        reviewed_at: Utc::now(),
        feedback: None,
    };
    let json = serde_json::to_value(&approved).expect("serialize");
    assert_eq!(json["status"], "approved");
    assert_eq!(json["points"], 25);

    let json = serde_json::to_value(ReviewStatus::Pending).expect("serialize");
    assert_eq!(json["status"], "pending");
}
