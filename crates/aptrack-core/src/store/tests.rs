//! Tests for the in-memory store backend.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;

use super::*;

fn draft(student: &str, category: Category, day: u32) -> SubmissionDraft {
    SubmissionDraft::new(
        StudentId::new(student),
        category,
        if category == Category::Sports { Some(2) } else { None },
        "title",
        "description",
        None,
        4,
        NaiveDate::from_ymd_opt(2025, 2, day).expect("valid date"),
        "certificates/cert.pdf",
    )
    .expect("valid draft")
}

fn approval(reviewer: &str, points: u32) -> TransitionVerdict {
    TransitionVerdict::Approved {
        points,
        reviewer: ReviewerId::new(reviewer),
        feedback: None,
    }
}

#[test]
fn test_create_starts_pending_and_unawarded() {
    let store = MemoryStore::new();
    let id = store
        .create(draft("student-1", Category::Workshop, 1))
        .expect("create");

    let record = store.get(id).expect("get");
    assert!(record.is_pending());
    assert_eq!(record.awarded_points(), 0);
    assert_eq!(store.len().expect("len"), 1);
}

#[test]
fn test_get_unknown_id_fails() {
    let store = MemoryStore::new();
    let id = SubmissionId::generate();
    assert_eq!(store.get(id), Err(StoreError::NotFound { id }));
}

#[test]
fn test_commit_approval_sets_status_and_points_together() {
    let store = MemoryStore::new();
    let id = store
        .create(draft("student-1", Category::Mooc, 1))
        .expect("create");

    let updated = store
        .commit_transition(id, approval("teacher-1", 50))
        .expect("commit");
    assert_eq!(updated.awarded_points(), 50);
    assert!(updated.status.is_terminal());

    // The stored record matches what the commit returned.
    assert_eq!(store.get(id).expect("get"), updated);
}

#[test]
fn test_commit_rejection_awards_nothing() {
    let store = MemoryStore::new();
    let id = store
        .create(draft("student-1", Category::Internship, 1))
        .expect("create");

    let updated = store
        .commit_transition(
            id,
            TransitionVerdict::Rejected {
                reviewer: ReviewerId::new("teacher-1"),
                feedback: Some("certificate expired".to_string()),
            },
        )
        .expect("commit");
    assert_eq!(updated.awarded_points(), 0);
    assert!(updated.status.is_terminal());
}

#[test]
fn test_second_transition_conflicts() {
    let store = MemoryStore::new();
    let id = store
        .create(draft("student-1", Category::Workshop, 1))
        .expect("create");

    store
        .commit_transition(id, approval("teacher-1", 6))
        .expect("first commit");
    let err = store
        .commit_transition(id, approval("teacher-2", 6))
        .expect_err("second commit must conflict");
    assert_eq!(err, StoreError::Conflict { id });

    // The first verdict stands untouched.
    assert_eq!(store.get(id).expect("get").awarded_points(), 6);
}

#[test]
fn test_find_approved_scopes_to_student_category_year() {
    let store = MemoryStore::new();

    let in_unit = store
        .create(draft("student-1", Category::Workshop, 1))
        .expect("create");
    store
        .commit_transition(in_unit, approval("teacher-1", 6))
        .expect("commit");

    // Same student, different category.
    let other_category = store
        .create(draft("student-1", Category::Mooc, 2))
        .expect("create");
    store
        .commit_transition(other_category, approval("teacher-1", 50))
        .expect("commit");

    // Same unit, but still pending.
    store
        .create(draft("student-1", Category::Workshop, 3))
        .expect("create");

    // Different student.
    let other_student = store
        .create(draft("student-2", Category::Workshop, 4))
        .expect("create");
    store
        .commit_transition(other_student, approval("teacher-1", 6))
        .expect("commit");

    let found = store
        .find_approved(&StudentId::new("student-1"), Category::Workshop, 2025)
        .expect("find");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, in_unit);

    let other_year = store
        .find_approved(&StudentId::new("student-1"), Category::Workshop, 2024)
        .expect("find");
    assert!(other_year.is_empty());
}

#[test]
fn test_find_by_student_returns_newest_first() {
    let store = MemoryStore::new();
    let first = store
        .create(draft("student-1", Category::Workshop, 1))
        .expect("create");
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = store
        .create(draft("student-1", Category::Mooc, 2))
        .expect("create");

    let found = store
        .find_by_student(&StudentId::new("student-1"))
        .expect("find");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].id, second);
    assert_eq!(found[1].id, first);
}

#[test]
fn test_concurrent_transitions_commit_exactly_once() {
    let store = Arc::new(MemoryStore::new());
    let id = store
        .create(draft("student-1", Category::Mooc, 1))
        .expect("create");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.commit_transition(id, approval(&format!("teacher-{i}"), 50))
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    let committed = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(committed, 1, "exactly one transition may win");
    for result in results.iter().filter(|r| r.is_err()) {
        assert_eq!(result.clone().unwrap_err(), StoreError::Conflict { id });
    }
    assert_eq!(store.get(id).expect("get").awarded_points(), 50);
}
