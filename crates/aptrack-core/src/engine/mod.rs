//! Approval engine: the points-award state machine.
//!
//! This module decides terminal transitions for pending submissions. It is
//! the only component allowed to ask the store for a transition, and the only
//! place the points policy and cap ledger meet.
//!
//! # Architecture
//!
//! ```text
//! review(id, decision, reviewer)
//!   |
//!   v
//! load record ----------------> NotFound / AlreadyReviewed
//!   |
//!   +-- Reject --> commit Rejected (no cap consultation)
//!   |
//!   +-- Approve
//!        |
//!        v
//!   lock (student, category, year)   <- serialization unit
//!        |
//!        v
//!   points_for --> usage --> cap check --> CapExceeded (stays pending)
//!        |
//!        v
//!   commit Approved { points } --> Conflict if the record left pending
//! ```
//!
//! # Key Concepts
//!
//! - **Enforcement unit**: the `(student, category, year)` tuple. Approvals
//!   sharing a unit are serialized; everything else runs in parallel.
//! - **At-most-one transition**: re-reviewing a terminal record fails, and a
//!   lost commit race surfaces as [`ReviewError::Conflict`] for the caller to
//!   retry the whole `review` from scratch.
//! - **Atomicity**: a review performs exactly one store write; points and
//!   status land together or not at all.

mod error;
mod review;
mod unit;


pub use error::ReviewError;
pub use review::{ApprovalEngine, ReviewDecision, ReviewerInfo};
pub use unit::EnforcementUnit;
