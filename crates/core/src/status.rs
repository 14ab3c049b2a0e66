//! Assignment progress status derivation.
//!
//! The three-way progress status is never stored; it is a pure function of
//! the assignment's completion and progress markers. This module is the
//! single source of truth for that classification — no other code path
//! (Rust or SQL) may re-derive it. The original system computed it inline
//! in a dozen places and the copies drifted.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Derived progress state of one user's assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    /// Stable string form used in JSON payloads and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Derive the progress status from an assignment's stored markers.
///
/// `completed` iff `completed_at` is set; otherwise `in_progress` iff the
/// external progress marker (`started_at`) is set; otherwise `pending`.
/// Absence of data is always `pending`, never `in_progress` — in-progress
/// requires a genuine per-row signal, not a subtraction of counts.
pub fn derive_status(
    completed_at: Option<Timestamp>,
    started_at: Option<Timestamp>,
) -> AssignmentStatus {
    if completed_at.is_some() {
        AssignmentStatus::Completed
    } else if started_at.is_some() {
        AssignmentStatus::InProgress
    } else {
        AssignmentStatus::Pending
    }
}

/// Per-status totals for a set of assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
}

impl StatusCounts {
    /// Tally marker pairs through [`derive_status`]. Every row lands in
    /// exactly one counter.
    pub fn tally<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Option<Timestamp>, Option<Timestamp>)>,
    {
        let mut counts = Self::default();
        for (completed_at, started_at) in rows {
            match derive_status(completed_at, started_at) {
                AssignmentStatus::Pending => counts.pending += 1,
                AssignmentStatus::InProgress => counts.in_progress += 1,
                AssignmentStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    /// Total number of tallied assignments.
    pub fn assigned(&self) -> i64 {
        self.pending + self.in_progress + self.completed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
