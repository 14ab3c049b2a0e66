//! Pure aggregation math for the analytics engine.
//!
//! Every function here is deterministic over its inputs. Repositories fetch
//! raw counts and score rows; these helpers turn them into the shapes the
//! reporting endpoints return. Keeping the math out of SQL makes the
//! bucketing, rounding, and ordering rules unit-testable without a database.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Completion rate
// ---------------------------------------------------------------------------

/// Completion rate as a whole percentage, rounded half-up.
///
/// An empty population yields 0 rather than a division error.
pub fn completion_rate(completed: i64, assigned: i64) -> i64 {
    let denominator = assigned.max(1);
    (100.0 * completed as f64 / denominator as f64).round() as i64
}

// ---------------------------------------------------------------------------
// Score distribution
// ---------------------------------------------------------------------------

/// One inclusive score band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub low: f64,
    pub high: f64,
}

impl ScoreBucket {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Both endpoints are inclusive. Shared boundaries between adjacent
    /// buckets are settled by first-match order in [`score_distribution`].
    pub fn contains(&self, score: f64) -> bool {
        score >= self.low && score <= self.high
    }

    /// Range label, e.g. `"80-100"`. Whole-number endpoints print without a
    /// fractional part.
    pub fn label(&self) -> String {
        fn fmt(v: f64) -> String {
            if v.fract() == 0.0 {
                format!("{}", v as i64)
            } else {
                format!("{v}")
            }
        }
        format!("{}-{}", fmt(self.low), fmt(self.high))
    }
}

/// The five standard reporting bands.
pub fn default_score_buckets() -> Vec<ScoreBucket> {
    vec![
        ScoreBucket::new(0.0, 20.0),
        ScoreBucket::new(20.0, 40.0),
        ScoreBucket::new(40.0, 60.0),
        ScoreBucket::new(60.0, 80.0),
        ScoreBucket::new(80.0, 100.0),
    ]
}

/// Count scores into buckets. Each score lands in the first bucket that
/// contains it; scores outside every bucket are dropped.
pub fn score_distribution(scores: &[f64], buckets: &[ScoreBucket]) -> Vec<i64> {
    let mut counts = vec![0i64; buckets.len()];
    for &score in scores {
        if let Some(idx) = buckets.iter().position(|b| b.contains(score)) {
            counts[idx] += 1;
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Monthly trend
// ---------------------------------------------------------------------------

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Month containing `ts`.
    pub fn of(ts: Timestamp) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First instant of the month, UTC. `None` only for an out-of-range key
    /// (month 0 or 13+), which [`MonthKey::of`] never produces.
    pub fn start(self) -> Option<Timestamp> {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// `"YYYY-MM"` with a zero-padded month.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// The last `month_count` calendar months ending at the month containing
/// `now`, oldest first. A zero count yields an empty spine.
pub fn month_spine(now: Timestamp, month_count: u32) -> Vec<MonthKey> {
    let mut months = Vec::with_capacity(month_count as usize);
    let mut cursor = MonthKey::of(now);
    for _ in 0..month_count {
        months.push(cursor);
        cursor = cursor.previous();
    }
    months.reverse();
    months
}

/// One month of assignment activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// `"YYYY-MM"`.
    pub month: String,
    pub assigned_count: i64,
    pub completed_count: i64,
}

/// Join per-month counts onto a spine, zero-filling months with no rows.
///
/// The output always has exactly one entry per spine month, in spine order,
/// so consumers see a gap-free series.
pub fn monthly_trend(
    spine: &[MonthKey],
    assigned: &BTreeMap<MonthKey, i64>,
    completed: &BTreeMap<MonthKey, i64>,
) -> Vec<MonthlyActivity> {
    spine
        .iter()
        .map(|key| MonthlyActivity {
            month: key.label(),
            assigned_count: assigned.get(key).copied().unwrap_or(0),
            completed_count: completed.get(key).copied().unwrap_or(0),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Department performance
// ---------------------------------------------------------------------------

/// Raw per-department figures as fetched from storage.
#[derive(Debug, Clone)]
pub struct DepartmentPerfInput {
    pub department_id: DbId,
    pub name: String,
    pub member_count: i64,
    pub assigned_count: i64,
    pub completed_count: i64,
    /// `None` when no member has a scored completion yet.
    pub average_score: Option<f64>,
}

/// One department's ranked performance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentPerformance {
    pub department_id: DbId,
    pub department_name: String,
    pub average_score: f64,
    pub completion_rate: i64,
    pub member_count: i64,
}

/// Rank departments by average score, best first.
///
/// Departments with no scored completions rank with an average of 0.0 and
/// stay in the result rather than disappearing from the report. Ties break
/// by name so the ordering is stable across runs.
pub fn department_performance(inputs: Vec<DepartmentPerfInput>) -> Vec<DepartmentPerformance> {
    let mut rows: Vec<DepartmentPerformance> = inputs
        .into_iter()
        .map(|input| DepartmentPerformance {
            department_id: input.department_id,
            department_name: input.name,
            average_score: input.average_score.unwrap_or(0.0),
            completion_rate: completion_rate(input.completed_count, input.assigned_count),
            member_count: input.member_count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.department_name.cmp(&b.department_name))
    });
    rows
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Clamp a caller-supplied row limit into `1..=max`, defaulting when absent
/// or non-positive.
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    match requested {
        Some(limit) if limit > 0 => limit.min(max),
        _ => default,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
