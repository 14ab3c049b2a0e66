//! Fan-out expansion planning.
//!
//! Pure half of assignment fan-out: given the per-target resolution results
//! (which users exist, which departments exist and who their members were at
//! this instant), produce the deduplicated user set to insert and the list
//! of targets that could not be resolved. The storage half — the single
//! conflict-ignoring bulk insert — lives in `learnbase-db`.

use std::collections::BTreeSet;

use crate::target::Target;
use crate::types::DbId;

/// Resolution outcome for one requested target.
#[derive(Debug, Clone)]
pub enum ResolvedTarget {
    /// A directly targeted user. `known` is false when no such user is
    /// visible in the caller's scope.
    User { id: DbId, known: bool },
    /// A targeted department. `members` is `None` when the department is not
    /// visible in the caller's scope; a visible department with no members
    /// resolves to `Some(vec![])` and simply contributes zero rows.
    Department {
        id: DbId,
        members: Option<Vec<DbId>>,
    },
}

/// The plan produced by [`expand_targets`].
#[derive(Debug, Clone, Default)]
pub struct ExpansionPlan {
    /// Deduplicated union of direct users and department members, in
    /// ascending id order (deterministic insert order).
    pub users: BTreeSet<DbId>,
    /// Targets that could not be resolved, in request order. Reported to the
    /// caller; never a hard failure.
    pub skipped: Vec<Target>,
}

/// Expand resolved targets into a deduplicated user set.
///
/// A user who is both directly targeted and a member of a targeted
/// department appears once. Unknown targets are collected into `skipped`.
pub fn expand_targets<I>(resolved: I) -> ExpansionPlan
where
    I: IntoIterator<Item = ResolvedTarget>,
{
    let mut plan = ExpansionPlan::default();
    for target in resolved {
        match target {
            ResolvedTarget::User { id, known: true } => {
                plan.users.insert(id);
            }
            ResolvedTarget::User { id, known: false } => {
                plan.skipped.push(Target::user(id));
            }
            ResolvedTarget::Department {
                members: Some(members),
                ..
            } => {
                plan.users.extend(members);
            }
            ResolvedTarget::Department { id, members: None } => {
                plan.skipped.push(Target::department(id));
            }
        }
    }
    plan
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::TargetKind;

    #[test]
    fn empty_resolution_is_empty_plan() {
        let plan = expand_targets(std::iter::empty());
        assert!(plan.users.is_empty());
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn direct_member_of_targeted_department_is_deduplicated() {
        // Department with members {3, 5, 8}, plus user 5 targeted directly:
        // the union is exactly the three members, 5 counted once.
        let plan = expand_targets(vec![
            ResolvedTarget::Department {
                id: 1,
                members: Some(vec![3, 5, 8]),
            },
            ResolvedTarget::User { id: 5, known: true },
        ]);
        assert_eq!(plan.users.iter().copied().collect::<Vec<_>>(), vec![3, 5, 8]);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn overlapping_departments_union_once() {
        let plan = expand_targets(vec![
            ResolvedTarget::Department {
                id: 1,
                members: Some(vec![1, 2]),
            },
            ResolvedTarget::Department {
                id: 2,
                members: Some(vec![2, 3]),
            },
        ]);
        assert_eq!(plan.users.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn empty_department_contributes_nothing_and_is_not_skipped() {
        let plan = expand_targets(vec![ResolvedTarget::Department {
            id: 4,
            members: Some(vec![]),
        }]);
        assert!(plan.users.is_empty());
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn unknown_targets_are_skipped_not_fatal() {
        let plan = expand_targets(vec![
            ResolvedTarget::User {
                id: 99,
                known: false,
            },
            ResolvedTarget::Department {
                id: 42,
                members: None,
            },
            ResolvedTarget::User { id: 7, known: true },
        ]);
        assert_eq!(plan.users.iter().copied().collect::<Vec<_>>(), vec![7]);
        assert_eq!(plan.skipped.len(), 2);
        assert_eq!(plan.skipped[0].kind, TargetKind::User);
        assert_eq!(plan.skipped[0].id, 99);
        assert_eq!(plan.skipped[1].kind, TargetKind::Department);
        assert_eq!(plan.skipped[1].id, 42);
    }

    #[test]
    fn user_order_is_ascending_regardless_of_input_order() {
        let plan = expand_targets(vec![
            ResolvedTarget::User { id: 9, known: true },
            ResolvedTarget::Department {
                id: 1,
                members: Some(vec![4, 2]),
            },
        ]);
        assert_eq!(plan.users.iter().copied().collect::<Vec<_>>(), vec![2, 4, 9]);
    }
}
