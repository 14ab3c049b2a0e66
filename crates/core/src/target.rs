//! Assignment target vocabulary.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// What an assignment request points at: a single user or a whole
/// department (expanded to its members at fan-out time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    User,
    Department,
}

/// One requested assignment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    pub id: DbId,
}

impl Target {
    pub fn user(id: DbId) -> Self {
        Self {
            kind: TargetKind::User,
            id,
        }
    }

    pub fn department(id: DbId) -> Self {
        Self {
            kind: TargetKind::Department,
            id,
        }
    }
}
