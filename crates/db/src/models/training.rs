//! Training entity model and DTOs.
//!
//! Lifecycle: a training is created `draft`, goes live via `published`, and
//! ends in the terminal `archived` state. Archiving is soft removal; the
//! row (and its assignments) stay queryable for analytics.

use learnbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "training_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "difficulty_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "content_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Video,
    Document,
    Link,
    Text,
}

/// A training row from the `trainings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Training {
    pub id: DbId,
    pub tenant_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub duration_minutes: i32,
    pub difficulty: DifficultyLevel,
    pub status: TrainingStatus,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new training. New trainings are always drafts.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTraining {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub description: Option<String>,
    pub objectives: Option<String>,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    /// Defaults to beginner if omitted.
    pub difficulty: Option<DifficultyLevel>,
    pub created_by: DbId,
}

/// DTO for updating a training. All fields are optional; status changes go
/// through the publish/archive operations instead.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTraining {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub objectives: Option<String>,
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    pub difficulty: Option<DifficultyLevel>,
}

/// An ordered content item under a training.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingContent {
    pub id: DbId,
    pub training_id: DbId,
    pub title: String,
    pub kind: ContentKind,
    pub body: Option<String>,
    pub url: Option<String>,
    pub order_index: i32,
    pub created_at: Timestamp,
}

/// DTO for appending a content item to a training.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrainingContent {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub kind: ContentKind,
    pub body: Option<String>,
    pub url: Option<String>,
    #[validate(range(min = 0))]
    pub order_index: i32,
}
