//! Repository for the `users` table.

use learnbase_core::scope::TenantScope;
use learnbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tenant_id, display_name, email, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user under the given tenant, returning the created row.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (tenant_id, display_name, email)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(tenant_id)
            .bind(&input.display_name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID within the given scope.
    pub async fn find_by_id(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(scope.as_param())
            .fetch_optional(pool)
            .await
    }

    /// List users in scope, newest first.
    pub async fn list(
        pool: &PgPool,
        scope: TenantScope,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::BIGINT IS NULL OR tenant_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(scope.as_param())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row is visible in scope.
    pub async fn update(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                display_name = COALESCE($3, display_name),
                email = COALESCE($4, email)
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(scope.as_param())
            .bind(&input.display_name)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, scope: TenantScope, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM users WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)")
                .bind(id)
                .bind(scope.as_param())
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Of the given ids, return those that exist in scope. One round trip;
    /// used to validate direct fan-out targets.
    pub async fn filter_existing(
        pool: &PgPool,
        scope: TenantScope,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM users
             WHERE id = ANY($1) AND ($2::BIGINT IS NULL OR tenant_id = $2)",
        )
        .bind(ids)
        .bind(scope.as_param())
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
