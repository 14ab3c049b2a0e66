//! Repository for the `departments` and `department_memberships` tables.

use learnbase_core::scope::TenantScope;
use learnbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::department::{
    CreateDepartment, Department, DepartmentMember, UpdateDepartment,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tenant_id, name, created_at, updated_at";

/// Provides CRUD and membership operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department under the given tenant.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateDepartment,
    ) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (tenant_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(tenant_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a department by ID within the given scope.
    pub async fn find_by_id(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM departments
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(scope.as_param())
            .fetch_optional(pool)
            .await
    }

    /// List departments in scope, by name.
    pub async fn list(pool: &PgPool, scope: TenantScope) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM departments
             WHERE ($1::BIGINT IS NULL OR tenant_id = $1)
             ORDER BY name"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(scope.as_param())
            .fetch_all(pool)
            .await
    }

    /// Rename a department. Returns `None` if no row is visible in scope.
    pub async fn update(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET name = COALESCE($3, name)
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(scope.as_param())
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a department. Memberships cascade.
    pub async fn delete(pool: &PgPool, scope: TenantScope, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM departments WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)",
        )
        .bind(id)
        .bind(scope.as_param())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a user to a department. Re-adding an existing member is a no-op;
    /// returns `true` only when a membership row was created.
    ///
    /// Callers verify both ids are in scope first (parent-check pattern).
    pub async fn add_member(
        pool: &PgPool,
        department_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO department_memberships (department_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_department_memberships_member DO NOTHING",
        )
        .bind(department_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a user from a department. Returns `true` if a membership was
    /// removed. Existing assignments are untouched.
    pub async fn remove_member(
        pool: &PgPool,
        department_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM department_memberships WHERE department_id = $1 AND user_id = $2",
        )
        .bind(department_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Current member user ids of a department: the point-in-time snapshot
    /// fan-out expands against. Later membership changes do not retroactively
    /// touch assignments.
    pub async fn member_user_ids(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT user_id FROM department_memberships WHERE department_id = $1 ORDER BY user_id",
        )
        .bind(department_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// List members with user details for the membership endpoint.
    pub async fn list_members(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<DepartmentMember>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentMember>(
            "SELECT u.id AS user_id, u.display_name, u.email, dm.added_at
             FROM department_memberships dm
             JOIN users u ON u.id = dm.user_id
             WHERE dm.department_id = $1
             ORDER BY u.display_name, u.id",
        )
        .bind(department_id)
        .fetch_all(pool)
        .await
    }
}
