//! Share permission storage.
//!
//! At most one row exists per (page, user); `upsert_permission` relies on the
//! UNIQUE(page_id, user_id) constraint to update in place.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::shared::{Role, SharePermission};

fn permission_from_row(row: &SqliteRow) -> Result<SharePermission, sqlx::Error> {
    let role: String = row.try_get("role")?;
    Ok(SharePermission {
        id: row.try_get("id")?,
        page_id: row.try_get("page_id")?,
        user_id: row.try_get("user_id")?,
        role: role.parse::<Role>().map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Create the grant or replace the role of an existing one
pub async fn upsert_permission<'e, E>(
    executor: E,
    page_id: Uuid,
    user_id: Uuid,
    role: Role,
) -> Result<SharePermission, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();
    let row = sqlx::query(
        r#"
        INSERT INTO share_permissions (id, page_id, user_id, role, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        ON CONFLICT (page_id, user_id)
        DO UPDATE SET role = excluded.role, updated_at = excluded.updated_at
        RETURNING id, page_id, user_id, role, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(page_id)
    .bind(user_id)
    .bind(role.as_str())
    .bind(now)
    .fetch_one(executor)
    .await?;

    permission_from_row(&row)
}

/// Delete the grant; returns whether a row existed
pub async fn delete_permission(pool: &SqlitePool, page_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM share_permissions WHERE page_id = ?1 AND user_id = ?2")
        .bind(page_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Role held by the user on a live page
pub async fn find_role(pool: &SqlitePool, page_id: Uuid, user_id: Uuid) -> Result<Option<Role>, sqlx::Error> {
    let role: Option<String> = sqlx::query_scalar(
        r#"
        SELECT sp.role
        FROM share_permissions sp
        JOIN live_pages p ON p.id = sp.page_id
        WHERE sp.page_id = ?1 AND sp.user_id = ?2
        "#,
    )
    .bind(page_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    role.map(|r| r.parse::<Role>().map_err(|e| sqlx::Error::Decode(Box::new(e))))
        .transpose()
}

/// All grants on a page, oldest first
pub async fn list_for_page(pool: &SqlitePool, page_id: Uuid) -> Result<Vec<SharePermission>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, page_id, user_id, role, created_at, updated_at
        FROM share_permissions
        WHERE page_id = ?1
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(page_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(permission_from_row).collect()
}

/// All grants held by a user on live pages, oldest first
pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<SharePermission>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT sp.id, sp.page_id, sp.user_id, sp.role, sp.created_at, sp.updated_at
        FROM share_permissions sp
        JOIN live_pages p ON p.id = sp.page_id
        WHERE sp.user_id = ?1
        ORDER BY sp.created_at ASC, sp.rowid ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(permission_from_row).collect()
}

/// Number of grant rows for a (page, user) pair
pub async fn count_for_pair(pool: &SqlitePool, page_id: Uuid, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM share_permissions WHERE page_id = ?1 AND user_id = ?2")
        .bind(page_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
}
