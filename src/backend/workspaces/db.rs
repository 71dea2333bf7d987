//! Workspace storage. Reads go through `live_workspaces`.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::shared::Workspace;

fn workspace_from_row(row: &SqliteRow) -> Result<Workspace, sqlx::Error> {
    Ok(Workspace {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        owner_id: row.try_get("owner_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn insert_workspace(
    pool: &SqlitePool,
    owner_id: Uuid,
    name: &str,
    description: Option<&str>,
) -> Result<Workspace, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO workspaces (id, name, description, owner_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(owner_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Workspace {
        id,
        name: name.to_string(),
        description: description.map(|d| d.to_string()),
        owner_id,
        created_at: now,
        updated_at: now,
    })
}

pub async fn get_workspace(pool: &SqlitePool, id: Uuid) -> Result<Option<Workspace>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT id, name, description, owner_id, created_at, updated_at FROM live_workspaces WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(workspace_from_row).transpose()
}

pub async fn list_by_owner(pool: &SqlitePool, owner_id: Uuid) -> Result<Vec<Workspace>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, description, owner_id, created_at, updated_at
        FROM live_workspaces
        WHERE owner_id = ?1
        ORDER BY created_at ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(workspace_from_row).collect()
}

/// Write name and description; returns false when the workspace is not live
pub async fn update_workspace(
    pool: &SqlitePool,
    id: Uuid,
    name: &str,
    description: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE workspaces
        SET name = ?2, description = ?3, updated_at = ?4
        WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Soft delete. Pages and blocks of the workspace drop out of the live views.
pub async fn soft_delete_workspace(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        "UPDATE workspaces SET deleted_at = ?2, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
    )
    .bind(id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
