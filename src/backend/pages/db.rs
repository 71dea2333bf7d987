//! Page storage. Reads go through `live_pages`, which also hides pages of
//! deleted workspaces.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::db::{json_map, json_text};
use crate::shared::{JsonMap, Page};

const PAGE_COLUMNS: &str =
    "id, workspace_id, parent_page_id, title, view_config, created_by, created_at, updated_at";

fn page_from_row(row: &SqliteRow) -> Result<Page, sqlx::Error> {
    Ok(Page {
        id: row.try_get("id")?,
        workspace_id: row.try_get("workspace_id")?,
        parent_page_id: row.try_get("parent_page_id")?,
        title: row.try_get("title")?,
        view_config: json_map(row, "view_config")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn insert_page<'e, E>(
    executor: E,
    workspace_id: Uuid,
    parent_page_id: Option<Uuid>,
    title: &str,
    view_config: JsonMap,
    created_by: Uuid,
) -> Result<Page, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO pages (id, workspace_id, parent_page_id, title, view_config, created_by, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
        "#,
    )
    .bind(id)
    .bind(workspace_id)
    .bind(parent_page_id)
    .bind(title)
    .bind(json_text(&view_config))
    .bind(created_by)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(Page {
        id,
        workspace_id,
        parent_page_id,
        title: title.to_string(),
        view_config,
        created_by,
        created_at: now,
        updated_at: now,
    })
}

pub async fn get_page(pool: &SqlitePool, id: Uuid) -> Result<Option<Page>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {} FROM live_pages WHERE id = ?1", PAGE_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(page_from_row).transpose()
}

pub async fn is_live(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM live_pages WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn list_by_workspace(pool: &SqlitePool, workspace_id: Uuid) -> Result<Vec<Page>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM live_pages WHERE workspace_id = ?1 ORDER BY created_at ASC, seq ASC",
        PAGE_COLUMNS
    ))
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(page_from_row).collect()
}

/// Live pages of a workspace on which the user holds any role
pub async fn list_granted_in_workspace(
    pool: &SqlitePool,
    workspace_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<Page>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.workspace_id, p.parent_page_id, p.title, p.view_config,
               p.created_by, p.created_at, p.updated_at
        FROM live_pages p
        JOIN share_permissions sp ON sp.page_id = p.id
        WHERE p.workspace_id = ?1 AND sp.user_id = ?2
        ORDER BY p.created_at ASC, p.seq ASC
        "#,
    )
    .bind(workspace_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(page_from_row).collect()
}

pub async fn list_children(pool: &SqlitePool, parent_page_id: Uuid) -> Result<Vec<Page>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM live_pages WHERE parent_page_id = ?1 ORDER BY created_at ASC, seq ASC",
        PAGE_COLUMNS
    ))
    .bind(parent_page_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(page_from_row).collect()
}

pub async fn update_page(
    pool: &SqlitePool,
    id: Uuid,
    title: &str,
    view_config: &JsonMap,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE pages
        SET title = ?2, view_config = ?3, updated_at = ?4
        WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(json_text(view_config))
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Soft delete a page and every live descendant page. Returns rows marked.
pub async fn soft_delete_subtree(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        WITH RECURSIVE subtree(id) AS (
            SELECT id FROM pages WHERE id = ?1
            UNION ALL
            SELECT p.id FROM pages p
            JOIN subtree s ON p.parent_page_id = s.id
            WHERE p.deleted_at IS NULL
        )
        UPDATE pages
        SET deleted_at = ?2, updated_at = ?2
        WHERE id IN (SELECT id FROM subtree) AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
