//! Block type storage. Reads go through `live_block_types`.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::db::{json_map, json_text};
use crate::shared::{BlockType, JsonMap};

const TYPE_COLUMNS: &str = "id, name, category, display_name, description, icon, default_metadata, \
                            metadata_schema, is_system, is_framework, created_at, updated_at";

fn block_type_from_row(row: &SqliteRow) -> Result<BlockType, sqlx::Error> {
    Ok(BlockType {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        display_name: row.try_get("display_name")?,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        default_metadata: json_map(row, "default_metadata")?,
        metadata_schema: json_map(row, "metadata_schema")?,
        is_system: row.try_get("is_system")?,
        is_framework: row.try_get("is_framework")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Values for a new catalog row
pub struct NewBlockType<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub display_name: &'a str,
    pub description: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub default_metadata: &'a JsonMap,
    pub metadata_schema: &'a JsonMap,
    pub is_system: bool,
}

/// Insert a type; with `skip_existing` a name clash is silently ignored.
/// Returns whether a row was written.
pub async fn insert_block_type(
    pool: &SqlitePool,
    new: &NewBlockType<'_>,
    skip_existing: bool,
) -> Result<bool, sqlx::Error> {
    let verb = if skip_existing { "INSERT OR IGNORE" } else { "INSERT" };
    let now = Utc::now();
    let result = sqlx::query(&format!(
        r#"
        {} INTO block_types (id, name, category, display_name, description, icon,
                             default_metadata, metadata_schema, is_system, is_framework,
                             created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?10)
        "#,
        verb
    ))
    .bind(Uuid::new_v4())
    .bind(new.name)
    .bind(new.category)
    .bind(new.display_name)
    .bind(new.description)
    .bind(new.icon)
    .bind(json_text(new.default_metadata))
    .bind(json_text(new.metadata_schema))
    .bind(new.is_system)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn find_by_name<'e, E>(executor: E, name: &str) -> Result<Option<BlockType>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(&format!("SELECT {} FROM live_block_types WHERE name = ?1", TYPE_COLUMNS))
        .bind(name)
        .fetch_optional(executor)
        .await?;
    row.as_ref().map(block_type_from_row).transpose()
}

/// Lookup by id in the base table: blocks keep their type after it is retired
pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<BlockType>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(&format!("SELECT {} FROM block_types WHERE id = ?1", TYPE_COLUMNS))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    row.as_ref().map(block_type_from_row).transpose()
}

pub async fn list(pool: &SqlitePool, category: Option<&str>) -> Result<Vec<BlockType>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {} FROM live_block_types
        WHERE ?1 IS NULL OR category = ?1
        ORDER BY is_system DESC, category ASC, name ASC
        "#,
        TYPE_COLUMNS
    ))
    .bind(category)
    .fetch_all(pool)
    .await?;
    rows.iter().map(block_type_from_row).collect()
}

pub async fn soft_delete(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        "UPDATE block_types SET deleted_at = ?2, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
    )
    .bind(id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
