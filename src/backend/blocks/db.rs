//! Block storage. Reads go through `live_blocks`, which resolves the type
//! name and hides blocks of deleted pages.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::db::{json_map, json_text};
use crate::shared::{Block, JsonMap, PageWindow};

const BLOCK_COLUMNS: &str =
    "id, page_id, parent_block_id, type_id, type_name, content, metadata, rank, created_at, updated_at";

/// Stable list order for siblings and pages of blocks
const BLOCK_ORDER: &str = "ORDER BY rank ASC, created_at ASC, seq ASC";

fn block_from_row(row: &SqliteRow) -> Result<Block, sqlx::Error> {
    Ok(Block {
        id: row.try_get("id")?,
        page_id: row.try_get("page_id")?,
        parent_block_id: row.try_get("parent_block_id")?,
        type_id: row.try_get("type_id")?,
        type_name: row.try_get("type_name")?,
        content: row.try_get("content")?,
        metadata: json_map(row, "metadata")?,
        rank: row.try_get("rank")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Which blocks of a page a list covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockScope {
    /// Every live block of the page, flat
    Page(Uuid),
    /// Direct children of one block on the page
    Children { page_id: Uuid, parent_block_id: Uuid },
}

pub struct NewBlock<'a> {
    pub page_id: Uuid,
    pub parent_block_id: Option<Uuid>,
    pub type_id: Uuid,
    pub content: Option<&'a str>,
    pub metadata: &'a JsonMap,
    pub rank: i64,
}

pub async fn insert_block<'e, E>(executor: E, new: &NewBlock<'_>) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO blocks (id, page_id, parent_block_id, type_id, content, metadata, rank, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
        "#,
    )
    .bind(id)
    .bind(new.page_id)
    .bind(new.parent_block_id)
    .bind(new.type_id)
    .bind(new.content)
    .bind(json_text(new.metadata))
    .bind(new.rank)
    .bind(Utc::now())
    .execute(executor)
    .await?;
    Ok(id)
}

pub async fn get_block<'e, E>(executor: E, id: Uuid) -> Result<Option<Block>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(&format!("SELECT {} FROM live_blocks WHERE id = ?1", BLOCK_COLUMNS))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    row.as_ref().map(block_from_row).transpose()
}

/// Page of a live block
pub async fn page_of(pool: &SqlitePool, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT page_id FROM live_blocks WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Overwrite every mutable column with the values in `block`
pub async fn write_block<'e, E>(executor: E, block: &Block) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        UPDATE blocks
        SET parent_block_id = ?2, type_id = ?3, content = ?4, metadata = ?5, rank = ?6, updated_at = ?7
        WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(block.id)
    .bind(block.parent_block_id)
    .bind(block.type_id)
    .bind(block.content.as_deref())
    .bind(json_text(&block.metadata))
    .bind(block.rank)
    .bind(block.updated_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// True when `candidate` is `block_id` or lies below it. Moving `block_id`
/// under such a candidate would create a cycle.
pub async fn is_self_or_descendant(
    conn: &mut SqliteConnection,
    block_id: Uuid,
    candidate: Uuid,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar(
        r#"
        WITH RECURSIVE ancestors(id) AS (
            SELECT ?1
            UNION
            SELECT b.parent_block_id FROM blocks b
            JOIN ancestors a ON b.id = a.id
            WHERE b.parent_block_id IS NOT NULL
        )
        SELECT 1 FROM ancestors WHERE id = ?2
        "#,
    )
    .bind(candidate)
    .bind(block_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(found.is_some())
}

/// A live block and every live descendant, the root first
pub async fn subtree_ids(conn: &mut SqliteConnection, id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        WITH RECURSIVE subtree(id, depth) AS (
            SELECT id, 0 FROM blocks WHERE id = ?1 AND deleted_at IS NULL
            UNION ALL
            SELECT b.id, s.depth + 1 FROM blocks b
            JOIN subtree s ON b.parent_block_id = s.id
            WHERE b.deleted_at IS NULL
        )
        SELECT id FROM subtree ORDER BY depth ASC
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
}

pub async fn mark_deleted(conn: &mut SqliteConnection, ids: &[Uuid]) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    for id in ids {
        sqlx::query("UPDATE blocks SET deleted_at = ?2, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL")
            .bind(id)
            .bind(now)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Ids from `ids` that are live blocks of `page_id`
pub async fn filter_on_page(
    conn: &mut SqliteConnection,
    page_id: Uuid,
    ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut found = Vec::with_capacity(ids.len());
    for id in ids {
        let hit: Option<i64> = sqlx::query_scalar("SELECT 1 FROM live_blocks WHERE id = ?1 AND page_id = ?2")
            .bind(id)
            .bind(page_id)
            .fetch_optional(&mut *conn)
            .await?;
        if hit.is_some() {
            found.push(*id);
        }
    }
    Ok(found)
}

/// One window of blocks in list order, plus the total under the same filter
pub async fn list_blocks(
    pool: &SqlitePool,
    scope: BlockScope,
    window: PageWindow,
) -> Result<(Vec<Block>, i64), sqlx::Error> {
    let (page_id, parent_block_id) = match scope {
        BlockScope::Page(page_id) => (page_id, None),
        BlockScope::Children {
            page_id,
            parent_block_id,
        } => (page_id, Some(parent_block_id)),
    };
    let filter = "page_id = ?1 AND (?2 IS NULL OR parent_block_id = ?2)";

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM live_blocks WHERE {}", filter))
        .bind(page_id)
        .bind(parent_block_id)
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query(&format!(
        "SELECT {} FROM live_blocks WHERE {} {} LIMIT ?3 OFFSET ?4",
        BLOCK_COLUMNS, filter, BLOCK_ORDER
    ))
    .bind(page_id)
    .bind(parent_block_id)
    .bind(window.limit)
    .bind(window.offset)
    .fetch_all(pool)
    .await?;

    let blocks = rows.iter().map(block_from_row).collect::<Result<Vec<_>, _>>()?;
    Ok((blocks, total))
}
