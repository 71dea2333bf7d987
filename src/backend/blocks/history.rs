//! Block History
//!
//! Append-only side records written in the same transaction as the change
//! they describe:
//!
//! - `block_history`: the block as it was before the change, numbered per
//!   block from 1.
//! - `block_deltas`: the fields that changed, as `{field: {from, to}}`.

use chrono::Utc;
use serde_json::{json, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::db::{json_map, json_text};
use crate::shared::{Block, BlockDelta, BlockHistoryEntry, JsonMap};

pub const ACTOR_USER: &str = "user";

/// Why a snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotReason {
    Update,
    Move,
    Delete,
}

impl SnapshotReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotReason::Update => "update",
            SnapshotReason::Move => "move",
            SnapshotReason::Delete => "delete",
        }
    }
}

/// Field-level difference between two states of the same block
pub fn diff(before: &Block, after: &Block) -> JsonMap {
    let mut delta = JsonMap::new();
    let mut changed = |field: &str, from: Value, to: Value| {
        if from != to {
            delta.insert(field.to_string(), json!({ "from": from, "to": to }));
        }
    };
    changed("content", json!(before.content), json!(after.content));
    changed("type", json!(before.type_name), json!(after.type_name));
    changed(
        "metadata",
        Value::Object(before.metadata.clone()),
        Value::Object(after.metadata.clone()),
    );
    changed("rank", json!(before.rank), json!(after.rank));
    changed("parentBlockId", json!(before.parent_block_id), json!(after.parent_block_id));
    delta
}

async fn append_snapshot(
    conn: &mut SqliteConnection,
    before: &Block,
    reason: SnapshotReason,
    actor: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO block_history (id, block_id, version_number, content, metadata, rank,
                                   parent_block_id, snapshot_reason, created_by, created_at)
        VALUES (?1, ?2,
                (SELECT COALESCE(MAX(version_number), 0) + 1 FROM block_history WHERE block_id = ?2),
                ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(before.id)
    .bind(before.content.as_deref())
    .bind(json_text(&before.metadata))
    .bind(before.rank)
    .bind(before.parent_block_id)
    .bind(reason.as_str())
    .bind(actor)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn append_delta(
    conn: &mut SqliteConnection,
    block_id: Uuid,
    delta: &JsonMap,
    actor: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO block_deltas (id, block_id, delta, actor_type, actor_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(block_id)
    .bind(json_text(delta))
    .bind(ACTOR_USER)
    .bind(actor)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Record an update or move of `before` into `after`
pub async fn record_change(
    conn: &mut SqliteConnection,
    before: &Block,
    after: &Block,
    reason: SnapshotReason,
    actor: Uuid,
) -> Result<(), sqlx::Error> {
    append_snapshot(conn, before, reason, actor).await?;
    append_delta(conn, before.id, &diff(before, after), actor).await
}

/// Record the deletion of a block
pub async fn record_delete(conn: &mut SqliteConnection, before: &Block, actor: Uuid) -> Result<(), sqlx::Error> {
    append_snapshot(conn, before, SnapshotReason::Delete, actor).await?;
    let mut delta = JsonMap::new();
    delta.insert("deleted".to_string(), json!({ "from": false, "to": true }));
    append_delta(conn, before.id, &delta, actor).await
}

fn history_from_row(row: &SqliteRow) -> Result<BlockHistoryEntry, sqlx::Error> {
    Ok(BlockHistoryEntry {
        id: row.try_get("id")?,
        block_id: row.try_get("block_id")?,
        version_number: row.try_get("version_number")?,
        content: row.try_get("content")?,
        metadata: json_map(row, "metadata")?,
        rank: row.try_get("rank")?,
        parent_block_id: row.try_get("parent_block_id")?,
        snapshot_reason: row.try_get("snapshot_reason")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
    })
}

fn delta_from_row(row: &SqliteRow) -> Result<BlockDelta, sqlx::Error> {
    Ok(BlockDelta {
        id: row.try_get("id")?,
        block_id: row.try_get("block_id")?,
        delta: json_map(row, "delta")?,
        actor_type: row.try_get("actor_type")?,
        actor_id: row.try_get("actor_id")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn list_history(pool: &SqlitePool, block_id: Uuid) -> Result<Vec<BlockHistoryEntry>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, block_id, version_number, content, metadata, rank, parent_block_id,
               snapshot_reason, created_by, created_at
        FROM block_history
        WHERE block_id = ?1
        ORDER BY version_number ASC
        "#,
    )
    .bind(block_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(history_from_row).collect()
}

pub async fn list_deltas(pool: &SqlitePool, block_id: Uuid) -> Result<Vec<BlockDelta>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, block_id, delta, actor_type, actor_id, created_at
        FROM block_deltas
        WHERE block_id = ?1
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(block_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(delta_from_row).collect()
}
