//! Database Module
//!
//! Schema management and small row helpers shared by every store.
//!
//! # Live-only Views
//!
//! Soft-deleted rows are filtered once, in the `live_*` views defined in
//! `schema.sql`. Store functions read through the views and write to the
//! base tables, so no read path needs its own `deleted_at IS NULL` check.
//!
//! | View | Row is live when |
//! |------|------------------|
//! | `live_workspaces` | workspace not deleted |
//! | `live_pages` | page and its workspace not deleted |
//! | `live_blocks` | block not deleted and its page live |
//! | `live_block_types` | type not deleted |

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::shared::JsonMap;

/// Idempotent DDL for every table and view
pub const SCHEMA: &str = include_str!("schema.sql");

/// Open a write transaction that takes the database write lock up front.
///
/// A deferred `BEGIN` that reads before writing cannot upgrade its lock
/// once another writer has committed under WAL, and fails with
/// `SQLITE_BUSY` instead of waiting on `busy_timeout`.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Apply the schema to a pool
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Applying database schema...");
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

/// Decode a TEXT column holding a JSON object
pub fn json_map(row: &SqliteRow, column: &str) -> Result<JsonMap, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(JsonMap::new()),
        Ok(other) => Err(sqlx::Error::Decode(
            format!("column {} holds {} instead of a JSON object", column, other).into(),
        )),
        Err(e) => Err(sqlx::Error::Decode(Box::new(e))),
    }
}

/// Encode a JSON object for a TEXT column
pub fn json_text(map: &JsonMap) -> String {
    Value::Object(map.clone()).to_string()
}

/// True when the error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
