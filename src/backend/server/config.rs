/**
 * Database Connection
 *
 * Builds the SQLite pool from `DatabaseSettings`.
 *
 * # File databases
 *
 * - Created if missing
 * - WAL journal, so readers are not blocked by the single writer
 * - A busy timeout instead of immediate `SQLITE_BUSY` under write contention
 *
 * # In-memory databases
 *
 * Every connection to `sqlite::memory:` opens a fresh, empty database, so
 * the pool is pinned to one connection that is never recycled.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::shared::config::DatabaseSettings;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Open the pool described by `settings`
pub async fn connect_database(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = is_in_memory(&settings.url);
    let mut options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    tracing::info!(url = %settings.url, in_memory, "Connecting to database...");
    let pool = pool_options.connect_with(options).await?;
    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}
