//! Database test fixtures
//!
//! Each test gets its own SQLite file in a fresh temporary directory, with
//! the schema applied and system block types seeded. The directory is
//! removed when the fixture is dropped.

use folio::backend::server::{build_state, AppState};
use folio::shared::AppConfig;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &str = "folio-test-secret";

pub struct TestDatabase {
    pub state: AppState,
    _dir: TempDir,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("folio.db").display());
        let config = AppConfig::builder()
            .database_url(url)
            .max_connections(4)
            .jwt_secret(TEST_JWT_SECRET)
            .build()
            .expect("Invalid test config");
        let state = build_state(config).await.expect("Failed to build test state");
        Self { state, _dir: dir }
    }
}
