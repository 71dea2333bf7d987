/**
 * Server Initialization
 *
 * This module builds the application from a loaded `AppConfig`.
 *
 * # Initialization Process
 *
 * 1. Connect the SQLite pool
 * 2. Apply the idempotent schema
 * 3. Seed the system block types
 * 4. Wire the services into `AppState`
 * 5. Create the router
 *
 * Any failure aborts startup; there is no degraded mode without storage.
 */

use axum::Router;

use crate::backend::db::apply_schema;
use crate::backend::error::{codes, BackendError};
use crate::backend::routes::create_router;
use crate::backend::server::config::connect_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Connect, migrate, seed and wire the services
pub async fn build_state(config: AppConfig) -> Result<AppState, BackendError> {
    config
        .validate()
        .map_err(|e| BackendError::internal_with(codes::INTERNAL_ERROR, "Invalid configuration", e))?;

    let pool = connect_database(&config.database).await?;
    apply_schema(&pool).await?;

    let state = AppState::new(pool, config);
    state.block_types.seed_system_types().await?;
    Ok(state)
}

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing Folio backend server");
    let state = build_state(config).await?;
    let app = create_router(state);
    tracing::info!("Router configured");
    Ok(app)
}
