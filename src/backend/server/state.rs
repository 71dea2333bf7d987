/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is built once in `init::build_state` and cloned into every
 * request. It holds:
 * - The SQLite connection pool
 * - The loaded configuration
 * - One service per entity family, each holding its own pool handle
 *
 * Nothing here is a global: tests build as many independent states as they
 * need, each over its own database.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers take just the service they
 * use, e.g. `State(blocks): State<BlockService>`, while middleware that
 * needs several services takes `State<AppState>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::block_types::BlockTypeRegistry;
use crate::backend::blocks::BlockService;
use crate::backend::pages::PageService;
use crate::backend::sharing::SharingService;
use crate::backend::workspaces::WorkspaceService;
use crate::shared::AppConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Connection pool; services hold their own clones
    pub db_pool: SqlitePool,

    /// Configuration the server was started with
    pub config: Arc<AppConfig>,

    pub workspaces: WorkspaceService,
    pub pages: PageService,
    pub blocks: BlockService,
    pub block_types: BlockTypeRegistry,
    pub sharing: SharingService,
}

impl AppState {
    /// Wire every service over one pool
    pub fn new(db_pool: SqlitePool, config: AppConfig) -> Self {
        let sharing = SharingService::new(db_pool.clone());
        let workspaces = WorkspaceService::new(db_pool.clone());
        let pages = PageService::new(db_pool.clone(), workspaces.clone(), sharing.clone());
        let block_types = BlockTypeRegistry::new(db_pool.clone());
        let blocks = BlockService::new(db_pool.clone(), block_types.clone(), config.pagination);

        Self {
            db_pool,
            config: Arc::new(config),
            workspaces,
            pages,
            blocks,
            block_types,
            sharing,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for WorkspaceService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.workspaces.clone()
    }
}

impl FromRef<AppState> for PageService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pages.clone()
    }
}

impl FromRef<AppState> for BlockService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.blocks.clone()
    }
}

impl FromRef<AppState> for BlockTypeRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.block_types.clone()
    }
}

impl FromRef<AppState> for SharingService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sharing.clone()
    }
}
