//! Folio - Main Library
//!
//! Folio is the backend of a Notion-style document editor: workspaces hold
//! pages, pages hold ordered and nestable content blocks, and pages are
//! shared with other users under viewer, editor or owner roles.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the server and its clients
//!   - Workspace, page, block, block type and sharing DTOs
//!   - Pagination and configuration
//!   - Input validation errors
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and middleware
//!   - SQLite persistence through sqlx
//!   - Block ordering, metadata validation and page authorization
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend modules and the
//!   `folio-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio::backend::server::create_app;
//! use folio::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::load()?).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for input problems detectable without storage
//! - `backend::BackendError` for everything a request can fail with; each
//!   variant maps to one HTTP status and carries a stable code

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
