//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Middleware stack, fallback, final router
//! └── api_routes.rs   - `/api` routes grouped by authorization gate
//! ```
//!
//! # Route Types
//!
//! - **Workspaces** - `/api/workspaces`, owner only
//! - **Pages** - `/api/pages`, role on the page by method
//! - **Blocks** - `/api/blocks` and `/api/pages/{page_id}/blocks`
//! - **Sharing** - `/api/pages/{page_id}/share`, owner only
//! - **Block types** - `/api/block-types`, any authenticated caller

/// Main router creation
pub mod router;

/// API route groups
pub mod api_routes;

// Re-export commonly used functions
#[cfg(feature = "ssr")]
pub use router::create_router;
