//! Backend Module
//!
//! Server-side code, compiled with the `ssr` feature.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── server/       - AppState, pool construction, app creation
//! ├── routes/       - Route groups and the middleware stack
//! ├── middleware/   - Request id, authentication, page permissions
//! ├── error/        - BackendError, codes, response conversion
//! ├── response.rs   - JSON envelope
//! ├── extract.rs    - Extractors that reject with BackendError
//! ├── db/           - Schema and row helpers
//! ├── auth/         - JWT verification
//! ├── workspaces/   - Workspace CRUD
//! ├── pages/        - Pages and the page tree
//! ├── blocks/       - Blocks, ordering, metadata validation, history
//! ├── block_types/  - Block type registry
//! └── sharing/      - Page role grants and access checks
//! ```
//!
//! # Request Flow
//!
//! Handler → service → store. Page-scoped routes pass through the
//! permission middleware first, which consults the sharing service; a
//! denied check never reaches the handler.

pub mod server;

pub mod routes;

pub mod db;

pub mod error;

pub mod response;

pub mod extract;

pub mod auth;

pub mod middleware;

pub mod workspaces;

pub mod pages;

pub mod blocks;

pub mod block_types;

pub mod sharing;

pub use error::BackendError;
pub use server::create_app;
