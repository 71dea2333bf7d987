//! Sharing Module
//!
//! Per-page role grants (viewer, editor, owner) and the access checks built
//! on them.
//!
//! # Module Structure
//!
//! ```text
//! sharing/
//! ├── mod.rs       - Module exports and documentation
//! ├── access.rs    - AccessLevel and the tagged AccessCheck decision
//! ├── db.rs        - share_permissions storage
//! ├── service.rs   - SharingService
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod access;
pub mod db;
pub mod handlers;
pub mod service;

pub use access::{AccessCheck, AccessLevel};
pub use service::SharingService;
