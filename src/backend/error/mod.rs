//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used by services, middleware and HTTP handlers and can be
//! converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its constructors
//! ├── codes.rs      - Stable machine-readable error codes
//! └── conversion.rs - IntoResponse and extractor-rejection conversions
//! ```
//!
//! # Propagation
//!
//! Validation and not-found conditions are raised as close to the boundary
//! as possible. Storage errors convert through `From<sqlx::Error>` and surface
//! as `Internal` with code `DATABASE_ERROR`; the driver message stays in the
//! logs.

/// Error type definitions
pub mod types;

/// Error codes
pub mod codes;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;

/// Result alias used across the backend
pub type BackendResult<T> = Result<T, BackendError>;
