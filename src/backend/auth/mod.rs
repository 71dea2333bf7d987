//! Authentication Module
//!
//! Callers are identified by a bearer JWT whose `sub` claim is their user id.
//! Password handling, token issuance and OAuth flows belong to the identity
//! provider and are not part of this server.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! └── sessions.rs     - JWT creation and verification
//! ```

/// JWT token generation and validation
pub mod sessions;

pub use sessions::{create_token, verify_token, Claims};
