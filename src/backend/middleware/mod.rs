//! Middleware Module
//!
//! HTTP middleware applied by the router:
//!
//! - **`request_id`** - exposes the request id to the response envelope
//! - **`auth`** - bearer token verification, attaches the caller
//! - **`permission`** - page role checks ahead of page and block handlers

pub mod auth;
pub mod permission;
pub mod request_id;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use permission::{authorize_page_owner, authorize_page_path, authorize_page_payload};
pub use request_id::{current_request_id, request_context, REQUEST_ID_HEADER};
