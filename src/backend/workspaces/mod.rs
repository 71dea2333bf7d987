//! Workspace Module
//!
//! Top-level containers for pages. A workspace has exactly one owner.

pub mod db;
pub mod handlers;
pub mod service;

pub use service::WorkspaceService;
