//! Page Module
//!
//! Pages within workspaces, the page hierarchy and cascading soft delete.

pub mod db;
pub mod handlers;
pub mod service;

pub use service::PageService;
