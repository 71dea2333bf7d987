//! Block Module
//!
//! Blocks are the ordered, nestable content of a page.
//!
//! - `ordering`: rank placement and batch reorder
//! - `validator`: metadata checks against block type schemas
//! - `history`: snapshots and field deltas written on every change
//! - `db`: block storage through the live-only view
//! - `service`: the operations exposed to handlers

pub mod db;
pub mod handlers;
pub mod history;
pub mod ordering;
pub mod service;
pub mod validator;

pub use service::BlockService;
