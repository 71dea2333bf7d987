//! Block Type Module
//!
//! The catalog of block kinds and their metadata contracts.

pub mod db;
pub mod handlers;
pub mod registry;
pub mod seed;

pub use registry::BlockTypeRegistry;
