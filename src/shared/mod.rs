//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types are used for serialization on the
//! REST boundary and carry the input checks that need no storage access.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All types are designed for serialization
//! and transmission over HTTP.

/// Domain entities and request/response DTOs
pub mod models;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use models::*;
