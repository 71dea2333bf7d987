//! Limit/Offset Pagination
//!
//! A limit that is missing, non-positive or above the configured maximum
//! falls back to the default limit. A negative offset is treated as zero.

use serde::{Deserialize, Serialize};

use crate::shared::config::PaginationSettings;

/// Raw query parameters (`?limit=&offset=`)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Normalized limit and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PaginationParams {
    pub fn window(&self, settings: &PaginationSettings) -> PageWindow {
        let limit = match self.limit {
            Some(l) if l > 0 && l <= settings.max_limit => l,
            _ => settings.default_limit,
        };
        PageWindow {
            limit,
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(window: PageWindow, total: i64) -> Self {
        Self {
            total,
            limit: window.limit,
            offset: window.offset,
            has_more: window.offset.saturating_add(window.limit) < total,
        }
    }
}
