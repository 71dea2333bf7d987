//! Block Data Structures
//!
//! A block is the atomic content unit of a page. Siblings (blocks sharing a
//! page and a parent block) are ordered by `rank`, then creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{JsonMap, PaginationMeta};
use crate::shared::error::SharedError;

/// Stored block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    pub id: Uuid,
    pub page_id: Uuid,
    pub parent_block_id: Option<Uuid>,
    pub type_id: Option<Uuid>,
    /// Name of the referenced block type, resolved on read
    pub type_name: Option<String>,
    pub content: Option<String>,
    pub metadata: JsonMap,
    pub rank: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Block as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub id: Uuid,
    pub page_id: Uuid,
    pub parent_block_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub block_type: Option<String>,
    pub content: Option<String>,
    pub position: i64,
    pub rank: i64,
    pub block_config: JsonMap,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl From<Block> for BlockResponse {
    fn from(block: Block) -> Self {
        Self {
            id: block.id,
            page_id: block.page_id,
            parent_block_id: block.parent_block_id,
            block_type: block.type_name,
            content: block.content,
            position: block.rank,
            rank: block.rank,
            block_config: block.metadata,
            created_at: block.created_at,
            updated_at: block.updated_at,
        }
    }
}

/// One page of blocks plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockListResponse {
    pub blocks: Vec<BlockResponse>,
    pub pagination: PaginationMeta,
}

/// Request body for creating a block.
///
/// `pageId` is required on `POST /api/blocks` and ignored on
/// `POST /api/pages/{pageId}/blocks`, where the path wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockRequest {
    #[serde(default, alias = "page_id")]
    pub page_id: Option<Uuid>,
    #[serde(default, alias = "parent_block_id")]
    pub parent_block_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Target index among siblings; absent means append
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default, alias = "metadata")]
    pub block_config: Option<JsonMap>,
}

impl CreateBlockRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.block_type.trim().is_empty() {
            return Err(SharedError::validation("type", "type cannot be empty"));
        }
        validate_position(self.position)
    }
}

/// Partial update for a block. Absent fields are untouched.
///
/// `parentBlockId` distinguishes "absent" (stay under the current parent)
/// from an explicit `null` (move to the page root).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlockRequest {
    #[serde(default, rename = "type")]
    pub block_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default, alias = "metadata")]
    pub block_config: Option<JsonMap>,
    #[serde(
        default,
        alias = "parent_block_id",
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_block_id: Option<Option<Uuid>>,
}

impl UpdateBlockRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(t) = &self.block_type {
            if t.trim().is_empty() {
                return Err(SharedError::validation("type", "type cannot be empty"));
            }
        }
        validate_position(self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.block_type.is_none()
            && self.content.is_none()
            && self.position.is_none()
            && self.block_config.is_none()
            && self.parent_block_id.is_none()
    }
}

/// Request body for `POST /api/blocks/reorder`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBlocksRequest {
    #[serde(default, alias = "page_id")]
    pub page_id: Option<Uuid>,
    #[serde(alias = "block_ids")]
    pub block_ids: Vec<Uuid>,
}

/// Snapshot of a block taken before it was changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockHistoryEntry {
    pub id: Uuid,
    pub block_id: Uuid,
    pub version_number: i64,
    pub content: Option<String>,
    pub metadata: JsonMap,
    pub rank: i64,
    pub parent_block_id: Option<Uuid>,
    pub snapshot_reason: String,
    pub created_by: Uuid,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Field-level change record: `{"content": {"from": .., "to": ..}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockDelta {
    pub id: Uuid,
    pub block_id: Uuid,
    pub delta: JsonMap,
    pub actor_type: String,
    pub actor_id: Uuid,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

fn validate_position(position: Option<i64>) -> Result<(), SharedError> {
    match position {
        Some(p) if p < 0 => Err(SharedError::validation("position", "position cannot be negative")),
        _ => Ok(()),
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
