//! Domain Models
//!
//! Serializable entities and request/response DTOs for the REST surface.
//! Every type here is storage-agnostic; the backend maps rows into them.
//!
//! # Wire Format
//!
//! Entity fields are camelCase (`pageId`, `parentBlockId`, `viewConfig`)
//! while timestamps keep `created_at` / `updated_at`. Sharing payloads use
//! snake_case (`user_id`, `page_id`).

/// Workspaces: the top-level container owned by one user
pub mod workspace;

/// Pages and the page tree
pub mod page;

/// Blocks, block history and block deltas
pub mod block;

/// Block type catalog entries
pub mod block_type;

/// Roles and page share permissions
pub mod sharing;

/// Limit/offset pagination
pub mod pagination;

/// Schemaless JSON object used for metadata and view configuration
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

pub use block::{
    Block, BlockDelta, BlockHistoryEntry, BlockListResponse, BlockResponse, CreateBlockRequest,
    ReorderBlocksRequest, UpdateBlockRequest,
};
pub use block_type::{BlockType, CreateBlockTypeRequest};
pub use page::{CreatePageRequest, Page, PageTreeNode, UpdatePageRequest};
pub use pagination::{PageWindow, PaginationMeta, PaginationParams};
pub use sharing::{GrantAccessRequest, Role, SharePermission};
pub use workspace::{CreateWorkspaceRequest, UpdateWorkspaceRequest, Workspace};
