//! Block type HTTP handlers. Any authenticated user may read or extend the
//! catalog.

use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;

use super::BlockTypeRegistry;
use crate::backend::error::BackendResult;
use crate::backend::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::response::{created, ok};
use crate::shared::CreateBlockTypeRequest;

#[derive(Debug, Default, Deserialize)]
pub struct BlockTypeFilter {
    pub category: Option<String>,
}

/// `GET /api/block-types`
pub async fn list_block_types(
    State(registry): State<BlockTypeRegistry>,
    ApiQuery(filter): ApiQuery<BlockTypeFilter>,
) -> BackendResult<Response> {
    let types = registry.list(filter.category.as_deref()).await?;
    Ok(ok("Block types retrieved", types))
}

/// `POST /api/block-types`
pub async fn create_block_type(
    State(registry): State<BlockTypeRegistry>,
    ApiJson(request): ApiJson<CreateBlockTypeRequest>,
) -> BackendResult<Response> {
    let block_type = registry.create(request).await?;
    Ok(created("Block type created successfully", block_type))
}

/// `GET /api/block-types/{name}`
pub async fn get_block_type(
    State(registry): State<BlockTypeRegistry>,
    ApiPath(name): ApiPath<String>,
) -> BackendResult<Response> {
    let block_type = registry.get(&name).await?;
    Ok(ok("Block type retrieved", block_type))
}

/// `DELETE /api/block-types/{name}`
pub async fn delete_block_type(
    State(registry): State<BlockTypeRegistry>,
    ApiPath(name): ApiPath<String>,
) -> BackendResult<Response> {
    registry.delete(&name).await?;
    Ok(ok("Block type deleted successfully", serde_json::json!({ "name": name })))
}
