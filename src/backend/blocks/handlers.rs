//! Block HTTP Handlers
//!
//! Every route here sits behind the page permission middleware, which has
//! already resolved the target page (from the path, the owning block, or the
//! `pageId` field) and checked the caller's role.

use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use super::db::BlockScope;
use super::BlockService;
use crate::backend::error::{codes, BackendError, BackendResult};
use crate::backend::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::middleware::AuthUser;
use crate::backend::response::{created, ok};
use crate::shared::{BlockResponse, CreateBlockRequest, PaginationParams, ReorderBlocksRequest, UpdateBlockRequest};

/// `?pageId=&parentBlockId=&limit=&offset=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockListQuery {
    #[serde(default, alias = "page_id")]
    pub page_id: Option<Uuid>,
    #[serde(default, alias = "parent_block_id")]
    pub parent_block_id: Option<Uuid>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl BlockListQuery {
    fn scope(&self, page_id: Uuid) -> BlockScope {
        match self.parent_block_id {
            Some(parent_block_id) => BlockScope::Children {
                page_id,
                parent_block_id,
            },
            None => BlockScope::Page(page_id),
        }
    }

    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

fn required_page_id(page_id: Option<Uuid>) -> BackendResult<Uuid> {
    page_id.ok_or_else(|| BackendError::validation(codes::MISSING_FIELD, "pageId is required"))
}

/// `POST /api/blocks`
pub async fn create_block(
    State(blocks): State<BlockService>,
    ApiJson(request): ApiJson<CreateBlockRequest>,
) -> BackendResult<Response> {
    let page_id = required_page_id(request.page_id)?;
    let block = blocks.create(page_id, request).await?;
    Ok(created("Block created successfully", BlockResponse::from(block)))
}

/// `POST /api/pages/{page_id}/blocks`
pub async fn create_page_block(
    State(blocks): State<BlockService>,
    ApiPath(page_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateBlockRequest>,
) -> BackendResult<Response> {
    let block = blocks.create(page_id, request).await?;
    Ok(created("Block created successfully", BlockResponse::from(block)))
}

/// `GET /api/blocks?pageId=`
pub async fn list_blocks(
    State(blocks): State<BlockService>,
    ApiQuery(query): ApiQuery<BlockListQuery>,
) -> BackendResult<Response> {
    let page_id = required_page_id(query.page_id)?;
    let list = blocks.list(query.scope(page_id), query.pagination()).await?;
    Ok(ok("Blocks retrieved", list))
}

/// `GET /api/pages/{page_id}/blocks`
pub async fn list_page_blocks(
    State(blocks): State<BlockService>,
    ApiPath(page_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<BlockListQuery>,
) -> BackendResult<Response> {
    let list = blocks.list(query.scope(page_id), query.pagination()).await?;
    Ok(ok("Blocks retrieved", list))
}

/// `GET /api/blocks/{block_id}`
pub async fn get_block(
    State(blocks): State<BlockService>,
    ApiPath(block_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let block = blocks.get(block_id).await?;
    Ok(ok("Block retrieved", BlockResponse::from(block)))
}

/// `PUT /api/blocks/{block_id}`
pub async fn update_block(
    State(blocks): State<BlockService>,
    user: AuthUser,
    ApiPath(block_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateBlockRequest>,
) -> BackendResult<Response> {
    let block = blocks.update(block_id, user.id(), request).await?;
    Ok(ok("Block updated successfully", BlockResponse::from(block)))
}

/// `DELETE /api/blocks/{block_id}`
pub async fn delete_block(
    State(blocks): State<BlockService>,
    user: AuthUser,
    ApiPath(block_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let deleted = blocks.delete(block_id, user.id()).await?;
    Ok(ok(
        "Block deleted successfully",
        serde_json::json!({ "id": block_id, "blocks_deleted": deleted }),
    ))
}

/// `POST /api/blocks/reorder`
pub async fn reorder_blocks(
    State(blocks): State<BlockService>,
    ApiJson(request): ApiJson<ReorderBlocksRequest>,
) -> BackendResult<Response> {
    let page_id = required_page_id(request.page_id)?;
    let reordered = blocks.reorder(page_id, &request.block_ids).await?;
    let data: Vec<BlockResponse> = reordered.into_iter().map(BlockResponse::from).collect();
    Ok(ok("Blocks reordered successfully", data))
}

/// `POST /api/pages/{page_id}/blocks/reorder`
pub async fn reorder_page_blocks(
    State(blocks): State<BlockService>,
    ApiPath(page_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<ReorderBlocksRequest>,
) -> BackendResult<Response> {
    let reordered = blocks.reorder(page_id, &request.block_ids).await?;
    let data: Vec<BlockResponse> = reordered.into_iter().map(BlockResponse::from).collect();
    Ok(ok("Blocks reordered successfully", data))
}

/// `GET /api/blocks/{block_id}/history`
pub async fn get_block_history(
    State(blocks): State<BlockService>,
    ApiPath(block_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let history = blocks.history(block_id).await?;
    Ok(ok("Block history retrieved", history))
}

/// `GET /api/blocks/{block_id}/deltas`
pub async fn get_block_deltas(
    State(blocks): State<BlockService>,
    ApiPath(block_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let deltas = blocks.deltas(block_id).await?;
    Ok(ok("Block deltas retrieved", deltas))
}
