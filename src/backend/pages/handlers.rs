//! Page HTTP Handlers
//!
//! Routes carrying `{page_id}` are gated by the permission middleware before
//! these run. Creation and workspace listings check the workspace instead.

use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use super::PageService;
use crate::backend::error::BackendResult;
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::AuthUser;
use crate::backend::response::{created, ok};
use crate::shared::{CreatePageRequest, UpdatePageRequest};

/// `POST /api/pages`
pub async fn create_page(
    State(pages): State<PageService>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreatePageRequest>,
) -> BackendResult<Response> {
    let page = pages.create(user.id(), request).await?;
    Ok(created("Page created successfully", page))
}

/// `GET /api/pages/{page_id}`
pub async fn get_page(
    State(pages): State<PageService>,
    ApiPath(page_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let page = pages.get(page_id).await?;
    Ok(ok("Page retrieved", page))
}

/// `PUT /api/pages/{page_id}`
pub async fn update_page(
    State(pages): State<PageService>,
    ApiPath(page_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdatePageRequest>,
) -> BackendResult<Response> {
    let page = pages.update(page_id, request).await?;
    Ok(ok("Page updated successfully", page))
}

/// `DELETE /api/pages/{page_id}`
pub async fn delete_page(
    State(pages): State<PageService>,
    ApiPath(page_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let deleted = pages.delete(page_id).await?;
    Ok(ok(
        "Page deleted successfully",
        serde_json::json!({ "id": page_id, "pages_deleted": deleted }),
    ))
}

/// `GET /api/pages/{page_id}/children`
pub async fn list_child_pages(
    State(pages): State<PageService>,
    ApiPath(page_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let children = pages.list_children(page_id).await?;
    Ok(ok("Child pages retrieved", children))
}

/// `GET /api/workspaces/{workspace_id}/pages`
pub async fn list_workspace_pages(
    State(pages): State<PageService>,
    user: AuthUser,
    ApiPath(workspace_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let list = pages.list_visible(workspace_id, user.id()).await?;
    Ok(ok("Pages retrieved", list))
}

/// `GET /api/workspaces/{workspace_id}/pages/tree`
pub async fn get_workspace_page_tree(
    State(pages): State<PageService>,
    user: AuthUser,
    ApiPath(workspace_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let tree = pages.tree(workspace_id, user.id()).await?;
    Ok(ok("Page tree retrieved", tree))
}
