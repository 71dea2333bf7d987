//! Workspace HTTP Handlers

use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use super::WorkspaceService;
use crate::backend::error::BackendResult;
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::AuthUser;
use crate::backend::response::{created, ok};
use crate::shared::{CreateWorkspaceRequest, UpdateWorkspaceRequest};

/// `POST /api/workspaces`
pub async fn create_workspace(
    State(workspaces): State<WorkspaceService>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateWorkspaceRequest>,
) -> BackendResult<Response> {
    let workspace = workspaces.create(user.id(), request).await?;
    Ok(created("Workspace created successfully", workspace))
}

/// `GET /api/workspaces`
pub async fn list_workspaces(
    State(workspaces): State<WorkspaceService>,
    user: AuthUser,
) -> BackendResult<Response> {
    let list = workspaces.list_for_owner(user.id()).await?;
    Ok(ok("Workspaces retrieved", list))
}

/// `GET /api/workspaces/{workspace_id}`
pub async fn get_workspace(
    State(workspaces): State<WorkspaceService>,
    user: AuthUser,
    ApiPath(workspace_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let workspace = workspaces.get_owned(workspace_id, user.id()).await?;
    Ok(ok("Workspace retrieved", workspace))
}

/// `PUT /api/workspaces/{workspace_id}`
pub async fn update_workspace(
    State(workspaces): State<WorkspaceService>,
    user: AuthUser,
    ApiPath(workspace_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateWorkspaceRequest>,
) -> BackendResult<Response> {
    let workspace = workspaces.update(workspace_id, user.id(), request).await?;
    Ok(ok("Workspace updated successfully", workspace))
}

/// `DELETE /api/workspaces/{workspace_id}`
pub async fn delete_workspace(
    State(workspaces): State<WorkspaceService>,
    user: AuthUser,
    ApiPath(workspace_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    workspaces.delete(workspace_id, user.id()).await?;
    Ok(ok("Workspace deleted successfully", serde_json::json!({ "id": workspace_id })))
}
