//! Sharing HTTP Handlers
//!
//! Page access has already been enforced by the permission middleware when
//! these run: reads need any role, grant/revoke need owner.

use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use super::SharingService;
use crate::backend::error::BackendResult;
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::AuthUser;
use crate::backend::response::ok;
use crate::shared::GrantAccessRequest;

/// `POST /api/pages/{page_id}/share`
pub async fn grant_access(
    State(sharing): State<SharingService>,
    ApiPath(page_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<GrantAccessRequest>,
) -> BackendResult<Response> {
    let permission = sharing.grant_access(page_id, request.user_id, &request.role).await?;
    Ok(ok("Access granted", permission))
}

/// `DELETE /api/pages/{page_id}/share/{user_id}`
pub async fn revoke_access(
    State(sharing): State<SharingService>,
    ApiPath((page_id, user_id)): ApiPath<(Uuid, Uuid)>,
) -> BackendResult<Response> {
    sharing.revoke_access(page_id, user_id).await?;
    Ok(ok("Access revoked", serde_json::json!({ "page_id": page_id, "user_id": user_id })))
}

/// `GET /api/pages/{page_id}/collaborators`
pub async fn list_collaborators(
    State(sharing): State<SharingService>,
    ApiPath(page_id): ApiPath<Uuid>,
) -> BackendResult<Response> {
    let collaborators = sharing.list_collaborators(page_id).await?;
    Ok(ok("Collaborators retrieved", collaborators))
}

/// `GET /api/shared-pages`
pub async fn list_shared_pages(
    State(sharing): State<SharingService>,
    user: AuthUser,
) -> BackendResult<Response> {
    let pages = sharing.get_user_pages(user.id()).await?;
    Ok(ok("Shared pages retrieved", pages))
}
