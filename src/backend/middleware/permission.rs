/**
 * Page Permission Middleware
 *
 * Gates every page-scoped route on the caller's role for that page. Runs
 * after `auth_middleware`, so the caller is known.
 *
 * # Resolving the page
 *
 * | Middleware | Page comes from |
 * |------------|-----------------|
 * | `authorize_page_path` | `{page_id}` in the path, or the page of `{block_id}` |
 * | `authorize_page_owner` | same, but requires the owner role |
 * | `authorize_page_payload` | `pageId` in the query (GET) or JSON body |
 *
 * The required level follows the method: GET/HEAD/OPTIONS read, anything
 * else writes. Only [`AccessCheck::Granted`] lets the request through; a
 * missing grant and a failed lookup both end in 403 and the handler never
 * runs.
 */

use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    extract::{Query, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use uuid::Uuid;

use super::AuthUser;
use crate::backend::error::{codes, BackendError, BackendResult};
use crate::backend::extract::ApiPath;
use crate::backend::server::state::AppState;
use crate::backend::sharing::{AccessCheck, AccessLevel};
use crate::shared::SharedError;

/// Largest JSON body buffered while looking for `pageId`
const MAX_PAYLOAD_BYTES: usize = 2 * 1024 * 1024;

/// The only field the payload gate reads
#[derive(Debug, Default, Deserialize)]
struct PageRef {
    #[serde(default, rename = "pageId", alias = "page_id")]
    page_id: Option<Uuid>,
}

fn parse_id(raw: &str) -> BackendResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| BackendError::validation(codes::INVALID_ID, format!("'{}' is not a valid id", raw)))
}

async fn page_from_path(state: &AppState, params: &HashMap<String, String>) -> BackendResult<Uuid> {
    if let Some(raw) = params.get("page_id") {
        return parse_id(raw);
    }
    if let Some(raw) = params.get("block_id") {
        let block_id = parse_id(raw)?;
        return state.blocks.page_of(block_id).await;
    }
    Err(BackendError::internal(
        codes::INTERNAL_ERROR,
        "Route is gated on a page but has no page or block parameter",
    ))
}

async fn enforce(
    state: &AppState,
    page_id: Uuid,
    user_id: Uuid,
    level: AccessLevel,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    state.pages.ensure_live(page_id).await?;

    match state.sharing.check_access(page_id, user_id, level).await {
        AccessCheck::Granted(_) => Ok(next.run(request).await),
        AccessCheck::Denied { held } => {
            tracing::warn!(
                page_id = %page_id,
                user_id = %user_id,
                level = ?level,
                held = ?held,
                "Page access denied"
            );
            Err(BackendError::forbidden("You do not have access to this page"))
        }
        AccessCheck::LookupFailed(reason) => {
            tracing::warn!(
                page_id = %page_id,
                user_id = %user_id,
                reason = %reason,
                "Page access denied after failed lookup"
            );
            Err(BackendError::forbidden("You do not have access to this page"))
        }
    }
}

/// Read or write gate on the page named by the path
pub async fn authorize_page_path(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(params): ApiPath<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let page_id = page_from_path(&state, &params).await?;
    let level = AccessLevel::for_method(request.method());
    enforce(&state, page_id, user.id(), level, request, next).await
}

/// Owner-only gate for share management
pub async fn authorize_page_owner(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(params): ApiPath<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let page_id = page_from_path(&state, &params).await?;
    enforce(&state, page_id, user.id(), AccessLevel::Manage, request, next).await
}

/// Read or write gate on the page named by `pageId` in the request
pub async fn authorize_page_payload(
    State(state): State<AppState>,
    user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let level = AccessLevel::for_method(request.method());
    let (page_id, request) = if request.method() == Method::GET || request.method() == Method::HEAD {
        let Query(page_ref) = Query::<PageRef>::try_from_uri(request.uri())?;
        (page_ref.page_id, request)
    } else {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, MAX_PAYLOAD_BYTES)
            .await
            .map_err(|e| BackendError::validation(codes::INVALID_INPUT, format!("Request body could not be read: {}", e)))?;
        let page_ref = if bytes.is_empty() {
            PageRef::default()
        } else {
            serde_json::from_slice::<PageRef>(&bytes).map_err(SharedError::from)?
        };
        (page_ref.page_id, Request::from_parts(parts, Body::from(bytes)))
    };

    let page_id = page_id.ok_or_else(|| BackendError::validation(codes::MISSING_FIELD, "pageId is required"))?;
    enforce(&state, page_id, user.id(), level, request, next).await
}
