/**
 * API Route Configuration
 *
 * Routes are grouped by the gate they sit behind. Each group carries its
 * middleware as a `route_layer`, so the layers only run for matched routes
 * and unknown paths still reach the fallback. The last layer added runs
 * first: authentication always precedes the page permission check.
 *
 * # Groups
 *
 * | Group | Gate |
 * |-------|------|
 * | page path | auth, then role on `{page_id}` / page of `{block_id}` by method |
 * | share management | auth, then owner on `{page_id}` |
 * | page payload | auth, then role on `pageId` from query or body by method |
 * | authenticated | auth only; services check workspace ownership |
 */

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::backend::block_types::handlers::{
    create_block_type, delete_block_type, get_block_type, list_block_types,
};
use crate::backend::blocks::handlers::{
    create_block, create_page_block, delete_block, get_block, get_block_deltas, get_block_history, list_blocks,
    list_page_blocks, reorder_blocks, reorder_page_blocks, update_block,
};
use crate::backend::middleware::{auth_middleware, authorize_page_owner, authorize_page_path, authorize_page_payload};
use crate::backend::pages::handlers::{
    create_page, delete_page, get_page, get_workspace_page_tree, list_child_pages, list_workspace_pages, update_page,
};
use crate::backend::server::state::AppState;
use crate::backend::sharing::handlers::{grant_access, list_collaborators, list_shared_pages, revoke_access};
use crate::backend::workspaces::handlers::{
    create_workspace, delete_workspace, get_workspace, list_workspaces, update_workspace,
};

/// Routes gated on the page named by the path
fn page_path_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/pages/{page_id}", get(get_page).put(update_page).delete(delete_page))
        .route("/api/pages/{page_id}/children", get(list_child_pages))
        .route("/api/pages/{page_id}/blocks", get(list_page_blocks).post(create_page_block))
        .route("/api/pages/{page_id}/blocks/reorder", post(reorder_page_blocks))
        .route("/api/pages/{page_id}/collaborators", get(list_collaborators))
        .route("/api/blocks/{block_id}", get(get_block).put(update_block).delete(delete_block))
        .route("/api/blocks/{block_id}/history", get(get_block_history))
        .route("/api/blocks/{block_id}/deltas", get(get_block_deltas))
        .route_layer(from_fn_with_state(state.clone(), authorize_page_path))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// Grant and revoke: owner only
fn share_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/pages/{page_id}/share", post(grant_access))
        .route("/api/pages/{page_id}/share/{user_id}", axum::routing::delete(revoke_access))
        .route_layer(from_fn_with_state(state.clone(), authorize_page_owner))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// Block routes that name their page in the query or body
fn page_payload_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/blocks", get(list_blocks).post(create_block))
        .route("/api/blocks/reorder", post(reorder_blocks))
        .route_layer(from_fn_with_state(state.clone(), authorize_page_payload))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// Routes that only need a caller
fn authenticated_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/workspaces", get(list_workspaces).post(create_workspace))
        .route(
            "/api/workspaces/{workspace_id}",
            get(get_workspace).put(update_workspace).delete(delete_workspace),
        )
        .route("/api/workspaces/{workspace_id}/pages", get(list_workspace_pages))
        .route("/api/workspaces/{workspace_id}/pages/tree", get(get_workspace_page_tree))
        .route("/api/pages", post(create_page))
        .route("/api/block-types", get(list_block_types).post(create_block_type))
        .route("/api/block-types/{name}", get(get_block_type).delete(delete_block_type))
        .route("/api/shared-pages", get(list_shared_pages))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// All `/api` routes
pub fn configure_api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(page_path_routes(state))
        .merge(share_routes(state))
        .merge(page_payload_routes(state))
        .merge(authenticated_routes(state))
}
