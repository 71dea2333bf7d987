//! Sharing endpoints and the permission gate in front of page and block routes.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use folio::backend::sharing;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{auth_header, foreign_token, TestApp};

#[tokio::test]
async fn test_viewer_then_editor_then_revoked() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let block_id = app.paragraph(owner, page_id, "shared").await;
    let block_uri = format!("/api/blocks/{}", block_id);

    // no grant yet
    let response = app.get(&format!("/api/pages/{}", page_id), guest).await;
    assert_error!(response, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    assert_status!(app.grant(owner, page_id, guest, "viewer").await, StatusCode::OK);
    assert_status!(app.get(&format!("/api/pages/{}", page_id), guest).await, StatusCode::OK);
    assert_status!(app.get(&block_uri, guest).await, StatusCode::OK);
    let response = app.put(&block_uri, guest, json!({ "content": "vandalised" })).await;
    assert_error!(response, StatusCode::FORBIDDEN, "ACCESS_DENIED");
    let response = app
        .create_block(guest, page_id, json!({ "type": "paragraph", "content": "nope" }))
        .await;
    assert_error!(response, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    assert_status!(app.grant(owner, page_id, guest, "editor").await, StatusCode::OK);
    assert_status!(app.put(&block_uri, guest, json!({ "content": "edited" })).await, StatusCode::OK);

    let response = app.delete(&format!("/api/pages/{}/share/{}", page_id, guest), owner).await;
    assert_status!(response, StatusCode::OK);
    let response = app.get(&block_uri, guest).await;
    assert_error!(response, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    let response = app.get(&block_uri, owner).await;
    assert_eq!(response.data()["content"], "edited");
}

#[tokio::test]
async fn test_regrant_replaces_role() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    for role in ["viewer", "editor", "viewer", "owner"] {
        let response = app.grant(owner, page_id, guest, role).await;
        assert_status!(response, StatusCode::OK);
        assert_eq!(response.data()["role"], role);
    }

    let count = sharing::db::count_for_pair(&app.state().db_pool, page_id, guest).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_only_owners_manage_sharing() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let editor = Uuid::new_v4();
    let outsider = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    app.grant(owner, page_id, editor, "editor").await;

    let response = app.grant(editor, page_id, outsider, "viewer").await;
    assert_error!(response, StatusCode::FORBIDDEN, "ACCESS_DENIED");
    let response = app.delete(&format!("/api/pages/{}/share/{}", page_id, owner), editor).await;
    assert_error!(response, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    let response = app.get(&format!("/api/pages/{}", page_id), outsider).await;
    assert_error!(response, StatusCode::FORBIDDEN, "ACCESS_DENIED");
}

#[tokio::test]
async fn test_invalid_role_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app.grant(owner, page_id, Uuid::new_v4(), "admin").await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_ROLE");
}

#[tokio::test]
async fn test_revoke_twice_leaves_no_access() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    app.grant(owner, page_id, guest, "editor").await;
    let uri = format!("/api/pages/{}/share/{}", page_id, guest);

    assert_status!(app.delete(&uri, owner).await, StatusCode::OK);
    assert_status!(app.delete(&uri, owner).await, StatusCode::OK);

    assert!(!app.state().sharing.has_access(page_id, guest).await);
    assert_eq!(sharing::db::count_for_pair(&app.state().db_pool, page_id, guest).await.unwrap(), 0);
}

#[tokio::test]
async fn test_revoke_without_grant_succeeds() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app
        .delete(&format!("/api/pages/{}/share/{}", page_id, Uuid::new_v4()), owner)
        .await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_collaborators_and_shared_pages() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let (workspace_id, page_id) = app.workspace_with_page(owner).await;
    let other_page = app.create_page(owner, workspace_id, "Private").await;
    app.grant(owner, page_id, guest, "viewer").await;

    let response = app.get(&format!("/api/pages/{}/collaborators", page_id), guest).await;
    assert_status!(response, StatusCode::OK);
    let mut roles: Vec<_> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["role"].as_str().unwrap().to_string())
        .collect();
    roles.sort();
    assert_eq!(roles, vec!["owner", "viewer"]);

    let response = app.get("/api/shared-pages", guest).await;
    assert_status!(response, StatusCode::OK);
    let pages = response.data().as_array().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["page_id"], json!(page_id));

    let response = app.get("/api/shared-pages", owner).await;
    let mut ids: Vec<_> = response.data().as_array().unwrap().iter().map(|p| p["page_id"].clone()).collect();
    ids.sort_by_key(|v| v.to_string());
    let mut expected = vec![json!(page_id), json!(other_page)];
    expected.sort_by_key(|v| v.to_string());
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app.send(Method::GET, &format!("/api/pages/{}", page_id), None, None).await;
    assert_error!(response, StatusCode::UNAUTHORIZED, "AUTH_REQUIRED");

    let response = app.send(Method::GET, "/api/workspaces", None, None).await;
    assert_error!(response, StatusCode::UNAUTHORIZED, "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/pages/{}", page_id))
        .header(header::AUTHORIZATION, auth_header(&foreign_token(owner)))
        .body(Body::empty())
        .unwrap();
    let response = app.dispatch(request).await;
    assert_error!(response, StatusCode::UNAUTHORIZED, "TOKEN_INVALID");
}

#[tokio::test]
async fn test_deleted_page_is_not_found_before_forbidden() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    assert_status!(app.delete(&format!("/api/pages/{}", page_id), owner).await, StatusCode::OK);

    let response = app.get(&format!("/api/pages/{}", page_id), Uuid::new_v4()).await;
    assert_error!(response, StatusCode::NOT_FOUND, "PAGE_NOT_FOUND");
}
