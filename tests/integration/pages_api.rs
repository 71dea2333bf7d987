//! Page endpoints and the page hierarchy.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_page_grants_owner() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let workspace_id = app.create_workspace(owner, "Notes").await;

    let response = app
        .post("/api/pages", owner, json!({ "workspaceId": workspace_id, "title": "  Roadmap  " }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.data()["title"], "Roadmap");
    assert_eq!(response.data()["parentPageId"], json!(null));
    assert_eq!(response.data()["createdBy"], json!(owner));

    let page_id = response.id();
    let response = app.get(&format!("/api/pages/{}/collaborators", page_id), owner).await;
    assert_eq!(response.data()[0]["role"], "owner");
}

#[tokio::test]
async fn test_create_page_validation() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let workspace_id = app.create_workspace(owner, "Notes").await;

    let response = app
        .post("/api/pages", owner, json!({ "workspaceId": workspace_id, "title": "   " }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_INPUT");

    let response = app
        .post("/api/pages", owner, json!({ "workspaceId": Uuid::new_v4(), "title": "Lost" }))
        .await;
    assert_error!(response, StatusCode::NOT_FOUND, "WORKSPACE_NOT_FOUND");
}

#[tokio::test]
async fn test_stranger_cannot_create_page_in_workspace() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let workspace_id = app.create_workspace(owner, "Notes").await;

    let response = app
        .post("/api/pages", Uuid::new_v4(), json!({ "workspaceId": workspace_id, "title": "Sneaky" }))
        .await;
    assert_error!(response, StatusCode::FORBIDDEN, "ACCESS_DENIED");
}

#[tokio::test]
async fn test_editor_creates_sub_page() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let editor = Uuid::new_v4();
    let (workspace_id, page_id) = app.workspace_with_page(owner).await;
    app.grant(owner, page_id, editor, "editor").await;

    let response = app
        .post(
            "/api/pages",
            editor,
            json!({ "workspaceId": workspace_id, "parentPageId": page_id, "title": "Child" }),
        )
        .await;
    assert_status!(response, StatusCode::CREATED);
    let child = response.id();

    // the workspace owner keeps access to pages collaborators create
    assert_status!(app.get(&format!("/api/pages/{}", child), owner).await, StatusCode::OK);

    let response = app.get(&format!("/api/pages/{}/children", page_id), owner).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(1));
    assert_eq!(response.data()[0]["id"], json!(child));
}

#[tokio::test]
async fn test_parent_from_other_workspace_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let other_workspace = app.create_workspace(owner, "Other").await;

    let response = app
        .post(
            "/api/pages",
            owner,
            json!({ "workspaceId": other_workspace, "parentPageId": page_id, "title": "Orphan" }),
        )
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_PARENT");
}

#[tokio::test]
async fn test_update_page() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let uri = format!("/api/pages/{}", page_id);

    let response = app.put(&uri, owner, json!({ "title": "Renamed", "viewConfig": {"width": "full"} })).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["title"], "Renamed");
    assert_eq!(response.data()["viewConfig"], json!({"width": "full"}));

    let response = app.put(&uri, owner, json!({ "viewConfig": {} })).await;
    assert_eq!(response.data()["title"], "Renamed");
}

#[tokio::test]
async fn test_page_tree_and_listing() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let (workspace_id, root) = app.workspace_with_page(owner).await;
    let child = app
        .post(
            "/api/pages",
            owner,
            json!({ "workspaceId": workspace_id, "parentPageId": root, "title": "Child" }),
        )
        .await
        .id();
    let second_root = app.create_page(owner, workspace_id, "Second").await;

    let response = app.get(&format!("/api/workspaces/{}/pages/tree", workspace_id), owner).await;
    assert_status!(response, StatusCode::OK);
    let forest = response.data().as_array().unwrap();
    assert_eq!(forest.len(), 2);
    let first = forest.iter().find(|n| n["id"] == json!(root)).unwrap();
    assert_eq!(first["hasChildren"], true);
    assert_eq!(first["children"][0]["id"], json!(child));

    let response = app.get(&format!("/api/workspaces/{}/pages", workspace_id), owner).await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(3));

    app.grant(owner, second_root, guest, "viewer").await;
    let response = app.get(&format!("/api/workspaces/{}/pages", workspace_id), guest).await;
    assert_status!(response, StatusCode::OK);
    let visible = response.data().as_array().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["id"], json!(second_root));
}

#[tokio::test]
async fn test_delete_page_removes_sub_pages() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (workspace_id, root) = app.workspace_with_page(owner).await;
    let child = app
        .post(
            "/api/pages",
            owner,
            json!({ "workspaceId": workspace_id, "parentPageId": root, "title": "Child" }),
        )
        .await
        .id();

    let response = app.delete(&format!("/api/pages/{}", root), owner).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["pages_deleted"], 2);

    let response = app.get(&format!("/api/pages/{}", child), owner).await;
    assert_error!(response, StatusCode::NOT_FOUND, "PAGE_NOT_FOUND");
    let response = app.get(&format!("/api/workspaces/{}/pages", workspace_id), owner).await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_blocks_on_deleted_page() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let block_id = app.paragraph(owner, page_id, "gone").await;
    app.delete(&format!("/api/pages/{}", page_id), owner).await;

    let response = app
        .create_block(owner, page_id, json!({ "type": "paragraph" }))
        .await;
    assert_error!(response, StatusCode::NOT_FOUND, "PAGE_NOT_FOUND");
    let response = app.get(&format!("/api/blocks/{}", block_id), owner).await;
    assert_error!(response, StatusCode::NOT_FOUND, "BLOCK_NOT_FOUND");
}
