//! Workspace endpoints.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::TestApp;

#[tokio::test]
async fn test_workspace_lifecycle() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();

    let response = app
        .post("/api/workspaces", owner, json!({ "name": "Team", "description": "Shared notes" }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.data()["ownerId"], json!(owner));
    let workspace_id = response.id();
    let uri = format!("/api/workspaces/{}", workspace_id);

    let response = app.get(&uri, owner).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["name"], "Team");

    let response = app.put(&uri, owner, json!({ "name": "Team 2" })).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["name"], "Team 2");
    assert_eq!(response.data()["description"], "Shared notes");

    let response = app.get("/api/workspaces", owner).await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(1));

    assert_status!(app.delete(&uri, owner).await, StatusCode::OK);
    let response = app.get(&uri, owner).await;
    assert_error!(response, StatusCode::NOT_FOUND, "WORKSPACE_NOT_FOUND");
    let response = app.get("/api/workspaces", owner).await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_workspaces_are_private() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let workspace_id = app.create_workspace(owner, "Mine").await;
    let uri = format!("/api/workspaces/{}", workspace_id);

    assert_error!(app.get(&uri, stranger).await, StatusCode::FORBIDDEN, "ACCESS_DENIED");
    assert_error!(
        app.put(&uri, stranger, json!({ "name": "Theirs" })).await,
        StatusCode::FORBIDDEN,
        "ACCESS_DENIED"
    );
    assert_error!(app.delete(&uri, stranger).await, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    let response = app.get("/api/workspaces", stranger).await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_workspace_name_validation() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();

    let response = app.post("/api/workspaces", owner, json!({ "name": "" })).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_INPUT");

    let response = app.post("/api/workspaces", owner, json!({ "name": "x".repeat(256) })).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_INPUT");
}
