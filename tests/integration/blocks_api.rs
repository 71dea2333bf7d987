//! Block endpoints: creation, ordering, updates, deletion and history.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{auth_header, generate_test_token, TestApp};

#[tokio::test]
async fn test_create_first_block() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app
        .create_block(
            owner,
            page_id,
            json!({ "type": "paragraph", "content": "Hello world", "position": 0 }),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["content"], "Hello world");
    assert_eq!(response.data()["position"], 0);
    assert_eq!(response.data()["rank"], 0);
    assert_eq!(response.data()["type"], "paragraph");
    assert_eq!(response.data()["pageId"], json!(page_id));
}

#[tokio::test]
async fn test_create_at_head_shifts_siblings() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    app.paragraph(owner, page_id, "A").await;
    app.paragraph(owner, page_id, "B").await;

    let response = app
        .create_block(owner, page_id, json!({ "type": "paragraph", "content": "C", "position": 0 }))
        .await;
    assert_status!(response, StatusCode::CREATED);

    assert_eq!(app.page_contents(owner, page_id).await, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_create_in_middle_and_past_end() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    app.paragraph(owner, page_id, "A").await;
    app.paragraph(owner, page_id, "C").await;

    app.create_block(owner, page_id, json!({ "type": "paragraph", "content": "B", "position": 1 }))
        .await;
    app.create_block(owner, page_id, json!({ "type": "paragraph", "content": "D", "position": 99 }))
        .await;

    assert_eq!(app.page_contents(owner, page_id).await, vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_create_via_blocks_route_with_page_in_body() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app
        .post(
            "/api/blocks",
            owner,
            json!({ "pageId": page_id, "type": "heading", "content": "Title", "blockConfig": {"level": 2} }),
        )
        .await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.data()["blockConfig"], json!({"level": 2}));
}

#[tokio::test]
async fn test_create_without_page_id_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    app.workspace_with_page(owner).await;

    let response = app.post("/api/blocks", owner, json!({ "type": "paragraph" })).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "MISSING_FIELD");
}

#[tokio::test]
async fn test_create_with_malformed_body_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/blocks")
        .header(header::AUTHORIZATION, auth_header(&generate_test_token(owner)))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!("{{\"pageId\": \"{}\", \"type\": ", page_id)))
        .unwrap();
    let response = app.dispatch(request).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_INPUT");
    assert!(app.page_contents(owner, page_id).await.is_empty());
}

#[tokio::test]
async fn test_default_metadata_is_applied() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app.create_block(owner, page_id, json!({ "type": "todo", "content": "Ship it" })).await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.data()["blockConfig"], json!({"checked": false}));
}

#[tokio::test]
async fn test_metadata_violations_are_aggregated() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app
        .create_block(
            owner,
            page_id,
            json!({ "type": "image", "blockConfig": {"width": 0, "caption": 7} }),
        )
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "METADATA_VALIDATION_FAILED");
    assert_eq!(response.body["error"]["violations"].as_array().map(Vec::len), Some(3));
    assert_eq!(app.page_contents(owner, page_id).await.len(), 0);
}

#[tokio::test]
async fn test_unknown_block_type() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app.create_block(owner, page_id, json!({ "type": "hologram" })).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_BLOCK_TYPE");
}

#[tokio::test]
async fn test_negative_position_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;

    let response = app
        .create_block(owner, page_id, json!({ "type": "paragraph", "position": -1 }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_POSITION");
}

#[tokio::test]
async fn test_parent_on_other_page_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (workspace_id, page_id) = app.workspace_with_page(owner).await;
    let other_page = app.create_page(owner, workspace_id, "Other").await;
    let foreign_parent = app.paragraph(owner, other_page, "elsewhere").await;

    let response = app
        .create_block(
            owner,
            page_id,
            json!({ "type": "paragraph", "parentBlockId": foreign_parent }),
        )
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_PARENT");
}

#[tokio::test]
async fn test_last_write_wins() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let block_id = app.paragraph(owner, page_id, "Draft").await;
    let uri = format!("/api/blocks/{}", block_id);

    assert_status!(app.put(&uri, owner, json!({ "content": "First edit" })).await, StatusCode::OK);
    assert_status!(app.put(&uri, owner, json!({ "content": "Second edit" })).await, StatusCode::OK);

    let response = app.get(&uri, owner).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["content"], "Second edit");
}

#[tokio::test]
async fn test_update_position_moves_block() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    app.paragraph(owner, page_id, "A").await;
    app.paragraph(owner, page_id, "B").await;
    let c = app.paragraph(owner, page_id, "C").await;

    let response = app.put(&format!("/api/blocks/{}", c), owner, json!({ "position": 0 })).await;
    assert_status!(response, StatusCode::OK);

    assert_eq!(app.page_contents(owner, page_id).await, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_update_metadata_is_revalidated() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let response = app.create_block(owner, page_id, json!({ "type": "heading", "content": "Intro" })).await;
    let uri = format!("/api/blocks/{}", response.id());

    let response = app.put(&uri, owner, json!({ "blockConfig": {"level": 9} })).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "METADATA_VALIDATION_FAILED");

    let response = app.get(&uri, owner).await;
    assert_eq!(response.data()["blockConfig"], json!({"level": 1}));
}

#[tokio::test]
async fn test_change_type_applies_new_defaults() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let block_id = app.paragraph(owner, page_id, "Buy milk").await;

    let response = app
        .put(&format!("/api/blocks/{}", block_id), owner, json!({ "type": "todo" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["type"], "todo");
    assert_eq!(response.data()["blockConfig"], json!({"checked": false}));
}

#[tokio::test]
async fn test_move_between_parents() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let toggle = app
        .create_block(owner, page_id, json!({ "type": "toggle", "content": "Details" }))
        .await
        .id();
    let child = app.paragraph(owner, page_id, "Nested").await;

    let response = app
        .put(&format!("/api/blocks/{}", child), owner, json!({ "parentBlockId": toggle }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["parentBlockId"], json!(toggle));
    assert_eq!(response.data()["rank"], 0);

    let children = app
        .get(&format!("/api/blocks?pageId={}&parentBlockId={}", page_id, toggle), owner)
        .await;
    assert_eq!(children.data()["pagination"]["total"], 1);

    let response = app
        .put(&format!("/api/blocks/{}", child), owner, json!({ "parentBlockId": null }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["parentBlockId"], json!(null));
}

#[tokio::test]
async fn test_move_under_own_descendant_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let outer = app.paragraph(owner, page_id, "outer").await;
    let inner = app
        .create_block(owner, page_id, json!({ "type": "paragraph", "parentBlockId": outer }))
        .await
        .id();

    let response = app
        .put(&format!("/api/blocks/{}", outer), owner, json!({ "parentBlockId": inner }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_PARENT");

    let response = app
        .put(&format!("/api/blocks/{}", outer), owner, json!({ "parentBlockId": outer }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_PARENT");
}

#[tokio::test]
async fn test_reorder_assigns_requested_order() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let b1 = app.paragraph(owner, page_id, "b1").await;
    let b2 = app.paragraph(owner, page_id, "b2").await;
    let b3 = app.paragraph(owner, page_id, "b3").await;

    let response = app
        .post(
            "/api/blocks/reorder",
            owner,
            json!({ "pageId": page_id, "blockIds": [b3, b1, b2] }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    let ranks: Vec<_> = response.data().as_array().unwrap().iter().map(|b| b["rank"].clone()).collect();
    assert_eq!(ranks, vec![json!(0), json!(1), json!(2)]);

    assert_eq!(app.page_contents(owner, page_id).await, vec!["b3", "b1", "b2"]);
}

#[tokio::test]
async fn test_reorder_is_all_or_nothing() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (workspace_id, page_id) = app.workspace_with_page(owner).await;
    let other_page = app.create_page(owner, workspace_id, "Other").await;
    let a = app.paragraph(owner, page_id, "a").await;
    let b = app.paragraph(owner, page_id, "b").await;
    let stranger = app.paragraph(owner, other_page, "x").await;

    let response = app
        .post(
            &format!("/api/pages/{}/blocks/reorder", page_id),
            owner,
            json!({ "blockIds": [b, stranger, a] }),
        )
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "REORDER_SCOPE_MISMATCH");
    assert_eq!(response.body["error"]["violations"].as_array().map(Vec::len), Some(1));

    assert_eq!(app.page_contents(owner, page_id).await, vec!["a", "b"]);
}

#[tokio::test]
async fn test_reorder_rejects_duplicates_and_empty_lists() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let a = app.paragraph(owner, page_id, "a").await;
    let uri = format!("/api/pages/{}/blocks/reorder", page_id);

    let response = app.post(&uri, owner, json!({ "blockIds": [a, a] })).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_INPUT");

    let response = app.post(&uri, owner, json!({ "blockIds": [] })).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_INPUT");
}

#[tokio::test]
async fn test_delete_hides_block_and_children() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let keep = app.paragraph(owner, page_id, "keep").await;
    let doomed = app.paragraph(owner, page_id, "doomed").await;
    let child = app
        .create_block(
            owner,
            page_id,
            json!({ "type": "paragraph", "content": "child", "parentBlockId": doomed }),
        )
        .await
        .id();

    let response = app.delete(&format!("/api/blocks/{}", doomed), owner).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["blocks_deleted"], 2);

    let response = app.get(&format!("/api/blocks/{}", doomed), owner).await;
    assert_error!(response, StatusCode::NOT_FOUND, "BLOCK_NOT_FOUND");
    let response = app.get(&format!("/api/blocks/{}", child), owner).await;
    assert_error!(response, StatusCode::NOT_FOUND, "BLOCK_NOT_FOUND");

    assert_eq!(app.page_contents(owner, page_id).await, vec!["keep"]);
    assert_status!(app.get(&format!("/api/blocks/{}", keep), owner).await, StatusCode::OK);
}

#[tokio::test]
async fn test_list_pagination() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    for content in ["one", "two", "three"] {
        app.paragraph(owner, page_id, content).await;
    }

    let response = app
        .get(&format!("/api/pages/{}/blocks?limit=2&offset=0", page_id), owner)
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["blocks"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        response.data()["pagination"],
        json!({"total": 3, "limit": 2, "offset": 0, "has_more": true})
    );

    let response = app
        .get(&format!("/api/pages/{}/blocks?limit=2&offset=2", page_id), owner)
        .await;
    assert_eq!(response.data()["blocks"][0]["content"], "three");
    assert_eq!(response.data()["pagination"]["has_more"], false);

    let response = app
        .get(&format!("/api/pages/{}/blocks?limit=5000&offset=-4", page_id), owner)
        .await;
    assert_eq!(response.data()["pagination"]["limit"], 50);
    assert_eq!(response.data()["pagination"]["offset"], 0);
}

#[tokio::test]
async fn test_list_with_huge_offset_is_empty() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    app.paragraph(owner, page_id, "only").await;

    let response = app
        .get(
            &format!("/api/pages/{}/blocks?limit=1000&offset={}", page_id, i64::MAX),
            owner,
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.data()["blocks"], json!([]));
    assert_eq!(response.data()["pagination"]["total"], 1);
    assert_eq!(response.data()["pagination"]["has_more"], false);
}

#[tokio::test]
async fn test_history_and_deltas_are_recorded() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let (_, page_id) = app.workspace_with_page(owner).await;
    let block_id = app.paragraph(owner, page_id, "First edit").await;
    let uri = format!("/api/blocks/{}", block_id);

    app.put(&uri, owner, json!({ "content": "Second edit" })).await;
    app.put(&uri, owner, json!({ "content": "Third edit" })).await;

    let history = app.get(&format!("{}/history", uri), owner).await;
    assert_status!(history, StatusCode::OK);
    let entries = history.data().as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["versionNumber"], 1);
    assert_eq!(entries[0]["content"], "First edit");
    assert_eq!(entries[0]["snapshotReason"], "update");
    assert_eq!(entries[1]["versionNumber"], 2);
    assert_eq!(entries[1]["createdBy"], json!(owner));

    let deltas = app.get(&format!("{}/deltas", uri), owner).await;
    let deltas = deltas.data().as_array().unwrap();
    assert_eq!(deltas.len(), 2);
    assert_eq!(deltas[1]["delta"]["content"], json!({"from": "Second edit", "to": "Third edit"}));
    assert_eq!(deltas[1]["actorType"], "user");
}

#[tokio::test]
async fn test_unknown_block_is_not_found() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    app.workspace_with_page(owner).await;

    let response = app.get(&format!("/api/blocks/{}", Uuid::new_v4()), owner).await;
    assert_error!(response, StatusCode::NOT_FOUND, "BLOCK_NOT_FOUND");

    let response = app.get("/api/blocks/not-a-uuid", owner).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "INVALID_ID");
}
