//! Service-level checks that are awkward to reach over HTTP.

use std::collections::HashSet;

use assert_matches::assert_matches;
use folio::backend::blocks::db::BlockScope;
use folio::backend::sharing::access::{AccessCheck, AccessLevel};
use folio::shared::{CreateBlockRequest, CreatePageRequest, CreateWorkspaceRequest, PaginationParams, Role};
use uuid::Uuid;

use crate::common::database::TestDatabase;

async fn seeded_page(db: &TestDatabase, owner: Uuid) -> Uuid {
    let workspace = db
        .state
        .workspaces
        .create(owner, CreateWorkspaceRequest { name: "W".to_string(), description: None })
        .await
        .unwrap();
    db.state
        .pages
        .create(
            owner,
            CreatePageRequest {
                workspace_id: workspace.id,
                parent_page_id: None,
                title: "P".to_string(),
                view_config: None,
            },
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_check_access_outcomes() {
    let db = TestDatabase::new().await;
    let owner = Uuid::new_v4();
    let viewer = Uuid::new_v4();
    let page_id = seeded_page(&db, owner).await;
    let sharing = &db.state.sharing;
    sharing.grant_access(page_id, viewer, "viewer").await.unwrap();

    assert_eq!(
        sharing.check_access(page_id, owner, AccessLevel::Manage).await,
        AccessCheck::Granted(Role::Owner)
    );
    assert_eq!(
        sharing.check_access(page_id, viewer, AccessLevel::Write).await,
        AccessCheck::Denied { held: Some(Role::Viewer) }
    );
    assert!(sharing.has_access(page_id, viewer).await);
    assert!(!sharing.can_edit(page_id, viewer).await);
    assert!(!sharing.has_access(page_id, Uuid::new_v4()).await);
}

#[tokio::test]
async fn test_lookup_failure_denies() {
    let db = TestDatabase::new().await;
    let owner = Uuid::new_v4();
    let page_id = seeded_page(&db, owner).await;
    let sharing = db.state.sharing.clone();
    assert!(sharing.has_access(page_id, owner).await);

    db.state.db_pool.close().await;

    assert_matches!(
        sharing.check_access(page_id, owner, AccessLevel::Read).await,
        AccessCheck::LookupFailed(_)
    );
    assert!(!sharing.has_access(page_id, owner).await);
    assert!(!sharing.can_edit(page_id, owner).await);
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let db = TestDatabase::new().await;

    let inserted = db.state.block_types.seed_system_types().await.unwrap();
    assert_eq!(inserted, 0);
    assert_eq!(db.state.block_types.list(None).await.unwrap().len(), 11);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_at_same_position() {
    let db = TestDatabase::new().await;
    let owner = Uuid::new_v4();
    let page_id = seeded_page(&db, owner).await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let blocks = db.state.blocks.clone();
        handles.push(tokio::spawn(async move {
            let request = CreateBlockRequest {
                page_id: None,
                parent_block_id: None,
                block_type: "paragraph".to_string(),
                content: Some(format!("block {}", i)),
                position: Some(0),
                block_config: None,
            };
            blocks.create(page_id, request).await
        }));
    }
    for handle in handles {
        let created = handle.await.unwrap();
        assert!(created.is_ok(), "concurrent create failed: {:?}", created.err());
    }

    let listed = db
        .state
        .blocks
        .list(BlockScope::Page(page_id), PaginationParams { limit: Some(100), offset: None })
        .await
        .unwrap();
    assert_eq!(listed.blocks.len(), 16);
    assert_eq!(listed.pagination.total, 16);
    let ranks: HashSet<i64> = listed.blocks.iter().map(|b| b.rank).collect();
    assert_eq!(ranks.len(), 16);
}
