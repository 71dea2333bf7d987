//! Page Service
//!
//! Pages form a forest inside a workspace. Creating a page grants the
//! creator the owner role on it in the same transaction; when a collaborator
//! creates a sub-page, the workspace owner is granted owner as well so the
//! workspace stays fully reachable by its owner.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::db::begin_write;
use crate::backend::error::{codes, BackendError, BackendResult};
use crate::backend::sharing::{self, SharingService};
use crate::backend::workspaces::WorkspaceService;
use crate::shared::{CreatePageRequest, Page, PageTreeNode, Role, UpdatePageRequest};

#[derive(Clone)]
pub struct PageService {
    pool: SqlitePool,
    workspaces: WorkspaceService,
    sharing: SharingService,
}

impl PageService {
    pub fn new(pool: SqlitePool, workspaces: WorkspaceService, sharing: SharingService) -> Self {
        Self {
            pool,
            workspaces,
            sharing,
        }
    }

    /// Create a page. Allowed for the workspace owner, or for an editor of
    /// the parent page when one is given.
    pub async fn create(&self, caller: Uuid, request: CreatePageRequest) -> BackendResult<Page> {
        request.validate()?;
        let workspace = self.workspaces.find(request.workspace_id).await?;

        if let Some(parent_id) = request.parent_page_id {
            let parent = db::get_page(&self.pool, parent_id)
                .await?
                .ok_or_else(|| BackendError::validation(codes::INVALID_PARENT, "Parent page not found"))?;
            if parent.workspace_id != workspace.id {
                return Err(BackendError::validation(
                    codes::INVALID_PARENT,
                    "Parent page belongs to a different workspace",
                ));
            }
        }

        let allowed = workspace.owner_id == caller
            || match request.parent_page_id {
                Some(parent_id) => self.sharing.can_edit(parent_id, caller).await,
                None => false,
            };
        if !allowed {
            return Err(BackendError::forbidden(
                "Creating a page requires owning the workspace or editing the parent page",
            ));
        }

        let mut tx = begin_write(&self.pool).await?;
        let page = db::insert_page(
            &mut *tx,
            workspace.id,
            request.parent_page_id,
            request.title.trim(),
            request.view_config.unwrap_or_default(),
            caller,
        )
        .await?;
        sharing::db::upsert_permission(&mut *tx, page.id, caller, Role::Owner).await?;
        if workspace.owner_id != caller {
            sharing::db::upsert_permission(&mut *tx, page.id, workspace.owner_id, Role::Owner).await?;
        }
        tx.commit().await?;

        tracing::info!(page_id = %page.id, workspace_id = %workspace.id, created_by = %caller, "Page created");
        Ok(page)
    }

    pub async fn get(&self, page_id: Uuid) -> BackendResult<Page> {
        db::get_page(&self.pool, page_id)
            .await?
            .ok_or_else(|| BackendError::not_found(codes::PAGE_NOT_FOUND, "Page not found"))
    }

    pub async fn ensure_live(&self, page_id: Uuid) -> BackendResult<()> {
        if db::is_live(&self.pool, page_id).await? {
            Ok(())
        } else {
            Err(BackendError::not_found(codes::PAGE_NOT_FOUND, "Page not found"))
        }
    }

    pub async fn update(&self, page_id: Uuid, request: UpdatePageRequest) -> BackendResult<Page> {
        request.validate()?;
        let current = self.get(page_id).await?;

        let title = request.title.as_deref().map(str::trim).unwrap_or(&current.title);
        let view_config = request.view_config.as_ref().unwrap_or(&current.view_config);
        if !db::update_page(&self.pool, page_id, title, view_config).await? {
            return Err(BackendError::not_found(codes::PAGE_NOT_FOUND, "Page not found"));
        }
        tracing::info!(page_id = %page_id, "Page updated");
        self.get(page_id).await
    }

    /// Soft delete the page and its descendant pages
    pub async fn delete(&self, page_id: Uuid) -> BackendResult<u64> {
        self.ensure_live(page_id).await?;
        let marked = db::soft_delete_subtree(&self.pool, page_id).await?;
        tracing::info!(page_id = %page_id, pages = marked, "Page deleted");
        Ok(marked)
    }

    pub async fn list_children(&self, page_id: Uuid) -> BackendResult<Vec<Page>> {
        Ok(db::list_children(&self.pool, page_id).await?)
    }

    /// Pages of a workspace the caller can see: all of them for the owner,
    /// otherwise the pages the caller holds a role on.
    pub async fn list_visible(&self, workspace_id: Uuid, caller: Uuid) -> BackendResult<Vec<Page>> {
        let workspace = self.workspaces.find(workspace_id).await?;
        let pages = if workspace.owner_id == caller {
            db::list_by_workspace(&self.pool, workspace_id).await?
        } else {
            db::list_granted_in_workspace(&self.pool, workspace_id, caller).await?
        };
        Ok(pages)
    }

    pub async fn tree(&self, workspace_id: Uuid, caller: Uuid) -> BackendResult<Vec<PageTreeNode>> {
        let pages = self.list_visible(workspace_id, caller).await?;
        Ok(PageTreeNode::build_forest(&pages))
    }
}
