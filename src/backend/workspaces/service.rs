//! Workspace Service
//!
//! Workspaces are private to their owner: every operation other than create
//! and list requires the caller to be the owner.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::error::{codes, BackendError, BackendResult};
use crate::shared::{CreateWorkspaceRequest, UpdateWorkspaceRequest, Workspace};

#[derive(Clone)]
pub struct WorkspaceService {
    pool: SqlitePool,
}

impl WorkspaceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_id: Uuid, request: CreateWorkspaceRequest) -> BackendResult<Workspace> {
        request.validate()?;
        let workspace = db::insert_workspace(
            &self.pool,
            owner_id,
            request.name.trim(),
            request.description.as_deref(),
        )
        .await?;
        tracing::info!(workspace_id = %workspace.id, owner_id = %owner_id, "Workspace created");
        Ok(workspace)
    }

    /// Live workspace, regardless of caller
    pub async fn find(&self, id: Uuid) -> BackendResult<Workspace> {
        db::get_workspace(&self.pool, id)
            .await?
            .ok_or_else(|| BackendError::not_found(codes::WORKSPACE_NOT_FOUND, "Workspace not found"))
    }

    /// Live workspace owned by `caller`
    pub async fn get_owned(&self, id: Uuid, caller: Uuid) -> BackendResult<Workspace> {
        let workspace = self.find(id).await?;
        if workspace.owner_id != caller {
            return Err(BackendError::forbidden("Only the workspace owner can access this workspace"));
        }
        Ok(workspace)
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> BackendResult<Vec<Workspace>> {
        Ok(db::list_by_owner(&self.pool, owner_id).await?)
    }

    pub async fn update(&self, id: Uuid, caller: Uuid, request: UpdateWorkspaceRequest) -> BackendResult<Workspace> {
        request.validate()?;
        let current = self.get_owned(id, caller).await?;

        let name = request.name.as_deref().map(str::trim).unwrap_or(&current.name);
        let description = request.description.as_deref().or(current.description.as_deref());
        if !db::update_workspace(&self.pool, id, name, description).await? {
            return Err(BackendError::not_found(codes::WORKSPACE_NOT_FOUND, "Workspace not found"));
        }
        tracing::info!(workspace_id = %id, "Workspace updated");
        self.find(id).await
    }

    pub async fn delete(&self, id: Uuid, caller: Uuid) -> BackendResult<()> {
        self.get_owned(id, caller).await?;
        db::soft_delete_workspace(&self.pool, id).await?;
        tracing::info!(workspace_id = %id, "Workspace deleted");
        Ok(())
    }
}
