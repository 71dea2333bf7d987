//! Sharing Service
//!
//! Owns the page authorization model: per-page, per-user role grants and
//! the access questions asked by the permission middleware.
//!
//! # State Machine
//!
//! A (page, user) pair is in exactly one state: no grant, viewer, editor or
//! owner. `grant_access` moves it to a named role; `revoke_access` moves it
//! back to no grant. Grants never expire.
//!
//! # Fail-closed Checks
//!
//! `check_access` never returns an error. A storage failure during the lookup
//! becomes [`AccessCheck::LookupFailed`], which denies exactly like a missing
//! grant; the failure is only visible in the logs and in the variant.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::access::{AccessCheck, AccessLevel};
use super::db;
use crate::backend::error::{codes, BackendError, BackendResult};
use crate::backend::pages;
use crate::shared::{Role, SharePermission};

#[derive(Clone)]
pub struct SharingService {
    pool: SqlitePool,
}

impl SharingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Grant `role` on a page, replacing any existing role for the user
    pub async fn grant_access(&self, page_id: Uuid, user_id: Uuid, role: &str) -> BackendResult<SharePermission> {
        let role: Role = role.parse()?;
        if !pages::db::is_live(&self.pool, page_id).await? {
            return Err(BackendError::not_found(codes::PAGE_NOT_FOUND, "Page not found"));
        }

        let permission = db::upsert_permission(&self.pool, page_id, user_id, role).await?;
        tracing::info!(page_id = %page_id, user_id = %user_id, role = %role, "Access granted");
        Ok(permission)
    }

    /// Remove a grant. Revoking a grant that does not exist succeeds.
    pub async fn revoke_access(&self, page_id: Uuid, user_id: Uuid) -> BackendResult<()> {
        let existed = db::delete_permission(&self.pool, page_id, user_id).await?;
        if existed {
            tracing::info!(page_id = %page_id, user_id = %user_id, "Access revoked");
        } else {
            tracing::debug!(page_id = %page_id, user_id = %user_id, "Revoke with no existing grant");
        }
        Ok(())
    }

    pub async fn list_collaborators(&self, page_id: Uuid) -> BackendResult<Vec<SharePermission>> {
        Ok(db::list_for_page(&self.pool, page_id).await?)
    }

    /// Every live page the user holds any role on
    pub async fn get_user_pages(&self, user_id: Uuid) -> BackendResult<Vec<SharePermission>> {
        Ok(db::list_for_user(&self.pool, user_id).await?)
    }

    /// Role lookup reported as a tagged decision
    pub async fn check_access(&self, page_id: Uuid, user_id: Uuid, level: AccessLevel) -> AccessCheck {
        match db::find_role(&self.pool, page_id, user_id).await {
            Ok(held) => AccessCheck::evaluate(held, level),
            Err(e) => {
                tracing::error!(page_id = %page_id, user_id = %user_id, error = ?e, "Permission lookup failed");
                AccessCheck::LookupFailed(e.to_string())
            }
        }
    }

    /// True iff the user holds any role on the page
    pub async fn has_access(&self, page_id: Uuid, user_id: Uuid) -> bool {
        self.check_access(page_id, user_id, AccessLevel::Read).await.is_allowed()
    }

    /// True iff the user is an editor or owner of the page
    pub async fn can_edit(&self, page_id: Uuid, user_id: Uuid) -> bool {
        self.check_access(page_id, user_id, AccessLevel::Write).await.is_allowed()
    }
}
