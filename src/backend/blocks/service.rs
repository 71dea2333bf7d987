//! Block Service
//!
//! Orchestrates the block type registry, metadata validator, ordering engine
//! and block store. Every mutation that touches more than one row runs in a
//! single transaction; inside it, every query goes through the transaction.
//!
//! # Update semantics
//!
//! - Absent patch fields are left alone. Concurrent updates are
//!   last-write-wins; there is no version check.
//! - `blockConfig` replaces the metadata map wholesale.
//! - Changing the type without `blockConfig` keeps the current metadata,
//!   overlaid on the new type's defaults.
//! - `position` and `parentBlockId` move the block; the move is placed with
//!   the same rules as an insert.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::db::{self, BlockScope, NewBlock};
use super::history::{self, SnapshotReason};
use super::{ordering, validator};
use crate::backend::block_types::{self, BlockTypeRegistry};
use crate::backend::db::begin_write;
use crate::backend::error::{codes, BackendError, BackendResult};
use crate::backend::pages;
use crate::shared::config::PaginationSettings;
use crate::shared::{
    Block, BlockDelta, BlockHistoryEntry, BlockListResponse, BlockResponse, CreateBlockRequest, PaginationMeta,
    PaginationParams, UpdateBlockRequest,
};

#[derive(Clone)]
pub struct BlockService {
    pool: SqlitePool,
    registry: BlockTypeRegistry,
    pagination: PaginationSettings,
}

fn block_not_found() -> BackendError {
    BackendError::not_found(codes::BLOCK_NOT_FOUND, "Block not found")
}

/// Parent must be a live block on the same page
async fn check_parent(conn: &mut SqliteConnection, page_id: Uuid, parent_id: Uuid) -> BackendResult<Block> {
    match db::get_block(&mut *conn, parent_id).await? {
        Some(parent) if parent.page_id == page_id => Ok(parent),
        Some(_) => Err(BackendError::validation(
            codes::INVALID_PARENT,
            "Parent block belongs to a different page",
        )),
        None => Err(BackendError::validation(codes::INVALID_PARENT, "Parent block not found")),
    }
}

impl BlockService {
    pub fn new(pool: SqlitePool, registry: BlockTypeRegistry, pagination: PaginationSettings) -> Self {
        Self {
            pool,
            registry,
            pagination,
        }
    }

    /// Create a block on `page_id` at the requested sibling position
    pub async fn create(&self, page_id: Uuid, request: CreateBlockRequest) -> BackendResult<Block> {
        request.validate()?;
        if !pages::db::is_live(&self.pool, page_id).await? {
            return Err(BackendError::not_found(codes::PAGE_NOT_FOUND, "Page not found"));
        }

        let block_type = self.registry.resolve_for_block(&request.block_type).await?;
        let metadata = validator::merge_defaults(&block_type.default_metadata, request.block_config);
        validator::validate_for_type(&block_type, &metadata)?;

        let mut tx = begin_write(&self.pool).await?;
        if let Some(parent_id) = request.parent_block_id {
            check_parent(&mut tx, page_id, parent_id).await?;
        }
        let placement =
            ordering::make_room(&mut tx, page_id, request.parent_block_id, None, request.position).await?;
        let new = NewBlock {
            page_id,
            parent_block_id: request.parent_block_id,
            type_id: block_type.id,
            content: request.content.as_deref(),
            metadata: &metadata,
            rank: placement.rank,
        };
        let id = db::insert_block(&mut *tx, &new).await?;
        let block = db::get_block(&mut *tx, id)
            .await?
            .ok_or_else(|| BackendError::internal(codes::INTERNAL_ERROR, "Created block could not be read back"))?;
        tx.commit().await?;

        tracing::info!(
            block_id = %block.id,
            page_id = %page_id,
            block_type = %block_type.name,
            rank = block.rank,
            "Block created"
        );
        Ok(block)
    }

    pub async fn get(&self, block_id: Uuid) -> BackendResult<Block> {
        db::get_block(&self.pool, block_id).await?.ok_or_else(block_not_found)
    }

    /// Page holding a live block
    pub async fn page_of(&self, block_id: Uuid) -> BackendResult<Uuid> {
        db::page_of(&self.pool, block_id).await?.ok_or_else(block_not_found)
    }

    /// Apply a partial update on behalf of `actor`
    pub async fn update(&self, block_id: Uuid, actor: Uuid, request: UpdateBlockRequest) -> BackendResult<Block> {
        request.validate()?;
        if request.is_empty() {
            return self.get(block_id).await;
        }
        let new_type = match request.block_type.as_deref() {
            Some(name) => Some(self.registry.resolve_for_block(name).await?),
            None => None,
        };

        let mut tx = begin_write(&self.pool).await?;
        let before = db::get_block(&mut *tx, block_id).await?.ok_or_else(block_not_found)?;
        let mut after = before.clone();

        if let Some(content) = request.content {
            after.content = Some(content);
        }

        let type_changed = new_type.as_ref().is_some_and(|t| Some(t.id) != before.type_id);
        let effective_type = match new_type {
            Some(t) => Some(t),
            None => match before.type_id {
                Some(type_id) => block_types::db::find_by_id(&mut *tx, type_id).await?,
                None => None,
            },
        };
        if let Some(block_type) = &effective_type {
            after.type_id = Some(block_type.id);
            after.type_name = Some(block_type.name.clone());
        }

        match request.block_config {
            Some(metadata) => after.metadata = metadata,
            None if type_changed => {
                if let Some(block_type) = &effective_type {
                    after.metadata =
                        validator::merge_defaults(&block_type.default_metadata, Some(before.metadata.clone()));
                }
            }
            None => {}
        }
        if after.metadata != before.metadata || type_changed {
            if let Some(block_type) = &effective_type {
                validator::validate_for_type(block_type, &after.metadata)?;
            }
        }

        let target_parent = request.parent_block_id.unwrap_or(before.parent_block_id);
        let parent_changed = target_parent != before.parent_block_id;
        if parent_changed {
            if let Some(parent_id) = target_parent {
                check_parent(&mut tx, before.page_id, parent_id).await?;
                if db::is_self_or_descendant(&mut tx, block_id, parent_id).await? {
                    return Err(BackendError::validation(
                        codes::INVALID_PARENT,
                        "A block cannot be moved under itself or one of its descendants",
                    ));
                }
            }
        }
        let moved = parent_changed || request.position.is_some();
        if moved {
            let placement =
                ordering::make_room(&mut tx, before.page_id, target_parent, Some(block_id), request.position).await?;
            after.parent_block_id = target_parent;
            after.rank = placement.rank;
        }

        after.updated_at = Utc::now();
        db::write_block(&mut *tx, &after).await?;
        let reason = if moved { SnapshotReason::Move } else { SnapshotReason::Update };
        history::record_change(&mut tx, &before, &after, reason, actor).await?;
        let block = db::get_block(&mut *tx, block_id).await?.ok_or_else(block_not_found)?;
        tx.commit().await?;

        tracing::info!(block_id = %block_id, reason = reason.as_str(), rank = block.rank, "Block updated");
        Ok(block)
    }

    /// Give the listed blocks `rank = index`, all or nothing
    pub async fn reorder(&self, page_id: Uuid, block_ids: &[Uuid]) -> BackendResult<Vec<Block>> {
        if block_ids.is_empty() {
            return Err(BackendError::validation(codes::INVALID_INPUT, "blockIds cannot be empty"));
        }
        let mut seen = HashSet::with_capacity(block_ids.len());
        let duplicates: Vec<String> = block_ids
            .iter()
            .filter(|id| !seen.insert(**id))
            .map(|id| format!("block {} is listed more than once", id))
            .collect();
        if !duplicates.is_empty() {
            return Err(BackendError::violations(
                codes::INVALID_INPUT,
                "blockIds contains duplicates",
                duplicates,
            ));
        }

        let mut tx = begin_write(&self.pool).await?;
        let on_page = db::filter_on_page(&mut tx, page_id, block_ids).await?;
        if on_page.len() != block_ids.len() {
            let outside: Vec<String> = block_ids
                .iter()
                .filter(|id| !on_page.contains(id))
                .map(|id| format!("block {} does not belong to page {}", id, page_id))
                .collect();
            tracing::warn!(page_id = %page_id, mismatched = outside.len(), "Reorder rejected");
            return Err(BackendError::violations(
                codes::REORDER_SCOPE_MISMATCH,
                "Every reordered block must be a live block of the page",
                outside,
            ));
        }

        ordering::assign_sequential_ranks(&mut tx, block_ids).await?;
        let mut blocks = Vec::with_capacity(block_ids.len());
        for id in block_ids {
            blocks.push(db::get_block(&mut *tx, *id).await?.ok_or_else(block_not_found)?);
        }
        tx.commit().await?;

        tracing::info!(page_id = %page_id, count = blocks.len(), "Blocks reordered");
        Ok(blocks)
    }

    /// One window of a page's blocks, or of one block's children
    pub async fn list(&self, scope: BlockScope, params: PaginationParams) -> BackendResult<BlockListResponse> {
        let window = params.window(&self.pagination);
        let (blocks, total) = db::list_blocks(&self.pool, scope, window).await?;
        Ok(BlockListResponse {
            blocks: blocks.into_iter().map(BlockResponse::from).collect(),
            pagination: PaginationMeta::new(window, total),
        })
    }

    /// Soft delete a block and its descendants. Siblings keep their ranks.
    pub async fn delete(&self, block_id: Uuid, actor: Uuid) -> BackendResult<usize> {
        let mut tx = begin_write(&self.pool).await?;
        db::get_block(&mut *tx, block_id).await?.ok_or_else(block_not_found)?;
        let ids = db::subtree_ids(&mut tx, block_id).await?;
        for id in &ids {
            if let Some(before) = db::get_block(&mut *tx, *id).await? {
                history::record_delete(&mut tx, &before, actor).await?;
            }
        }
        db::mark_deleted(&mut tx, &ids).await?;
        tx.commit().await?;

        tracing::info!(block_id = %block_id, blocks = ids.len(), "Block deleted");
        Ok(ids.len())
    }

    pub async fn history(&self, block_id: Uuid) -> BackendResult<Vec<BlockHistoryEntry>> {
        self.get(block_id).await?;
        Ok(history::list_history(&self.pool, block_id).await?)
    }

    pub async fn deltas(&self, block_id: Uuid) -> BackendResult<Vec<BlockDelta>> {
        self.get(block_id).await?;
        Ok(history::list_deltas(&self.pool, block_id).await?)
    }
}
