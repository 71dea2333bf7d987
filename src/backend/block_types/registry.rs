//! Block Type Registry
//!
//! Catalog of block kinds consulted by the block service. System types are
//! seeded at startup and cannot be deleted; custom types can be registered
//! by any authenticated user and must carry a schema that compiles.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::db::{self, NewBlockType};
use super::seed;
use crate::backend::blocks::validator;
use crate::backend::db::is_unique_violation;
use crate::backend::error::{codes, BackendError, BackendResult};
use crate::shared::{BlockType, CreateBlockTypeRequest};

#[derive(Clone)]
pub struct BlockTypeRegistry {
    pool: SqlitePool,
}

impl BlockTypeRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the built-in types that are not present yet
    pub async fn seed_system_types(&self) -> BackendResult<usize> {
        let mut inserted = 0;
        for t in seed::system_types() {
            let new = NewBlockType {
                name: t.name,
                category: t.category,
                display_name: t.display_name,
                description: Some(t.description),
                icon: Some(t.icon),
                default_metadata: &t.default_metadata,
                metadata_schema: &t.metadata_schema,
                is_system: true,
            };
            if db::insert_block_type(&self.pool, &new, true).await? {
                inserted += 1;
            }
        }
        tracing::info!(inserted, "System block types seeded");
        Ok(inserted)
    }

    pub async fn list(&self, category: Option<&str>) -> BackendResult<Vec<BlockType>> {
        Ok(db::list(&self.pool, category).await?)
    }

    /// Live type by name, or `None`
    pub async fn find(&self, name: &str) -> BackendResult<Option<BlockType>> {
        Ok(db::find_by_name(&self.pool, name).await?)
    }

    pub async fn get(&self, name: &str) -> BackendResult<BlockType> {
        self.find(name).await?.ok_or_else(|| {
            BackendError::not_found(codes::BLOCK_TYPE_NOT_FOUND, format!("Block type '{}' not found", name))
        })
    }

    /// Type by id, including retired types still referenced by blocks
    pub async fn get_by_id(&self, id: Uuid) -> BackendResult<Option<BlockType>> {
        Ok(db::find_by_id(&self.pool, id).await?)
    }

    /// Resolve the type named in a block create or update request
    pub async fn resolve_for_block(&self, name: &str) -> BackendResult<BlockType> {
        self.find(name.trim()).await?.ok_or_else(|| {
            BackendError::validation(codes::INVALID_BLOCK_TYPE, format!("Unknown block type '{}'", name))
        })
    }

    pub async fn create(&self, request: CreateBlockTypeRequest) -> BackendResult<BlockType> {
        request.validate()?;
        validator::check_schema(&request.metadata_schema)?;
        validator::validate_metadata(&request.metadata_schema, &request.default_metadata).map_err(|e| {
            BackendError::violations(
                codes::INVALID_SCHEMA,
                "defaultMetadata does not satisfy metadataSchema",
                e.violation_list().to_vec(),
            )
        })?;

        let name = request.name.trim();
        let display_name = request
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(name);
        let new = NewBlockType {
            name,
            category: request.category.trim(),
            display_name,
            description: request.description.as_deref(),
            icon: request.icon.as_deref(),
            default_metadata: &request.default_metadata,
            metadata_schema: &request.metadata_schema,
            is_system: false,
        };
        match db::insert_block_type(&self.pool, &new, false).await {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(BackendError::conflict(
                    codes::BLOCK_TYPE_EXISTS,
                    format!("Block type '{}' already exists", name),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(name = %name, category = %new.category, "Block type registered");
        self.get(name).await
    }

    /// Retire a custom type. Existing blocks keep their reference.
    pub async fn delete(&self, name: &str) -> BackendResult<()> {
        let block_type = self.get(name).await?;
        if block_type.is_system {
            return Err(BackendError::validation(
                codes::SYSTEM_BLOCK_TYPE,
                format!("System block type '{}' cannot be deleted", name),
            ));
        }
        db::soft_delete(&self.pool, block_type.id).await?;
        tracing::info!(name = %name, "Block type deleted");
        Ok(())
    }
}
