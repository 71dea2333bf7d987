//! Workspace Data Structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::{validate_text, SharedError};

/// Maximum workspace name length in characters
pub const MAX_WORKSPACE_NAME: usize = 255;

/// Maximum workspace description length in characters
pub const MAX_WORKSPACE_DESCRIPTION: usize = 1000;

/// A workspace owns a forest of pages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/workspaces`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateWorkspaceRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_text("name", &self.name, MAX_WORKSPACE_NAME)?;
        validate_description(self.description.as_deref())
    }
}

/// Request body for `PUT /api/workspaces/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkspaceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateWorkspaceRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(name) = &self.name {
            validate_text("name", name, MAX_WORKSPACE_NAME)?;
        }
        validate_description(self.description.as_deref())
    }
}

fn validate_description(description: Option<&str>) -> Result<(), SharedError> {
    match description {
        Some(d) if d.chars().count() > MAX_WORKSPACE_DESCRIPTION => Err(SharedError::validation(
            "description",
            format!("description must be at most {} characters", MAX_WORKSPACE_DESCRIPTION),
        )),
        _ => Ok(()),
    }
}
