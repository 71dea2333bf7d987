//! Block Type Data Structure
//!
//! Reference data describing a kind of block and the JSON Schema its
//! metadata must satisfy. An empty schema imposes no constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::JsonMap;
use crate::shared::error::{validate_text, SharedError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockType {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub display_name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub default_metadata: JsonMap,
    pub metadata_schema: JsonMap,
    pub is_system: bool,
    pub is_framework: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

/// Request body for registering a custom block type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockTypeRequest {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, alias = "display_name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, alias = "default_metadata")]
    pub default_metadata: JsonMap,
    #[serde(default, alias = "metadata_schema")]
    pub metadata_schema: JsonMap,
}

fn default_category() -> String {
    "custom".to_string()
}

impl CreateBlockTypeRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_text("name", &self.name, 100)?;
        let valid_chars = self
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !valid_chars {
            return Err(SharedError::validation(
                "name",
                "name may only contain lowercase letters, digits, '_' and '-'",
            ));
        }
        validate_text("category", &self.category, 100)
    }
}
