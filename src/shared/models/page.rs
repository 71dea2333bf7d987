//! Page Data Structure
//!
//! Pages live in exactly one workspace and optionally under a parent page,
//! forming a forest per workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::JsonMap;
use crate::shared::error::{validate_text, SharedError};

/// Maximum page title length in characters
pub const MAX_PAGE_TITLE: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub parent_page_id: Option<Uuid>,
    pub title: String,
    pub view_config: JsonMap,
    pub created_by: Uuid,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/pages`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    #[serde(alias = "workspace_id")]
    pub workspace_id: Uuid,
    #[serde(default, alias = "parent_page_id")]
    pub parent_page_id: Option<Uuid>,
    pub title: String,
    #[serde(default, alias = "view_config")]
    pub view_config: Option<JsonMap>,
}

impl CreatePageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_text("title", &self.title, MAX_PAGE_TITLE)
    }
}

/// Request body for `PUT /api/pages/{pageId}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "view_config")]
    pub view_config: Option<JsonMap>,
}

impl UpdatePageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        match &self.title {
            Some(title) => validate_text("title", title, MAX_PAGE_TITLE),
            None => Ok(()),
        }
    }
}

/// One node of a workspace page tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageTreeNode {
    pub id: Uuid,
    pub title: String,
    pub parent_page_id: Option<Uuid>,
    pub has_children: bool,
    pub children: Vec<PageTreeNode>,
}

impl PageTreeNode {
    /// Build a forest from a flat page list. Pages whose parent is not in the
    /// list (deleted, or not visible to the caller) become roots.
    pub fn build_forest(pages: &[Page]) -> Vec<PageTreeNode> {
        let known: std::collections::HashSet<Uuid> = pages.iter().map(|p| p.id).collect();
        let roots: Vec<&Page> = pages
            .iter()
            .filter(|p| p.parent_page_id.map_or(true, |parent| !known.contains(&parent)))
            .collect();
        roots.into_iter().map(|root| Self::build_node(root, pages)).collect()
    }

    fn build_node(page: &Page, pages: &[Page]) -> PageTreeNode {
        let children: Vec<PageTreeNode> = pages
            .iter()
            .filter(|p| p.parent_page_id == Some(page.id))
            .map(|child| Self::build_node(child, pages))
            .collect();
        PageTreeNode {
            id: page.id,
            title: page.title.clone(),
            parent_page_id: page.parent_page_id,
            has_children: !children.is_empty(),
            children,
        }
    }
}
