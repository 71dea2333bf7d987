//! Page Sharing Data Structures
//!
//! A share permission grants one user one role on one page. Roles are
//! totally ordered by capability: `Owner` ⊇ `Editor` ⊇ `Viewer`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Role granted on a page. Variant order is capability order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Owner,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Viewer, Role::Editor, Role::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Owner => "owner",
        }
    }

    /// Every role can read
    pub fn can_read(&self) -> bool {
        true
    }

    pub fn can_edit(&self) -> bool {
        *self >= Role::Editor
    }

    /// Grant and revoke access on the page
    pub fn can_manage(&self) -> bool {
        *self == Role::Owner
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "owner" => Ok(Role::Owner),
            other => Err(SharedError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharePermission {
    pub id: Uuid,
    pub page_id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/pages/{pageId}/share`.
///
/// `role` stays a string so an unknown role reaches the service and is
/// reported as a validation error with a stable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAccessRequest {
    #[serde(alias = "userId")]
    pub user_id: Uuid,
    pub role: String,
}
