//! Access Decisions
//!
//! A permission lookup produces an [`AccessCheck`] instead of a bare bool so
//! callers can tell "no grant" apart from "lookup failed". Both deny.

use axum::http::Method;

use crate::shared::Role;

/// Capability a route needs on its page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Any role
    Read,
    /// Editor or owner
    Write,
    /// Owner only: grant and revoke access
    Manage,
}

impl AccessLevel {
    /// Safe methods read; everything else writes
    pub fn for_method(method: &Method) -> Self {
        if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
            AccessLevel::Read
        } else {
            AccessLevel::Write
        }
    }

    pub fn permits(&self, role: Role) -> bool {
        match self {
            AccessLevel::Read => role.can_read(),
            AccessLevel::Write => role.can_edit(),
            AccessLevel::Manage => role.can_manage(),
        }
    }
}

/// Outcome of a permission lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessCheck {
    /// Caller holds `Role`, which satisfies the requested level
    Granted(Role),
    /// No grant, or a grant too weak for the level
    Denied { held: Option<Role> },
    /// The lookup itself failed; treated as deny
    LookupFailed(String),
}

impl AccessCheck {
    pub fn evaluate(held: Option<Role>, level: AccessLevel) -> Self {
        match held {
            Some(role) if level.permits(role) => AccessCheck::Granted(role),
            held => AccessCheck::Denied { held },
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessCheck::Granted(_))
    }
}
