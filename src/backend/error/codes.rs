//! Stable machine-readable error codes carried in every error envelope.

pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const INVALID_ID: &str = "INVALID_ID";
pub const MISSING_FIELD: &str = "MISSING_FIELD";
pub const INVALID_ROLE: &str = "INVALID_ROLE";
pub const INVALID_POSITION: &str = "INVALID_POSITION";
pub const INVALID_BLOCK_TYPE: &str = "INVALID_BLOCK_TYPE";
pub const INVALID_PARENT: &str = "INVALID_PARENT";
pub const METADATA_VALIDATION_FAILED: &str = "METADATA_VALIDATION_FAILED";
pub const INVALID_SCHEMA: &str = "INVALID_SCHEMA";
pub const REORDER_SCOPE_MISMATCH: &str = "REORDER_SCOPE_MISMATCH";
pub const SYSTEM_BLOCK_TYPE: &str = "SYSTEM_BLOCK_TYPE";

pub const WORKSPACE_NOT_FOUND: &str = "WORKSPACE_NOT_FOUND";
pub const PAGE_NOT_FOUND: &str = "PAGE_NOT_FOUND";
pub const BLOCK_NOT_FOUND: &str = "BLOCK_NOT_FOUND";
pub const BLOCK_TYPE_NOT_FOUND: &str = "BLOCK_TYPE_NOT_FOUND";
pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";

pub const BLOCK_TYPE_EXISTS: &str = "BLOCK_TYPE_EXISTS";

pub const AUTH_REQUIRED: &str = "AUTH_REQUIRED";
pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
pub const ACCESS_DENIED: &str = "ACCESS_DENIED";

pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
pub const SCHEMA_MARSHAL_FAILED: &str = "SCHEMA_MARSHAL_FAILED";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
