//! Metadata Validator
//!
//! Checks a block's metadata against its block type's JSON Schema.
//!
//! - An empty schema imposes no constraint; any metadata (including an empty
//!   map) passes.
//! - A schema that cannot be compiled is an internal error, distinct from a
//!   validation failure: the catalog is broken, not the request.
//! - Violations are aggregated so a client can fix everything in one round
//!   trip.

use serde_json::Value;

use crate::backend::error::{codes, BackendError, BackendResult};
use crate::shared::{BlockType, JsonMap};

fn compile(schema: &JsonMap) -> Result<Option<jsonschema::Validator>, String> {
    if schema.is_empty() {
        return Ok(None);
    }
    jsonschema::validator_for(&Value::Object(schema.clone()))
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Every violation of `schema` by `metadata`, in schema evaluation order.
/// `Err` means the schema itself is unusable.
pub fn violations(schema: &JsonMap, metadata: &JsonMap) -> Result<Vec<String>, String> {
    let Some(validator) = compile(schema)? else {
        return Ok(Vec::new());
    };
    let instance = Value::Object(metadata.clone());
    let found = validator.iter_errors(&instance).map(|e| e.to_string()).collect();
    Ok(found)
}

/// Validate metadata against a raw schema
pub fn validate_metadata(schema: &JsonMap, metadata: &JsonMap) -> BackendResult<()> {
    let found = violations(schema, metadata).map_err(|reason| {
        BackendError::internal_with(
            codes::SCHEMA_MARSHAL_FAILED,
            "Block type schema could not be loaded",
            reason,
        )
    })?;
    if found.is_empty() {
        return Ok(());
    }

    let mut message = String::from("metadata validation failed:");
    for violation in &found {
        message.push_str("\n  - ");
        message.push_str(violation);
    }
    Err(BackendError::violations(codes::METADATA_VALIDATION_FAILED, message, found))
}

/// Validate metadata for a block of the given type
pub fn validate_for_type(block_type: &BlockType, metadata: &JsonMap) -> BackendResult<()> {
    validate_metadata(&block_type.metadata_schema, metadata)
}

/// Reject a schema that does not compile. Used when registering block types,
/// where a bad schema is the caller's fault.
pub fn check_schema(schema: &JsonMap) -> BackendResult<()> {
    compile(schema).map(|_| ()).map_err(|reason| {
        BackendError::violations(codes::INVALID_SCHEMA, "metadataSchema is not a valid JSON Schema", vec![reason])
    })
}

/// Shallow overlay: keys in `provided` replace keys in `defaults`
pub fn merge_defaults(defaults: &JsonMap, provided: Option<JsonMap>) -> JsonMap {
    let mut merged = defaults.clone();
    if let Some(provided) = provided {
        merged.extend(provided);
    }
    merged
}
