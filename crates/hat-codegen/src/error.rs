//! Error types for the code generator

use thiserror::Error;

/// Errors surfaced around code generation
///
/// Emission itself never fails; these come from decoding editor input and
/// from editor-side validation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Automation name already claimed by another block
    #[error("Duplicate automation name {name:?} (already used by {owner})")]
    DuplicateName { name: String, owner: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
