//! # Graph Schema Error Types
//!
//! Errors raised while loading schema records and building the
//! [`SchemaCatalog`](super::SchemaCatalog).
//!
//! ## Error Categories
//!
//! - **Catalog Errors**: Records that contradict each other (a node label
//!   declared twice, a label used both as a node and as a relation)
//! - **Configuration Errors**: File I/O and parsing issues during schema loading
//!
//! ## Usage Patterns
//!
//! When a schema file cannot be used, attach the path so the caller can tell
//! which file was rejected:
//!
//! ```ignore
//! GraphSchemaError::read_error_with_context(
//!     "schema.json",
//!     "While loading schema records at startup"
//! )
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphSchemaError {
    #[error("The schema contains repeated node label `{label}`")]
    DuplicateNodeLabel { label: String },
    #[error("Label `{label}` is declared both as a node and as a relation")]
    LabelKindConflict { label: String },
    #[error("Failed to read schema file '{path}': {error}")]
    ConfigReadError { path: String, error: String },
    #[error("Failed to parse schema records: {error}")]
    ConfigParseError { error: String },
}

impl GraphSchemaError {
    /// Create a read error with context information
    ///
    /// # Example
    /// ```ignore
    /// GraphSchemaError::read_error_with_context(
    ///     "schema.json",
    ///     "While loading schema records"
    /// )
    /// ```
    pub fn read_error_with_context(path: impl Into<String>, context: impl Into<String>) -> Self {
        GraphSchemaError::ConfigReadError {
            path: path.into(),
            error: context.into(),
        }
    }
}
