use thiserror::Error;

use crate::config::ConfigError;
use crate::graph_catalog::{ElementKind, GraphSchemaError};

/// Why a query failed schema validation.
///
/// Offsets are byte positions in the query text as passed in.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaCheckError {
    #[error("The variable `{variable}` is not defined (at offset {offset})")]
    UndefinedVariable { variable: String, offset: usize },

    #[error("Cannot extract pattern `{fragment}` at offset {offset}: {reason}")]
    PatternExtraction {
        fragment: String,
        offset: usize,
        reason: &'static str,
    },

    #[error("Label `{label}` of variable `{variable}` is not in the schema")]
    UnknownLabel { variable: String, label: String },

    #[error("Variable `{variable}` is a {found} but `{label}` is a {expected}")]
    KindMismatch {
        variable: String,
        label: String,
        expected: ElementKind,
        found: ElementKind,
    },

    #[error("`{label}` has no attribute `{attribute}` (referenced through `{variable}`)")]
    UnknownAttribute {
        variable: String,
        label: String,
        attribute: String,
    },

    #[error("Relation `{variable}:{label}` cannot connect `{from_label}` to `{to_label}`")]
    DirectionMismatch {
        variable: String,
        label: String,
        from_label: String,
        to_label: String,
    },
}

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] GraphSchemaError),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No query has been analysed yet; call validate_schema first")]
    NoAnalysis,

    #[error("The query has no RETURN clause")]
    NoReturnClause,
}
