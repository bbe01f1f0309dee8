//! CypherCheck - Schema conformance checking for Cypher queries
//!
//! This crate validates Cypher queries without a full parser through:
//! - Schema catalogs loaded from JSON or YAML node/relation records
//! - Pattern extraction over literal-masked query text
//! - Per-variable label, kind, attribute and direction checks
//! - Direction relaxation and RETURN clause rewriting
//! - Optional grammar checks by trial transaction against Neo4j

pub mod config;
pub mod cypher_scan;
pub mod graph_catalog;
pub mod query_validator;

pub use config::{ConfigError, ValidatorConfig};
pub use graph_catalog::{load_schema_catalog, SchemaCatalog, SchemaRecord};
pub use query_validator::{
    analyze_query, CypherValidator, SchemaCheckError, SchemaValidation, ValidatorError,
};
