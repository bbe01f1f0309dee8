pub mod config;
pub mod errors;
pub mod graph_schema;

// Re-export commonly used types
pub use config::{load_schema_catalog, load_schema_records, SchemaRecord};
pub use errors::GraphSchemaError;
pub use graph_schema::{
    ElementKind, GraphSchemaElement, NodeSchema, RelationshipSchema, SchemaCatalog,
};
