use super::errors::GraphSchemaError;
use super::graph_schema::SchemaCatalog;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Schema definitions are an ordered list of records, one per node label or
/// per (relation label, endpoint pair):
///
/// ```json
/// [
///   {"Label": "Person", "Type": "Node", "Attributes": ["name", "age"]},
///   {"Label": "City", "Type": "Node", "Attributes": ["name"]},
///   {"Label": "LIVES_IN", "Type": "Relation", "Attributes": ["since"],
///    "From": "Person", "To": "City"}
/// ]
/// ```
///
/// The same list may be written as YAML. Several `Relation` records may share
/// a label; each contributes one allowed (From, To) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "Type")]
pub enum SchemaRecord {
    Node {
        #[serde(rename = "Label")]
        label: String,
        #[serde(rename = "Attributes", default)]
        attributes: Vec<String>,
    },
    Relation {
        #[serde(rename = "Label")]
        label: String,
        #[serde(rename = "Attributes", default)]
        attributes: Vec<String>,
        #[serde(rename = "From")]
        from: String,
        #[serde(rename = "To")]
        to: String,
    },
}

impl SchemaRecord {
    pub fn label(&self) -> &str {
        match self {
            SchemaRecord::Node { label, .. } | SchemaRecord::Relation { label, .. } => label,
        }
    }
}

/// Parse schema records from JSON text.
pub fn records_from_json_str(content: &str) -> Result<Vec<SchemaRecord>, GraphSchemaError> {
    serde_json::from_str(content).map_err(|e| GraphSchemaError::ConfigParseError {
        error: e.to_string(),
    })
}

/// Parse schema records from YAML text.
pub fn records_from_yaml_str(content: &str) -> Result<Vec<SchemaRecord>, GraphSchemaError> {
    serde_yaml::from_str(content).map_err(|e| GraphSchemaError::ConfigParseError {
        error: e.to_string(),
    })
}

/// Read schema records from a file. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON.
pub fn load_schema_records<P: AsRef<Path>>(path: P) -> Result<Vec<SchemaRecord>, GraphSchemaError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        GraphSchemaError::read_error_with_context(path.display().to_string(), e.to_string())
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        records_from_yaml_str(&content)
    } else {
        records_from_json_str(&content)
    }
}

/// Load a schema file and build the catalog from it.
pub fn load_schema_catalog<P: AsRef<Path>>(path: P) -> Result<SchemaCatalog, GraphSchemaError> {
    let path = path.as_ref();
    let records = load_schema_records(path)?;
    let catalog = SchemaCatalog::build(&records)?;
    log::info!(
        "Loaded schema catalog from {}: {} labels from {} records",
        path.display(),
        catalog.len(),
        records.len()
    );
    Ok(catalog)
}
