//! Per-variable schema checks.
//!
//! Untyped variables (empty label) pass every check.

use super::errors::SchemaCheckError;
use super::symbol_table::VariableRecord;
use crate::graph_catalog::{GraphSchemaElement, SchemaCatalog};

fn schema_entry<'a>(
    record: &VariableRecord,
    catalog: &'a SchemaCatalog,
) -> Result<Option<&'a GraphSchemaElement>, SchemaCheckError> {
    if record.is_untyped() {
        return Ok(None);
    }
    catalog
        .get(&record.label)
        .map(Some)
        .ok_or_else(|| SchemaCheckError::UnknownLabel {
            variable: record.name.clone(),
            label: record.label.clone(),
        })
}

/// Label existence, kind match and attribute subset.
pub(crate) fn check_element(
    record: &VariableRecord,
    catalog: &SchemaCatalog,
) -> Result<(), SchemaCheckError> {
    let Some(entry) = schema_entry(record, catalog)? else {
        return Ok(());
    };

    if entry.kind() != record.kind {
        return Err(SchemaCheckError::KindMismatch {
            variable: record.name.clone(),
            label: record.label.clone(),
            expected: entry.kind(),
            found: record.kind,
        });
    }

    let allowed = entry.attributes();
    if let Some(attribute) = record
        .attributes
        .iter()
        .find(|attribute| !allowed.contains(*attribute))
    {
        return Err(SchemaCheckError::UnknownAttribute {
            variable: record.name.clone(),
            label: record.label.clone(),
            attribute: attribute.clone(),
        });
    }

    Ok(())
}

/// A repeated occurrence of a variable written with another label must
/// satisfy [`check_element`] under that label too.
pub(crate) fn check_occurrence_label(
    record: &VariableRecord,
    label: &str,
    catalog: &SchemaCatalog,
) -> Result<(), SchemaCheckError> {
    if label.trim().is_empty() || label == record.label {
        return Ok(());
    }
    let relabelled = VariableRecord {
        label: label.to_string(),
        ..record.clone()
    };
    check_element(&relabelled, catalog)
}

/// Endpoint labels of a typed relation must form an allowed pair: exactly
/// (from, to) when directed, either orientation when undirected.
///
/// Assumes [`check_element`] passed for the same record.
pub(crate) fn check_direction(
    record: &VariableRecord,
    catalog: &SchemaCatalog,
) -> Result<(), SchemaCheckError> {
    let (Some(endpoints), Some(rel)) = (
        record.endpoints.as_ref(),
        schema_entry(record, catalog)?.and_then(GraphSchemaElement::as_relationship),
    ) else {
        return Ok(());
    };

    let forward = rel.allows(&endpoints.from_label, &endpoints.to_label);
    let backward = rel.allows(&endpoints.to_label, &endpoints.from_label);
    let matches = if endpoints.undirected {
        forward || backward
    } else {
        forward
    };

    if matches {
        Ok(())
    } else {
        Err(SchemaCheckError::DirectionMismatch {
            variable: record.name.clone(),
            label: record.label.clone(),
            from_label: endpoints.from_label.clone(),
            to_label: endpoints.to_label.clone(),
        })
    }
}
