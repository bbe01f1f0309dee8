use super::symbol_table::SymbolTable;
use crate::cypher_scan::TextEdit;
use crate::graph_catalog::{GraphSchemaElement, SchemaCatalog};

/// Relax a directed relation whose declared orientation is not in the schema
/// but whose reverse orientation is.
///
/// On success the record (and its alias, if any) becomes undirected and two
/// edits replacing the edge markers with plain `-` are pushed. Returns false
/// when the relation cannot be repaired.
pub(crate) fn repair_direction(
    symbols: &mut SymbolTable,
    variable: &str,
    catalog: &SchemaCatalog,
    edits: &mut Vec<TextEdit>,
) -> bool {
    let Some(record) = symbols.get(variable) else {
        return false;
    };
    let Some(endpoints) = record.endpoints.as_ref() else {
        return false;
    };
    if endpoints.undirected {
        return false;
    }
    let Some(rel) = catalog
        .get(&record.label)
        .and_then(GraphSchemaElement::as_relationship)
    else {
        return false;
    };
    if !rel.allows(&endpoints.to_label, &endpoints.from_label) {
        return false;
    }

    log::info!(
        "Relaxing direction of `{}:{}`: schema allows {} -> {}, query declares {} -> {}",
        variable,
        record.label,
        endpoints.to_label,
        endpoints.from_label,
        endpoints.from_label,
        endpoints.to_label
    );
    edits.push(TextEdit::replace(endpoints.left_edge.clone(), "-"));
    edits.push(TextEdit::replace(endpoints.right_edge.clone(), "-"));

    let alias = record.alias.clone();
    for name in std::iter::once(variable.to_string()).chain(alias) {
        if let Some(endpoints) = symbols
            .get_mut(&name)
            .and_then(|record| record.endpoints.as_mut())
        {
            endpoints.undirected = true;
        }
    }
    true
}
