use std::ops::Range;

use super::symbol_table::SymbolTable;
use crate::cypher_scan::patterns::{is_call_site, node_body, NODE_PATTERN};
use crate::cypher_scan::{MaskedQuery, TextEdit};

/// A node pattern found in the masked text, with the variable it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeOccurrence {
    /// Range of the whole `( ... )` in the masked text
    pub span: Range<usize>,
    pub variable: String,
    /// Label written at this occurrence, empty when none
    pub label: String,
}

/// Record every node pattern of the query in `symbols`.
///
/// Anonymous nodes get a synthesized `node{N}` name; the insertion is pushed
/// to `edits` in original-text coordinates. Returns the occurrences in text
/// order so relation fragments can be attached to their endpoint nodes.
pub(crate) fn extract_node_patterns(
    masked: &MaskedQuery,
    symbols: &mut SymbolTable,
    edits: &mut Vec<TextEdit>,
) -> Vec<NodeOccurrence> {
    let text = masked.as_str();
    let mut occurrences = Vec::new();

    for caps in NODE_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if is_call_site(text, whole.start()) {
            continue;
        }

        let body = node_body(&caps);
        let number = symbols.next_pattern_number();
        let variable = match body.variable {
            Some(variable) => variable,
            None => {
                let name = format!("node{}", number);
                let at = masked.to_original(body.name_insert_at);
                edits.push(TextEdit::insert(at, name.clone()));
                name
            }
        };

        symbols.merge_node(&variable, &body.label, &body.properties);
        log::debug!(
            "node pattern `{}` -> variable `{}` label `{}`",
            whole.as_str(),
            variable,
            body.label
        );

        occurrences.push(NodeOccurrence {
            span: whole.range(),
            variable,
            label: body.label,
        });
    }

    occurrences
}
