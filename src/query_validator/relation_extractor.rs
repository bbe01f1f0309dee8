//! Relation isolation and extraction.
//!
//! A relation fragment is `left-node left-edge [body] right-edge right-node`.
//! Fragments are scanned left to right over the masked text and each one is
//! tied to the node occurrences that sit directly against its edge markers,
//! by offset. Two textually identical fragments at different positions
//! therefore always resolve to their own endpoints, and in a chain
//! `(a)-[r]->(b)-[s]->(c)` the middle node serves both relations.

use super::errors::SchemaCheckError;
use super::node_extractor::NodeOccurrence;
use super::symbol_table::{RelationEndpoints, SymbolTable, VariableRecord};
use crate::cypher_scan::patterns::{parse_relation_body, RELATION_PATTERN, RELATION_START};
use crate::cypher_scan::{MaskedQuery, TextEdit};

/// Node occurrence whose closing paren directly precedes `pos`, ignoring whitespace
fn node_ending_before<'a>(
    nodes: &'a [NodeOccurrence],
    text: &str,
    pos: usize,
) -> Option<&'a NodeOccurrence> {
    let end = text[..pos].trim_end().len();
    nodes.iter().find(|node| node.span.end == end)
}

/// Node occurrence whose opening paren directly follows `pos`, ignoring whitespace
fn node_starting_after<'a>(
    nodes: &'a [NodeOccurrence],
    text: &str,
    pos: usize,
) -> Option<&'a NodeOccurrence> {
    let rest = &text[pos..];
    let start = pos + (rest.len() - rest.trim_start().len());
    nodes.iter().find(|node| node.span.start == start)
}

fn label_of(symbols: &SymbolTable, variable: &str) -> String {
    symbols
        .get(variable)
        .map(|record| record.label.clone())
        .unwrap_or_default()
}

/// Every `-[` / `<-[` must open a fragment [`RELATION_PATTERN`] recognises.
fn check_fragments_complete(masked: &MaskedQuery) -> Result<(), SchemaCheckError> {
    let text = masked.as_str();
    let fragments: Vec<_> = RELATION_PATTERN
        .find_iter(text)
        .map(|fragment| fragment.range())
        .collect();

    for start in RELATION_START.find_iter(text) {
        if fragments
            .iter()
            .any(|fragment| fragment.contains(&start.start()))
        {
            continue;
        }
        let end = text[start.end()..]
            .find(']')
            .map_or(text.len(), |close| start.end() + close + 1);
        return Err(SchemaCheckError::PatternExtraction {
            fragment: text[start.start()..end].to_string(),
            offset: masked.to_original(start.start()),
            reason: "unrecognised relation fragment",
        });
    }

    Ok(())
}

/// Record every relation fragment of the query in `symbols`.
///
/// Must run after [`extract_node_patterns`](super::node_extractor::extract_node_patterns),
/// whose occurrences are passed in as `nodes`.
pub(crate) fn extract_relation_patterns(
    masked: &MaskedQuery,
    nodes: &[NodeOccurrence],
    symbols: &mut SymbolTable,
    edits: &mut Vec<TextEdit>,
) -> Result<(), SchemaCheckError> {
    let text = masked.as_str();
    check_fragments_complete(masked)?;

    for caps in RELATION_PATTERN.captures_iter(text) {
        let (Some(whole), Some(left), Some(body), Some(right)) = (
            caps.get(0),
            caps.name("left"),
            caps.name("body"),
            caps.name("right"),
        ) else {
            continue;
        };

        let extraction_error = |reason: &'static str| SchemaCheckError::PatternExtraction {
            fragment: whole.as_str().to_string(),
            offset: masked.to_original(whole.start()),
            reason,
        };

        let left_node = node_ending_before(nodes, text, whole.start())
            .ok_or_else(|| extraction_error("no node pattern left of the relation"))?;
        let right_node = node_starting_after(nodes, text, whole.end())
            .ok_or_else(|| extraction_error("no node pattern right of the relation"))?;
        let parsed = parse_relation_body(body.as_str(), body.start())
            .ok_or_else(|| extraction_error("unrecognised relation body"))?;

        let number = symbols.next_pattern_number();
        let variable = match parsed.variable {
            Some(variable) => variable,
            None => {
                let name = format!("relation{}", number);
                edits.push(TextEdit::insert(
                    masked.to_original(parsed.name_insert_at),
                    name.clone(),
                ));
                name
            }
        };

        let points_left = left.as_str().contains('<');
        let points_right = right.as_str().contains('>');
        let (from, to) = if points_left {
            (right_node, left_node)
        } else {
            (left_node, right_node)
        };

        let endpoints = RelationEndpoints {
            from_variable: from.variable.clone(),
            from_label: label_of(symbols, &from.variable),
            to_variable: to.variable.clone(),
            to_label: label_of(symbols, &to.variable),
            undirected: !points_left && !points_right,
            left_edge: masked.to_original(left.start())..masked.to_original(left.end()),
            right_edge: masked.to_original(right.start())..masked.to_original(right.end()),
        };
        log::debug!(
            "relation pattern `{}` -> variable `{}` label `{}` ({} -> {}, undirected: {})",
            whole.as_str(),
            variable,
            parsed.label,
            endpoints.from_variable,
            endpoints.to_variable,
            endpoints.undirected
        );

        let mut record = VariableRecord::relation(&variable, parsed.label, endpoints);
        for property in &parsed.properties {
            record.add_attribute(property);
        }
        symbols.insert(record);
    }

    Ok(())
}
