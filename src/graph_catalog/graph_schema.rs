use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::config::SchemaRecord;
use super::errors::GraphSchemaError;

/// Whether a label names a node type or a relation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Node,
    Relation,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => f.write_str("Node"),
            ElementKind::Relation => f.write_str("Relation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSchema {
    pub label: String,
    pub attributes: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipSchema {
    pub label: String,
    pub attributes: HashSet<String>,
    /// Allowed (from label, to label) pairs, one per schema record
    pub endpoint_pairs: HashSet<(String, String)>,
}

impl RelationshipSchema {
    pub fn allows(&self, from_label: &str, to_label: &str) -> bool {
        self.endpoint_pairs
            .contains(&(from_label.to_string(), to_label.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSchemaElement {
    Node(NodeSchema),
    Rel(RelationshipSchema),
}

impl GraphSchemaElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            GraphSchemaElement::Node(_) => ElementKind::Node,
            GraphSchemaElement::Rel(_) => ElementKind::Relation,
        }
    }

    pub fn attributes(&self) -> &HashSet<String> {
        match self {
            GraphSchemaElement::Node(node) => &node.attributes,
            GraphSchemaElement::Rel(rel) => &rel.attributes,
        }
    }

    pub fn as_relationship(&self) -> Option<&RelationshipSchema> {
        match self {
            GraphSchemaElement::Rel(rel) => Some(rel),
            GraphSchemaElement::Node(_) => None,
        }
    }
}

/// Label to schema element mapping. Built once, read-only afterwards, so a
/// single catalog can be shared by any number of concurrent validations.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    elements: HashMap<String, GraphSchemaElement>,
}

impl SchemaCatalog {
    /// Build a catalog from schema records in order.
    ///
    /// A node label may appear once. A relation label may appear many times;
    /// every record adds its (From, To) pair and its attributes to the same
    /// entry.
    pub fn build(records: &[SchemaRecord]) -> Result<Self, GraphSchemaError> {
        let mut elements: HashMap<String, GraphSchemaElement> = HashMap::new();

        for record in records {
            match record {
                SchemaRecord::Node { label, attributes } => {
                    match elements.get(label) {
                        Some(GraphSchemaElement::Node(_)) => {
                            return Err(GraphSchemaError::DuplicateNodeLabel {
                                label: label.clone(),
                            });
                        }
                        Some(GraphSchemaElement::Rel(_)) => {
                            return Err(GraphSchemaError::LabelKindConflict {
                                label: label.clone(),
                            });
                        }
                        None => {}
                    }
                    elements.insert(
                        label.clone(),
                        GraphSchemaElement::Node(NodeSchema {
                            label: label.clone(),
                            attributes: attributes.iter().cloned().collect(),
                        }),
                    );
                }
                SchemaRecord::Relation {
                    label,
                    attributes,
                    from,
                    to,
                } => {
                    let entry = elements.entry(label.clone()).or_insert_with(|| {
                        GraphSchemaElement::Rel(RelationshipSchema {
                            label: label.clone(),
                            attributes: HashSet::new(),
                            endpoint_pairs: HashSet::new(),
                        })
                    });
                    let GraphSchemaElement::Rel(rel) = entry else {
                        return Err(GraphSchemaError::LabelKindConflict {
                            label: label.clone(),
                        });
                    };
                    rel.attributes.extend(attributes.iter().cloned());
                    rel.endpoint_pairs.insert((from.clone(), to.clone()));
                }
            }
        }

        Ok(SchemaCatalog { elements })
    }

    pub fn get(&self, label: &str) -> Option<&GraphSchemaElement> {
        self.elements.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.elements.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(|label| label.as_str())
    }
}
