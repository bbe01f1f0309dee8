use indexmap::IndexMap;
use std::ops::Range;

use crate::graph_catalog::ElementKind;

/// Endpoint and direction information of a relation variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEndpoints {
    pub from_variable: String,
    pub from_label: String,
    pub to_variable: String,
    pub to_label: String,
    pub undirected: bool,
    /// Source range of the edge marker left of the bracket (`-` or `<-`)
    pub left_edge: Range<usize>,
    /// Source range of the edge marker right of the bracket (`-` or `->`)
    pub right_edge: Range<usize>,
}

/// Everything the validator learned about one pattern variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRecord {
    pub name: String,
    pub kind: ElementKind,
    /// Empty for untyped variables
    pub label: String,
    /// Attributes referenced anywhere in the query, first-seen order, no repeats
    pub attributes: Vec<String>,
    /// The other name of an `x AS y` binding, set on both records
    pub alias: Option<String>,
    /// Present for relation variables only
    pub endpoints: Option<RelationEndpoints>,
}

impl VariableRecord {
    pub fn node(name: impl Into<String>, label: impl Into<String>) -> Self {
        VariableRecord {
            name: name.into(),
            kind: ElementKind::Node,
            label: label.into(),
            attributes: Vec::new(),
            alias: None,
            endpoints: None,
        }
    }

    pub fn relation(
        name: impl Into<String>,
        label: impl Into<String>,
        endpoints: RelationEndpoints,
    ) -> Self {
        VariableRecord {
            name: name.into(),
            kind: ElementKind::Relation,
            label: label.into(),
            attributes: Vec::new(),
            alias: None,
            endpoints: Some(endpoints),
        }
    }

    pub fn add_attribute(&mut self, attribute: &str) {
        if !self.attributes.iter().any(|existing| existing == attribute) {
            self.attributes.push(attribute.to_string());
        }
    }

    pub fn is_relation(&self) -> bool {
        self.kind == ElementKind::Relation
    }

    pub fn is_untyped(&self) -> bool {
        self.label.trim().is_empty()
    }
}

/// Variable name to record mapping for one validation call, in declaration
/// order, plus the counter used to synthesize names for anonymous patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    variables: IndexMap<String, VariableRecord>,
    pattern_counter: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next pattern number. Every extracted node or relation
    /// occurrence claims one, named or not.
    pub fn next_pattern_number(&mut self) -> usize {
        let number = self.pattern_counter;
        self.pattern_counter += 1;
        number
    }

    pub fn get(&self, name: &str) -> Option<&VariableRecord> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut VariableRecord> {
        self.variables.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Insert or replace a record under its own name.
    pub fn insert(&mut self, record: VariableRecord) {
        self.variables.insert(record.name.clone(), record);
    }

    /// Record a node occurrence. A repeated occurrence of a known node keeps
    /// the first label it was given and adds any new property keys.
    pub fn merge_node(&mut self, name: &str, label: &str, properties: &[String]) {
        let record = self
            .variables
            .entry(name.to_string())
            .or_insert_with(|| VariableRecord::node(name, label));
        if record.is_untyped() && !label.is_empty() {
            record.label = label.to_string();
        }
        for property in properties {
            record.add_attribute(property);
        }
    }

    /// Bind `alias` to a copy of `source`'s record and link the two names.
    /// Returns false when `source` is unknown.
    pub fn link_alias(&mut self, source: &str, alias: &str) -> bool {
        let Some(record) = self.variables.get_mut(source) else {
            return false;
        };
        record.alias = Some(alias.to_string());

        let mut copy = record.clone();
        copy.name = alias.to_string();
        copy.alias = Some(source.to_string());
        self.variables.insert(alias.to_string(), copy);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableRecord> {
        self.variables.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(|name| name.as_str())
    }

    /// (name, alias) pairs in declaration order
    pub fn variables(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.variables
            .values()
            .map(|record| (record.name.as_str(), record.alias.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn relation_count(&self) -> usize {
        self.iter().filter(|record| record.is_relation()).count()
    }
}
