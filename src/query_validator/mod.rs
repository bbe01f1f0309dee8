//! Schema conformance checking for Cypher queries.
//!
//! [`CypherValidator`] recovers a symbol table of pattern variables straight
//! from query text and checks each variable against a [`SchemaCatalog`]:
//!
//! 1. Mask string literals
//! 2. Extract node patterns, naming anonymous ones
//! 3. Link `x AS y` aliases
//! 4. Isolate and extract relation fragments, naming anonymous ones
//! 5. Link aliases again (relation variables now exist)
//! 6. Collect dotted attribute references
//! 7. Check label, kind, attributes and direction of every variable,
//!    relaxing a relation whose reverse orientation is allowed
//!
//! All state of a validation lives in the call: the symbol table and the
//! pending text edits are locals, and the catalog is read-only. The finished
//! table is published as an immutable snapshot for [`CypherValidator::count_relations`]
//! and [`CypherValidator::include_all_variables`].
//!
//! # Example
//!
//! ```ignore
//! let validator = CypherValidator::new().with_schema_catalog(catalog);
//! let result = validator.validate_schema("MATCH (c:City)-[:LIVES_IN]->(p:Person) RETURN c")?;
//! let (query, valid) = result.verdict();
//! ```

mod alias_resolver;
mod attribute_collector;
mod direction_corrector;
pub mod errors;
pub mod grammar;
mod node_extractor;
mod relation_extractor;
mod schema_matcher;
pub mod symbol_table;

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{ConfigError, ValidatorConfig};
use crate::cypher_scan::{self, apply_edits, MaskedQuery, TextEdit};
use crate::graph_catalog::{load_schema_catalog, SchemaCatalog};

pub use errors::{SchemaCheckError, ValidatorError};
pub use grammar::{Neo4jHttpRunner, TransactionError, WriteTransactionRunner};
pub use symbol_table::{RelationEndpoints, SymbolTable, VariableRecord};

use alias_resolver::resolve_aliases;
use attribute_collector::collect_attributes;
use direction_corrector::repair_direction;
use node_extractor::extract_node_patterns;
use relation_extractor::extract_relation_patterns;
use schema_matcher::{check_direction, check_element, check_occurrence_label};

/// Outcome of one schema validation.
#[derive(Debug, Clone)]
pub struct SchemaValidation {
    /// The input with synthesized names and direction repairs applied when
    /// valid; the input unchanged otherwise
    pub query: String,
    pub outcome: Result<(), SchemaCheckError>,
    pub symbols: Arc<SymbolTable>,
}

impl SchemaValidation {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Project to the plain (query, validity) pair.
    pub fn verdict(self) -> (String, bool) {
        let valid = self.is_valid();
        (self.query, valid)
    }
}

/// Validate `query` against `catalog` with a fresh symbol table.
pub fn analyze_query(query: &str, catalog: &SchemaCatalog) -> SchemaValidation {
    let mut symbols = SymbolTable::new();
    let mut edits = Vec::new();
    let outcome = run_schema_checks(query, catalog, &mut symbols, &mut edits);

    let query = match &outcome {
        Ok(()) => apply_edits(query, edits),
        Err(e) => {
            log::debug!("Schema validation failed: {}", e);
            query.to_string()
        }
    };

    SchemaValidation {
        query,
        outcome,
        symbols: Arc::new(symbols),
    }
}

fn run_schema_checks(
    query: &str,
    catalog: &SchemaCatalog,
    symbols: &mut SymbolTable,
    edits: &mut Vec<TextEdit>,
) -> Result<(), SchemaCheckError> {
    let masked = MaskedQuery::new(query);

    let nodes = extract_node_patterns(&masked, symbols, edits);
    resolve_aliases(masked.as_str(), symbols);
    extract_relation_patterns(&masked, &nodes, symbols, edits)?;
    resolve_aliases(masked.as_str(), symbols);
    collect_attributes(&masked, symbols)?;

    let names: Vec<String> = symbols.names().map(str::to_string).collect();
    for name in names {
        let direction = match symbols.get(&name) {
            Some(record) => {
                check_element(record, catalog)?;
                check_direction(record, catalog)
            }
            None => continue,
        };

        if let Err(mismatch) = direction {
            if !repair_direction(symbols, &name, catalog, edits) {
                return Err(mismatch);
            }
        }
    }

    for node in &nodes {
        if let Some(record) = symbols.get(&node.variable) {
            check_occurrence_label(record, &node.label, catalog)?;
        }
    }

    Ok(())
}

/// Schema and grammar validation of Cypher queries.
///
/// Each feature is off until it is given what it needs: a schema catalog for
/// schema validation, a transaction runner for grammar validation.
#[derive(Default)]
pub struct CypherValidator {
    schema: Option<Arc<SchemaCatalog>>,
    grammar: Option<Arc<dyn WriteTransactionRunner>>,
    last_symbols: RwLock<Option<Arc<SymbolTable>>>,
}

impl CypherValidator {
    /// A validator with every feature turned off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validator with the features `config` enables.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ValidatorError> {
        config.check()?;

        let mut validator = Self::new();
        if config.grammar_validation {
            validator.grammar = Some(Arc::new(Neo4jHttpRunner::from_config(config)?));
        }
        if config.schema_validation {
            if let Some(path) = &config.schema_path {
                validator.schema = Some(Arc::new(load_schema_catalog(path)?));
            }
        }
        Ok(validator)
    }

    pub fn with_schema_catalog(mut self, catalog: SchemaCatalog) -> Self {
        self.schema = Some(Arc::new(catalog));
        self
    }

    pub fn with_grammar_runner(mut self, runner: Arc<dyn WriteTransactionRunner>) -> Self {
        self.grammar = Some(runner);
        self
    }

    /// Turn on schema validation with the schema file at `schema_path`.
    pub fn enable_schema_validation(
        &mut self,
        schema_path: impl AsRef<Path>,
    ) -> Result<(), ValidatorError> {
        let config = ValidatorConfig {
            schema_validation: true,
            schema_path: Some(schema_path.as_ref().to_path_buf()),
            ..Default::default()
        };
        config.check_features()?;
        self.schema = Some(Arc::new(load_schema_catalog(schema_path)?));
        Ok(())
    }

    /// Turn on grammar validation against the Neo4j HTTP API at `url`.
    pub fn enable_grammar_validation(
        &mut self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ValidatorError> {
        let config = ValidatorConfig {
            grammar_validation: true,
            neo4j_url: Some(url.to_string()),
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            ..Default::default()
        };
        config.check_features()?;
        self.grammar = Some(Arc::new(Neo4jHttpRunner::from_config(&config)?));
        Ok(())
    }

    pub fn schema_catalog(&self) -> Option<&SchemaCatalog> {
        self.schema.as_deref()
    }

    fn catalog(&self) -> Result<&SchemaCatalog, ConfigError> {
        self.schema.as_deref().ok_or(ConfigError::FeatureDisabled {
            feature: "Schema validation",
        })
    }

    /// Whether the database accepts `query` as a write transaction.
    pub async fn validate_grammar(&self, query: &str) -> Result<bool, ValidatorError> {
        let runner = self.grammar.as_ref().ok_or(ConfigError::FeatureDisabled {
            feature: "Grammar validation",
        })?;
        Ok(grammar::check_grammar(runner.as_ref(), query).await)
    }

    /// Check `query` against the schema catalog.
    pub fn validate_schema(&self, query: &str) -> Result<SchemaValidation, ValidatorError> {
        let validation = analyze_query(query, self.catalog()?);
        *self
            .last_symbols
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&validation.symbols));
        Ok(validation)
    }

    /// The symbol table built by the most recent [`validate_schema`](Self::validate_schema).
    pub fn last_symbol_table(&self) -> Option<Arc<SymbolTable>> {
        self.last_symbols
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn require_analysis(&self) -> Result<Arc<SymbolTable>, ValidatorError> {
        self.catalog()?;
        self.last_symbol_table().ok_or(ValidatorError::NoAnalysis)
    }

    /// Drop repeated items of the final RETURN list.
    pub fn dedupe_return_variables(&self, query: &str) -> Result<String, ValidatorError> {
        cypher_scan::dedupe_return_variables(query).ok_or(ValidatorError::NoReturnClause)
    }

    /// Return every variable of the last analysed query, one name per alias pair.
    pub fn include_all_variables(&self, query: &str) -> Result<String, ValidatorError> {
        let symbols = self.require_analysis()?;
        cypher_scan::include_variables(query, symbols.variables())
            .ok_or(ValidatorError::NoReturnClause)
    }

    /// Number of relation variables in the last analysed query.
    pub fn count_relations(&self) -> Result<usize, ValidatorError> {
        Ok(self.require_analysis()?.relation_count())
    }

    pub fn queries_equivalent_modulo_whitespace(&self, query1: &str, query2: &str) -> bool {
        cypher_scan::queries_equivalent_modulo_whitespace(query1, query2)
    }
}
