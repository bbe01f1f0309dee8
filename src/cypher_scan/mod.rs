//! Text-level scanning of Cypher queries.
//!
//! Nothing here parses the full grammar. These are the span-aware building
//! blocks the schema validator uses to recover pattern variables from raw
//! query text:
//!
//! - [`masking`]: hide string literal contents, keep offsets recoverable
//! - [`patterns`]: node/relation/attribute/RETURN regexes and body parsers
//! - [`edits`]: offset-addressed rewrites applied in one pass
//! - [`return_clause`]: dedupe and extend the final RETURN list

pub mod edits;
pub mod masking;
pub mod patterns;
pub mod return_clause;

pub use edits::{apply_edits, TextEdit};
pub use masking::{mask_string_literals, MaskedQuery};
pub use return_clause::{dedupe_return_variables, include_variables};

/// Compare two queries after collapsing every whitespace run to one space.
pub fn queries_equivalent_modulo_whitespace(query1: &str, query2: &str) -> bool {
    query1.split_whitespace().eq(query2.split_whitespace())
}
