//! Unit tests - Text scanning and RETURN rewriting through the public API
//!
//! None of these need a schema catalog or a database.

mod return_clause_tests;
mod scanning_edge_cases;
