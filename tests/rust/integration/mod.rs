//! Integration tests - Whole validation runs through the public API
//!
//! Schema files are written to temporary directories. Grammar checks use an
//! in-process transaction runner, so no Neo4j instance is needed.

mod config_tests;
mod grammar_tests;
