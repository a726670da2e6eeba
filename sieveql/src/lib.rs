//! # Sieve Query Language
//!
//! A flat, composable clause syntax for record filters:
//!
//! ```text
//! sw('Name', 'Jo')+AND+gt('Age', '18')+OR+in('Status', ['new', 'open'])
//! ```
//!
//! Each clause is `OPCODE('path', 'value')` or `OPCODE('path', ['v1', 'v2'])`. Clauses are
//! joined left to right by `+AND+` / `+OR+`; there is no grouping. The quoted literal
//! `$null$` (any case, anywhere inside a value) stands for a real null.
//!
//! This crate only turns text into [`ast::QueryClause`]s. Typing and compiling them into
//! predicates is done by `sieve-core`.

pub mod ast;
mod conversion;
pub mod error;
pub mod grammar;
pub mod parser;

pub use parser::{parse_clause, parse_path, parse_query, parse_selection, Clauses};
