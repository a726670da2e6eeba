//! # Sieve
//!
//! Filter collections of typed records with predicates compiled from a comparison triple or
//! from a small query language.
//!
//! ## Query text
//!
//! ```text
//! sw('Name', 'Jo')+AND+gt('Age', '18')
//! in('Status', ['new', 'open'])+OR+eq('Owner', '$null$')
//! ```
//!
//! | Code | Operator | | Code | Operator |
//! |---|---|---|---|---|
//! | `eq` | Equal | | `gte` | GreaterThanOrEqual |
//! | `ne` | NotEqual | | `ct` | Contains |
//! | `lt` | LessThan | | `in` | ContainsOnValue |
//! | `lte` | LessThanOrEqual | | `sw` | StartsWith |
//! | `gt` | GreaterThan | | `ew` | EndsWith |
//!
//! Clauses are folded left to right with the newest clause as the left operand, so
//! `a+AND+b+OR+c` evaluates as `c || (b && a)`. There is no grouping.
//!
//! **Note:** `eq` and `ne` compare strings case-insensitively. This cannot be turned off.
//!
//! ## Example
//!
//! ```rust
//! use sieve::{compile_query, Record};
//!
//! #[derive(Record)]
//! struct Person {
//!     #[record(rename = "Name")]
//!     name: String,
//!     #[record(rename = "Age")]
//!     age: i32,
//! }
//!
//! # fn main() -> Result<(), sieve::CompileError> {
//! let adults = compile_query::<Person>("sw('Name','Jo')+AND+gt('Age','18')")?;
//! let people = vec![Person { name: "Joan".into(), age: 31 }, Person { name: "John".into(), age: 12 }];
//! let names: Vec<&str> = adults.filter(&people).map(|p| p.name.as_str()).collect();
//! assert_eq!(names, vec!["Joan"]);
//! # Ok(())
//! # }
//! ```

pub use sieve_core as core;
#[cfg(feature = "derive")]
pub use sieve_derive as derive;
pub use sieveql;

pub use sieve_core::{
    accessor::{compile_accessor, compile_value_accessor, Accessor, ValueAccessor},
    and, classify, coerce,
    compiler::{compile_clauses, compile_comparison, compile_query},
    compose,
    error::CompileError,
    legal_operators, not, or,
    value::{CoercionError, FieldType, ObjectType, Value, ValueType},
    validate_operator, CompiledPredicate, ComparisonOperator, CompositionOperator, FieldDef, FilterIterator, FilterResult, Property,
    Record, Schema, TypeCategory,
};
pub use sieveql::{ast::Query, error::ParseError};

#[cfg(feature = "derive")]
pub use sieve_derive::*;
