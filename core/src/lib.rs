//! # Sieve core
//!
//! Compiles record filters into predicates. A filter is either a single comparison
//! (`path`, operator, value) or query text in the `sieveql` syntax. Compilation resolves the
//! property path against the record's schema, checks that the operator is legal for the
//! property's type category and coerces the operand to the property's exact type. The resulting
//! [`CompiledPredicate`] cannot fail when evaluated.
//!
//! String equality (`eq`/`ne`) is case-insensitive and this is not configurable. `ct`, `sw` and
//! `ew` on strings are case-sensitive.

pub mod accessor;
pub mod compiler;
pub mod error;
pub mod filter;
pub mod functions;
pub mod predicate;
pub mod property;
pub mod schema;
pub mod types;
pub mod value;


pub use accessor::{compile_accessor, compile_value_accessor, Accessor, ValueAccessor};
pub use compiler::{compile_clauses, compile_comparison, compile_query};
pub use error::CompileError;
pub use filter::{FilterIterator, FilterResult};
pub use predicate::{and, compose, not, or, CompiledPredicate};
pub use property::Property;
pub use schema::{FieldDef, Record, Schema};
pub use types::{classify, legal_operators, validate_operator, TypeCategory};
pub use value::{coerce, CoercionError, FieldType, ObjectType, Value, ValueType};

pub use sieveql::ast::{ComparisonOperator, CompositionOperator};
