//! Errors raised while compiling predicates.
//!
//! Everything fails at compile time; a predicate that compiled never fails when evaluated.

use crate::types::TypeCategory;
use crate::value::CoercionError;
use sieveql::ast::ComparisonOperator;
use sieveql::error::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    /// The query text itself is malformed or names an unknown code
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A path segment does not name a field of the type it is applied to
    #[error("unknown property `{segment}` on {type_name} (path `{path}`)")]
    UnknownProperty { type_name: String, segment: String, path: String },

    /// The operator is not legal for the property's type category
    #[error("operator `{operator}` is not legal for {category} properties")]
    IllegalOperator { operator: ComparisonOperator, category: TypeCategory },

    /// The operand could not be converted to the property's type
    #[error("cannot use value for `{path}`: {source}")]
    Coercion { path: String, source: CoercionError },

    /// A typed accessor was requested with a type that does not match the property
    #[error("property `{path}` is {actual}, not {expected}")]
    AccessorType { path: String, expected: String, actual: String },

    /// An operator reached evaluation without a matching implementation
    #[error("internal error: {0}")]
    Internal(String),
}

impl CompileError {
    /// True when the failure is a grammar problem in the query text.
    pub fn is_malformed_query(&self) -> bool { matches!(self, CompileError::Parse(e) if e.is_malformed()) }
}
