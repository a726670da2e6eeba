//! Type categories and the operator legality table.

use crate::error::CompileError;
use crate::value::{FieldType, ValueType};
use sieveql::ast::ComparisonOperator::{self, *};
use std::fmt;

/// The comparison-relevant family of a property type. Nullability is tracked separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    String,
    Char,
    Boolean,
    Numeric,
    DateTime,
    Duration,
    Identifier,
    Collection(Box<TypeCategory>),
    Object,
}

impl TypeCategory {
    pub fn element(&self) -> Option<&TypeCategory> {
        match self {
            TypeCategory::Collection(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::String => f.write_str("string"),
            TypeCategory::Char => f.write_str("char"),
            TypeCategory::Boolean => f.write_str("boolean"),
            TypeCategory::Numeric => f.write_str("numeric"),
            TypeCategory::DateTime => f.write_str("date/time"),
            TypeCategory::Duration => f.write_str("duration"),
            TypeCategory::Identifier => f.write_str("identifier"),
            TypeCategory::Collection(element) => write!(f, "collection of {}", element),
            TypeCategory::Object => f.write_str("object"),
        }
    }
}

/// Classify a field type, returning its category and whether it is nullable.
///
/// Collections classify their element one level deep; a collection nested inside a collection
/// is treated as an opaque object element.
pub fn classify(ty: &FieldType) -> (TypeCategory, bool) {
    let category = match &ty.ty {
        ValueType::List(element) => TypeCategory::Collection(Box::new(scalar_category(&element.ty))),
        other => scalar_category(other),
    };
    (category, ty.nullable)
}

fn scalar_category(ty: &ValueType) -> TypeCategory {
    match ty {
        ValueType::String => TypeCategory::String,
        ValueType::Char => TypeCategory::Char,
        ValueType::Bool => TypeCategory::Boolean,
        ValueType::Timestamp | ValueType::DateTime | ValueType::Date => TypeCategory::DateTime,
        ValueType::Duration => TypeCategory::Duration,
        ValueType::Uuid | ValueType::Ulid => TypeCategory::Identifier,
        ValueType::List(_) | ValueType::Object(_) => TypeCategory::Object,
        numeric => {
            debug_assert!(numeric.is_numeric());
            TypeCategory::Numeric
        }
    }
}

/// The operators that may be applied to properties of a category.
pub fn legal_operators(category: &TypeCategory) -> &'static [ComparisonOperator] {
    match category {
        TypeCategory::String => &[Equal, NotEqual, Contains, StartsWith, EndsWith],
        TypeCategory::Char | TypeCategory::Boolean | TypeCategory::Identifier | TypeCategory::Object => &[Equal, NotEqual],
        TypeCategory::Numeric | TypeCategory::DateTime | TypeCategory::Duration => {
            &[Equal, NotEqual, LessThan, LessThanOrEqual, GreaterThan, GreaterThanOrEqual]
        }
        TypeCategory::Collection(_) => &[Equal, NotEqual, Contains, ContainsOnValue],
    }
}

pub fn validate_operator(category: &TypeCategory, operator: ComparisonOperator) -> Result<(), CompileError> {
    if legal_operators(category).contains(&operator) {
        Ok(())
    } else {
        Err(CompileError::IllegalOperator { operator, category: category.clone() })
    }
}
