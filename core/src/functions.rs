//! Built-in functions backing the containment, prefix/suffix and sequence-equality operators.

use crate::types::TypeCategory;
use crate::value::Value;
use sieveql::ast::ComparisonOperator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Case-sensitive substring test
    StringContains,
    StartsWith,
    EndsWith,
    /// Ordered, element-wise equality of two lists
    SequenceEqual,
    /// List membership, comparing strings case-insensitively
    ContainsIgnoreCase,
    /// List membership by native equality
    Contains,
    /// Membership of the property value in the operand list
    ContainsOnValue,
}

impl Function {
    /// The function implementing `operator` for properties of `category`, if one is needed.
    /// Scalar equality and the relational operators are evaluated natively and have none.
    pub fn lookup(operator: ComparisonOperator, category: &TypeCategory) -> Option<Function> {
        use ComparisonOperator as Op;
        Some(match (operator, category) {
            (Op::Contains, TypeCategory::String) => Function::StringContains,
            (Op::StartsWith, TypeCategory::String) => Function::StartsWith,
            (Op::EndsWith, TypeCategory::String) => Function::EndsWith,
            (Op::Equal | Op::NotEqual, TypeCategory::Collection(_)) => Function::SequenceEqual,
            (Op::Contains, TypeCategory::Collection(element)) if **element == TypeCategory::String => Function::ContainsIgnoreCase,
            (Op::Contains, TypeCategory::Collection(_)) => Function::Contains,
            (Op::ContainsOnValue, _) => Function::ContainsOnValue,
            _ => return None,
        })
    }

    /// Apply to the property value (`subject`) and the coerced operand.
    pub fn apply(&self, subject: &Value, operand: &Value) -> bool {
        match (self, subject, operand) {
            (Function::StringContains, Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Function::StartsWith, Value::String(s), Value::String(prefix)) => s.starts_with(prefix.as_str()),
            (Function::EndsWith, Value::String(s), Value::String(suffix)) => s.ends_with(suffix.as_str()),
            (Function::SequenceEqual, Value::List(left), Value::List(right)) => left == right,
            (Function::ContainsIgnoreCase, Value::List(items), needle) => items.iter().any(|item| equal_ignore_case(item, needle)),
            (Function::Contains, Value::List(items), needle) => items.contains(needle),
            (Function::ContainsOnValue, element, Value::List(items)) => items.contains(element),
            _ => false,
        }
    }
}

/// Native equality, except that two strings compare case-insensitively.
pub(crate) fn equal_ignore_case(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::String(l), Value::String(r)) => l == r || l.to_lowercase() == r.to_lowercase(),
        _ => left == right,
    }
}
