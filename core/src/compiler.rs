//! Turns comparisons and query text into [`CompiledPredicate`]s.

use crate::accessor::compile_value_accessor;
use crate::error::CompileError;
use crate::functions::{equal_ignore_case, Function};
use crate::predicate::{compose, CompiledPredicate};
use crate::schema::Record;
use crate::types::{classify, validate_operator, TypeCategory};
use crate::value::{coerce, FieldType, Value, ValueType};
use sieveql::ast::{ComparisonOperator, PathExpr, QueryClause};
use sieveql::error::ParseError;
use std::cmp::Ordering;

/// Compile a single `path operator value` comparison over `T`.
///
/// The operand is coerced to the property's type here, so the returned predicate never fails.
pub fn compile_comparison<T: Record>(
    path: &str,
    value: impl Into<Value>,
    operator: ComparisonOperator,
) -> Result<CompiledPredicate<T>, CompileError> {
    let path = sieveql::parse_path(path)?;
    compile_path_comparison(&path, value.into(), operator)
}

/// Parse `text` and compile every clause into one predicate.
#[cfg_attr(feature = "instrument", tracing::instrument(level = "debug", skip_all, fields(query = %text)))]
pub fn compile_query<T: Record>(text: &str) -> Result<CompiledPredicate<T>, CompileError> {
    let mut predicates = Vec::new();
    for clause in sieveql::parse_query(text)? {
        let clause = clause?;
        predicates.push(compile_clause::<T>(&clause)?);
    }
    fold(predicates)
}

/// Compile already parsed clauses, in order.
pub fn compile_clauses<T: Record>(clauses: impl IntoIterator<Item = QueryClause>) -> Result<CompiledPredicate<T>, CompileError> {
    let predicates = clauses.into_iter().map(|clause| compile_clause::<T>(&clause)).collect::<Result<Vec<_>, _>>()?;
    fold(predicates)
}

struct ClausePredicate<T> {
    clause: QueryClause,
    predicate: CompiledPredicate<T>,
}

fn compile_clause<T: Record>(clause: &QueryClause) -> Result<ClausePredicate<T>, CompileError> {
    let predicate = compile_path_comparison(&clause.path, Value::from(&clause.value), clause.operator)?;
    Ok(ClausePredicate { clause: clause.clone(), predicate })
}

fn fold<T: Record>(predicates: Vec<ClausePredicate<T>>) -> Result<CompiledPredicate<T>, CompileError> {
    let mut predicates = predicates.into_iter();
    let first = predicates
        .next()
        .ok_or_else(|| CompileError::Parse(ParseError::Malformed { clause: String::new(), reason: "empty query" }))?;

    // a composition on the first clause has nothing to join and is ignored
    let rest = predicates
        .map(|ClausePredicate { clause, predicate }| match clause.composition {
            Some(composition) => Ok((composition, predicate)),
            None => Err(CompileError::Parse(ParseError::Malformed { clause: clause.to_string(), reason: "missing composition" })),
        })
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!("composing {} clauses", rest.len() + 1);

    Ok(compose(first.predicate, rest))
}

fn compile_path_comparison<T: Record>(
    path: &PathExpr,
    value: Value,
    operator: ComparisonOperator,
) -> Result<CompiledPredicate<T>, CompileError> {
    let accessor = compile_value_accessor::<T>(path)?;
    let property_type = accessor.field_type().clone();
    let (category, _nullable) = classify(&property_type);

    // the operand list is the container and the property value is the element searched for
    let checked = match operator {
        ComparisonOperator::ContainsOnValue => TypeCategory::Collection(Box::new(category.clone())),
        _ => category.clone(),
    };
    validate_operator(&checked, operator)?;

    let function = Function::lookup(operator, &category);
    if function.is_none() && !matches!(operator, ComparisonOperator::Equal | ComparisonOperator::NotEqual) && !operator.is_relational() {
        return Err(CompileError::Internal(format!("no implementation of `{}` for {} properties", operator, category)));
    }

    let target = operand_type(operator, &category, &property_type);
    let operand = coerce(value, &target).map_err(|source| CompileError::Coercion { path: path.to_string(), source })?;
    tracing::trace!("coerced operand for {} to {}: {}", path, target, operand);
    tracing::debug!("compiled {}('{}') over {} ({} property)", operator, path, T::schema().name, category);

    Ok(CompiledPredicate::new(move |record: &T| evaluate(operator, function, &accessor.get(record), &operand)))
}

/// The type the operand must be coerced to for `operator` on a property of `property_type`.
fn operand_type(operator: ComparisonOperator, category: &TypeCategory, property_type: &FieldType) -> FieldType {
    match (operator, category, &property_type.ty) {
        (ComparisonOperator::ContainsOnValue, _, _) => FieldType::list_of(property_type.clone()),
        (ComparisonOperator::Contains, TypeCategory::Collection(_), ValueType::List(element)) => (**element).clone(),
        (ComparisonOperator::Contains | ComparisonOperator::StartsWith | ComparisonOperator::EndsWith, TypeCategory::String, _) => {
            FieldType::required(ValueType::String)
        }
        _ => property_type.clone(),
    }
}

fn evaluate(operator: ComparisonOperator, function: Option<Function>, subject: &Value, operand: &Value) -> bool {
    use ComparisonOperator as Op;

    // a null property is only equal to null, except as an element looked up in the operand list
    if subject.is_null() && operator != Op::ContainsOnValue {
        return match operator {
            Op::Equal => operand.is_null(),
            Op::NotEqual => !operand.is_null(),
            _ => false,
        };
    }

    if let Some(function) = function {
        let matched = function.apply(subject, operand);
        return if operator == Op::NotEqual { !matched } else { matched };
    }

    match operator {
        Op::Equal => equal_ignore_case(subject, operand),
        Op::NotEqual => !equal_ignore_case(subject, operand),
        Op::LessThan => compare(subject, operand) == Some(Ordering::Less),
        Op::LessThanOrEqual => matches!(compare(subject, operand), Some(Ordering::Less | Ordering::Equal)),
        Op::GreaterThan => compare(subject, operand) == Some(Ordering::Greater),
        Op::GreaterThanOrEqual => matches!(compare(subject, operand), Some(Ordering::Greater | Ordering::Equal)),
        _ => false,
    }
}

fn compare(subject: &Value, operand: &Value) -> Option<Ordering> {
    if operand.is_null() {
        return None;
    }
    subject.partial_cmp(operand)
}
