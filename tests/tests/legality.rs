mod common;
use anyhow::Result;
use chrono::{NaiveDate, TimeDelta};
use common::Address;
use sieve::{
    compile_comparison, compile_value_accessor, legal_operators, CompileError, ComparisonOperator, Property, Record, TypeCategory,
    Value,
};
use uuid::Uuid;

#[derive(Debug, Clone, Record)]
struct Catalog {
    text: String,
    letter: char,
    flag: bool,
    count: i32,
    day: NaiveDate,
    span: TimeDelta,
    id: Uuid,
    items: Vec<i32>,
    child: Address,
}

/// A valid operand for every operator the property's category allows.
fn operand(field: &str, operator: ComparisonOperator) -> Value {
    match field {
        "text" => Value::from("abc"),
        "letter" => Value::from("x"),
        "flag" => Value::from("true"),
        "count" => Value::from("1"),
        "day" => Value::from("2024-01-01"),
        "span" => Value::from("01:00"),
        "id" => Value::from(Uuid::nil().to_string()),
        "items" if operator == ComparisonOperator::Contains => Value::from("1"),
        "items" => Value::from(vec!["1", "2"]),
        "child" => Address { city: "Lisbon".into(), zip: None }.to_value(),
        other => panic!("no operand for {}", other),
    }
}

const FIELDS: [(&str, fn() -> TypeCategory); 9] = [
    ("text", || TypeCategory::String),
    ("letter", || TypeCategory::Char),
    ("flag", || TypeCategory::Boolean),
    ("count", || TypeCategory::Numeric),
    ("day", || TypeCategory::DateTime),
    ("span", || TypeCategory::Duration),
    ("id", || TypeCategory::Identifier),
    ("items", || TypeCategory::Collection(Box::new(TypeCategory::Numeric))),
    ("child", || TypeCategory::Object),
];

#[test]
fn test_categories() -> Result<()> {
    for (field, category) in FIELDS {
        let accessor = compile_value_accessor::<Catalog>(&sieveql::parse_path(field)?)?;
        assert_eq!(sieve::classify(accessor.field_type()).0, category(), "{}", field);
    }
    Ok(())
}

#[test]
fn test_legality_table() {
    for (field, category) in FIELDS {
        let category = category();
        for operator in ComparisonOperator::ALL {
            if operator == ComparisonOperator::ContainsOnValue {
                continue;
            }
            let result = compile_comparison::<Catalog>(field, operand(field, operator), operator);
            if legal_operators(&category).contains(&operator) {
                assert!(result.is_ok(), "{} on {} should compile: {:?}", operator, field, result.err());
            } else {
                match result {
                    Err(CompileError::IllegalOperator { operator: op, category: cat }) => {
                        assert_eq!((op, &cat), (operator, &category));
                    }
                    other => panic!("{} on {} should be illegal, got {:?}", operator, field, other.map(|_| ())),
                }
            }
        }
    }
}

#[test]
fn test_contains_on_value_is_legal_for_every_category() {
    let operands = [
        ("text", vec!["a", "b"]),
        ("letter", vec!["a"]),
        ("flag", vec!["true"]),
        ("count", vec!["1", "2"]),
        ("day", vec!["2024-01-01"]),
        ("span", vec!["00:30"]),
    ];
    for (field, values) in operands {
        let result = compile_comparison::<Catalog>(field, values, ComparisonOperator::ContainsOnValue);
        assert!(result.is_ok(), "in on {}: {:?}", field, result.err());
    }
}

#[test]
fn test_string_operators_reject_arrays() {
    let err = compile_comparison::<Catalog>("text", vec!["a"], ComparisonOperator::StartsWith).unwrap_err();
    assert!(matches!(err, CompileError::Coercion { .. }));
}
