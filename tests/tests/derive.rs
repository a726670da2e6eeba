mod common;
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use common::*;
use sieve::{
    compile_accessor, compile_query, CompileError, FieldDef, FieldType, ObjectType, Property, Record, Schema, Value, ValueType,
};
use std::collections::{BTreeSet, VecDeque};
use ulid::Ulid;

#[test]
fn test_schema_shape() {
    let schema = Person::schema();
    assert_eq!(schema.name, "Person");
    let names: Vec<&str> = schema.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["Name", "Age", "nickname", "address", "tags", "scores"]);
    assert_eq!(schema.fields[1], FieldDef::new("Age", FieldType::required(ValueType::I32)));
    assert_eq!(schema.fields[2].ty, FieldType::nullable(ValueType::String));
    assert_eq!(schema.fields[4].ty, FieldType::list_of(FieldType::required(ValueType::String)));

    let address = &schema.fields[3].ty;
    assert!(address.nullable);
    match &address.ty {
        ValueType::Object(object) => assert_eq!(object.schema(), Address::schema()),
        other => panic!("expected an object type, got {}", other),
    }
}

#[test]
fn test_value_round_trip() {
    let person = people().remove(0);
    let restored = Person::from_value(person.to_value()).expect("object value");
    // skipped fields come back as their default
    assert_eq!(restored, Person { cached_rank: 0, ..person });
}

#[test]
fn test_field_values() {
    let person = people().remove(0);
    assert_eq!(person.field_value(&[1]), Some(Value::I32(31)));
    assert_eq!(person.field_value(&[3, 0]), Some(Value::from("Lisbon")));
    assert_eq!(person.field_value(&[3, 1]), Some(Value::U32(1100)));
    assert_eq!(person.field_value(&[9]), None);
    assert_eq!(Person::new("Nobody", 1).field_value(&[3, 0]), Some(Value::Null));
}

#[derive(Debug, Clone, Record)]
#[record(rename = "Node")]
struct TreeNode {
    #[record(rename = "Value")]
    value: i64,
    next: Option<Box<TreeNode>>,
}

#[test]
fn test_recursive_records() -> Result<()> {
    let chain = TreeNode { value: 1, next: Some(Box::new(TreeNode { value: 2, next: Some(Box::new(TreeNode { value: 3, next: None })) })) };

    let predicate = compile_query::<TreeNode>("eq('next.next.Value','3')")?;
    assert!(predicate.evaluate(&chain));
    let predicate = compile_query::<TreeNode>("eq('next.next.next.Value','$null$')")?;
    assert!(predicate.evaluate(&chain));

    let err = compile_query::<TreeNode>("eq('next.Missing','1')").unwrap_err();
    assert!(matches!(err, CompileError::UnknownProperty { type_name, .. } if type_name == "Node"));
    Ok(())
}

#[derive(Debug, Clone, Record)]
struct Everything {
    stamp: DateTime<Utc>,
    token: Ulid,
    queue: VecDeque<u8>,
    set: BTreeSet<String>,
    size: usize,
    r#type: char,
}

#[test]
fn test_builtin_property_types() -> Result<()> {
    let record = Everything {
        stamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        token: Ulid::from_parts(7, 9),
        queue: VecDeque::from(vec![1, 2]),
        set: ["a".to_string(), "b".to_string()].into_iter().collect(),
        size: 10,
        r#type: 'k',
    };

    let checks = [
        "gt('stamp','2024-03-01T11:59:59Z')",
        "lte('stamp','2024-03-01 12:00')",
        "ne('token','01ARZ3NDEKTSV4RRFFQ69G5FAV')",
        "eq('queue',['1','2'])",
        "ct('set','B')",
        "gte('size','10')",
        "eq('type','k')",
    ];
    for query in checks {
        assert!(compile_query::<Everything>(query)?.evaluate(&record), "{}", query);
    }

    let token = compile_accessor::<Everything, Ulid>("token")?;
    assert_eq!(token.get(&record), Some(record.token));
    Ok(())
}

#[test]
fn test_object_type_equality_is_by_name() {
    let first = ObjectType::new("Address", Address::schema);
    let second = ObjectType::new("Address", || Schema::new("Address", Vec::new()));
    assert_eq!(first, second);
    assert_eq!(Address::property_type(), FieldType::required(ValueType::Object(first)));
}
