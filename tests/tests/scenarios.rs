mod common;
use anyhow::Result;
use common::*;
use sieve::{compile_query, CompileError, ParseError};

#[test]
fn test_integer_equality_query() -> Result<()> {
    let predicate = compile_query::<Person>("eq('Age','30')")?;
    assert!(predicate.evaluate(&Person::new("Ana", 30)));
    assert!(!predicate.evaluate(&Person::new("Ana", 31)));
    assert!(!predicate.evaluate(&Person::new("Ana", -30)));
    Ok(())
}

#[test]
fn test_starts_with_and_greater_than() -> Result<()> {
    let predicate = compile_query::<Person>("sw('Name','Jo')+AND+gt('Age','18')")?;
    assert_eq!(matching(&predicate), vec!["Joan"]);

    assert!(predicate.evaluate(&Person::new("Jo", 19)));
    assert!(!predicate.evaluate(&Person::new("Jo", 18)));
    // prefix matching is case-sensitive
    assert!(!predicate.evaluate(&Person::new("joan", 40)));
    Ok(())
}

#[derive(Debug, sieve::Record)]
struct Flagged {
    #[record(rename = "F")]
    flag: i32,
}

#[test]
fn test_single_letter_property() -> Result<()> {
    let query = sieveql::parse_selection("eq('F','1')")?;
    assert_eq!(query.clauses[0].path.steps, vec!["F"]);

    let predicate = compile_query::<Flagged>("eq('F','1')")?;
    assert!(predicate.evaluate(&Flagged { flag: 1 }));
    assert!(!predicate.evaluate(&Flagged { flag: 0 }));
    Ok(())
}

#[test]
fn test_missing_value_is_malformed() {
    let err = compile_query::<Person>("eq('Name')").unwrap_err();
    assert!(err.is_malformed_query());
    assert!(matches!(err, CompileError::Parse(ParseError::Malformed { reason: "missing value", .. })));
}

#[test]
fn test_malformed_queries() {
    for text in [
        "",
        "eq('', 'x')",
        "eq('Name', [])",
        "eq('Name', 'x')+AND+",
        "+OR+eq('Name', 'x')",
        "eq('Name', 'x')+AND++OR+eq('Age', '1')",
        "eq('.Name', 'x')",
        "eq('Name' 'x')",
    ] {
        let err = compile_query::<Person>(text).unwrap_err();
        assert!(err.is_malformed_query(), "{:?} should be malformed, got {:?}", text, err);
    }
}

#[test]
fn test_unknown_codes() {
    let err = compile_query::<Person>("zz('Name','x')").unwrap_err();
    assert_eq!(err, CompileError::Parse(ParseError::UnknownOperator("zz".into())));

    let err = compile_query::<Person>("eq('Name','x')+XOR+eq('Age','1')").unwrap_err();
    assert_eq!(err, CompileError::Parse(ParseError::UnknownComposition("XOR".into())));
}

#[test]
fn test_query_text_is_case_insensitive_for_codes() -> Result<()> {
    let predicate = compile_query::<Person>("SW('Name','Jo')+and+GTE('Age','31')")?;
    assert_eq!(matching(&predicate), vec!["Joan"]);
    Ok(())
}
