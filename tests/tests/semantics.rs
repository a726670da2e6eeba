mod common;
use anyhow::Result;
use common::*;
use sieve::{and, compile_comparison, compile_query, not, or, CoercionError, CompileError, ComparisonOperator, CompositionOperator};

#[test]
fn test_string_equality_ignores_case() -> Result<()> {
    let predicate = compile_comparison::<Person>("Name", "ABC", ComparisonOperator::Equal)?;
    assert!(predicate.evaluate(&Person::new("abc", 1)));
    assert!(predicate.evaluate(&Person::new("Abc", 1)));
    assert!(!predicate.evaluate(&Person::new("abcd", 1)));

    let predicate = compile_query::<Person>("ne('Name','JOAN')")?;
    assert_eq!(matching(&predicate), vec!["John", "Mary", "joseph"]);
    Ok(())
}

#[test]
fn test_equal_and_not_equal_are_complements() -> Result<()> {
    for age in [17, 18, 31, 45, 99] {
        let equal = compile_comparison::<Person>("Age", age, ComparisonOperator::Equal)?;
        let not_equal = compile_comparison::<Person>("Age", age.to_string(), ComparisonOperator::NotEqual)?;
        for person in people() {
            assert_eq!(equal.evaluate(&person), person.age == age);
            assert_eq!(not_equal.evaluate(&person), !equal.evaluate(&person));
        }
    }
    Ok(())
}

#[test]
fn test_collection_equality_is_ordered() -> Result<()> {
    let predicate = compile_query::<Person>("eq('scores',['1','2','3'])")?;
    assert_eq!(matching(&predicate), vec!["Joan"]);

    let reversed = compile_query::<Person>("eq('scores',['3','2','1'])")?;
    assert_eq!(matching(&reversed), vec!["John"]);

    let predicate = compile_query::<Person>("ne('scores',['1','2','3'])")?;
    assert_eq!(matching(&predicate), vec!["John", "Mary", "joseph"]);
    Ok(())
}

#[test]
fn test_collection_contains() -> Result<()> {
    // string elements match ignoring case
    let predicate = compile_query::<Person>("ct('tags','ADMIN')")?;
    assert_eq!(matching(&predicate), vec!["Joan"]);
    let predicate = compile_query::<Person>("ct('tags','ops')")?;
    assert_eq!(matching(&predicate), vec!["Joan", "Mary"]);

    let predicate = compile_query::<Person>("ct('scores','2')")?;
    assert_eq!(matching(&predicate), vec!["Joan", "John"]);
    Ok(())
}

#[test]
fn test_contains_on_value_inverts_roles() -> Result<()> {
    let predicate = compile_comparison::<Person>("Age", vec![1, 2, 3], ComparisonOperator::ContainsOnValue)?;
    assert!(predicate.evaluate(&Person::new("Two", 2)));
    assert!(!predicate.evaluate(&Person::new("Five", 5)));

    let predicate = compile_query::<Person>("in('Age',['17','45'])")?;
    assert_eq!(matching(&predicate), vec!["John", "joseph"]);

    let err = compile_query::<Person>("in('Age',['17','x'])").unwrap_err();
    assert!(matches!(err, CompileError::Coercion { source: CoercionError::Element { index: 1, .. }, .. }));
    Ok(())
}

#[test]
fn test_string_functions_are_case_sensitive() -> Result<()> {
    assert_eq!(matching(&compile_query::<Person>("ct('Name','o')")?), vec!["Joan", "John", "joseph"]);
    assert_eq!(matching(&compile_query::<Person>("sw('Name','jo')")?), vec!["joseph"]);
    assert_eq!(matching(&compile_query::<Person>("ew('Name','N')")?), Vec::<String>::new());
    assert_eq!(matching(&compile_query::<Person>("ew('Name','n')")?), vec!["Joan", "John"]);
    Ok(())
}

#[test]
fn test_null_coercion() -> Result<()> {
    let err = compile_query::<Person>("eq('Age','$null$')").unwrap_err();
    assert!(matches!(err, CompileError::Coercion { source: CoercionError::NullNotAllowed { .. }, .. }));

    let predicate = compile_query::<Person>("eq('nickname','$NULL$')")?;
    assert_eq!(matching(&predicate), vec!["Joan", "Mary"]);
    let predicate = compile_query::<Person>("ne('nickname','$null$')")?;
    assert_eq!(matching(&predicate), vec!["John", "joseph"]);

    // relational operators never match a null property
    let predicate = compile_query::<Person>("gt('address.zip','0')")?;
    assert_eq!(matching(&predicate), vec!["Joan"]);
    Ok(())
}

#[test]
fn test_nested_paths() -> Result<()> {
    let predicate = compile_query::<Person>("eq('address.city','PORTO')")?;
    assert_eq!(matching(&predicate), vec!["Mary"]);

    // missing intermediate records read as null
    let predicate = compile_query::<Person>("eq('address.city','$null$')")?;
    assert_eq!(matching(&predicate), vec!["John", "joseph"]);

    let err = compile_query::<Person>("eq('address.country','PT')").unwrap_err();
    assert!(matches!(err, CompileError::UnknownProperty { ref type_name, ref segment, .. } if type_name == "Address" && segment == "country"));
    Ok(())
}

#[test]
fn test_skipped_fields_are_not_addressable() {
    let err = compile_query::<Person>("eq('cached_rank','1')").unwrap_err();
    assert!(matches!(err, CompileError::UnknownProperty { .. }));
}

#[test]
fn test_composition_folds_left_to_right() -> Result<()> {
    // c || (b && a)
    let predicate = compile_query::<Person>("lt('Age','40')+AND+sw('Name','J')+OR+eq('Name','mary')")?;
    assert_eq!(matching(&predicate), vec!["Joan", "John", "Mary"]);

    // reordered clauses group differently: c && (b || a)
    let predicate = compile_query::<Person>("eq('Name','mary')+OR+sw('Name','J')+AND+lt('Age','40')")?;
    assert_eq!(matching(&predicate), vec!["Joan", "John", "Mary"]);

    let predicate = compile_query::<Person>("eq('Name','mary')+OR+sw('Name','J')+AND+gt('Age','20')")?;
    assert_eq!(matching(&predicate), vec!["Joan"]);
    Ok(())
}

#[test]
fn test_manual_composition() -> Result<()> {
    let young = compile_comparison::<Person>("Age", 18, ComparisonOperator::LessThanOrEqual)?;
    let named_j = compile_comparison::<Person>("Name", "J", ComparisonOperator::StartsWith)?;

    assert_eq!(matching(&and(young.clone(), named_j.clone())), vec!["John"]);
    assert_eq!(matching(&or(young.clone(), named_j.clone())), vec!["Joan", "John", "Mary"]);
    assert_eq!(matching(&not(young.clone())), vec!["Joan", "joseph"]);
    assert_eq!(matching(&young.compose(CompositionOperator::Or, named_j)), vec!["Joan", "John", "Mary"]);
    Ok(())
}

#[test]
fn test_predicates_are_shareable_across_threads() -> Result<()> {
    let predicate = compile_query::<Person>("gte('Age','18')")?;
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predicate = predicate.clone();
            std::thread::spawn(move || predicate.filter(&people()).count())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().map_err(|_| anyhow::anyhow!("thread panicked"))?, 3);
    }
    Ok(())
}
