use crate::ast::{ComparisonOperator, CompositionOperator, PathExpr, Query};
use crate::error::ParseError;
use crate::parser;
use std::convert::TryFrom;
use std::str::FromStr;

impl<'a> TryFrom<&'a str> for Query {
    type Error = ParseError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { parser::parse_selection(value) }
}
impl TryFrom<String> for Query {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> { parser::parse_selection(&value) }
}

impl<'a> TryFrom<&'a str> for PathExpr {
    type Error = ParseError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { parser::parse_path(value) }
}

impl FromStr for ComparisonOperator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_code(s).ok_or_else(|| ParseError::UnknownOperator(s.to_string())) }
}

impl FromStr for CompositionOperator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_code(s).ok_or_else(|| ParseError::UnknownComposition(s.to_string())) }
}
