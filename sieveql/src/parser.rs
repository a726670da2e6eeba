use crate::ast::{ComparisonOperator, CompositionOperator, Literal, PathExpr, Query, QueryClause, NULL_SENTINEL};
use crate::error::ParseError;
use crate::grammar::{Rule, SieveqlParser};
use pest::iterators::Pair;
use pest::Parser;

/// A piece of query text between (or being) composition markers.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece<'a> {
    Clause(&'a str),
    Composition(&'a str),
}

/// Split a query into its clauses and yield them lazily, in source order.
///
/// Only the composition structure is checked up front. Each clause is parsed when the
/// iterator reaches it, and the iterator stops after the first error it yields.
pub fn parse_query(input: &str) -> Result<Clauses<'_>, ParseError> {
    let pieces = split_compositions(input);
    let clauses = pieces.iter().filter(|piece| matches!(piece, Piece::Clause(_))).count();
    let compositions = pieces.len() - clauses;
    if clauses != compositions + 1 {
        return Err(ParseError::CompositionCount { clauses, compositions });
    }
    tracing::debug!("split query into {} clauses", clauses);

    Ok(Clauses { pieces: pieces.into_iter(), first: true, failed: false })
}

/// Parse a query and collect every clause, failing on the first bad one.
pub fn parse_selection(input: &str) -> Result<Query, ParseError> {
    let clauses = parse_query(input)?.collect::<Result<Vec<_>, _>>()?;
    Ok(Query { clauses })
}

/// Iterator over the clauses of a query. See [`parse_query`].
#[derive(Debug)]
pub struct Clauses<'a> {
    pieces: std::vec::IntoIter<Piece<'a>>,
    first: bool,
    failed: bool,
}

impl<'a> Iterator for Clauses<'a> {
    type Item = Result<QueryClause, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.next_clause()?;
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

impl<'a> Clauses<'a> {
    fn next_clause(&mut self) -> Option<Result<QueryClause, ParseError>> {
        let composition = if self.first {
            self.first = false;
            None
        } else {
            match self.pieces.next()? {
                Piece::Composition(code) => match CompositionOperator::from_code(code) {
                    Some(op) => Some(op),
                    None => return Some(Err(ParseError::UnknownComposition(code.to_string()))),
                },
                Piece::Clause(text) => return Some(Err(ParseError::malformed(text, "missing composition"))),
            }
        };

        let text = match self.pieces.next() {
            Some(Piece::Clause(text)) => text,
            Some(Piece::Composition(code)) => return Some(Err(ParseError::malformed(code, "composition without a clause"))),
            None => return Some(Err(ParseError::malformed("", "composition without a clause"))),
        };

        Some(parse_clause(text).map(|clause| QueryClause { composition, ..clause }))
    }
}

/// Parse a single `OPCODE('path', value)` clause. The result carries no composition.
pub fn parse_clause(text: &str) -> Result<QueryClause, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::malformed(text, "empty clause"));
    }

    let mut pairs = SieveqlParser::parse(Rule::Statement, text)
        .map_err(|e| ParseError::Syntax { clause: text.to_string(), message: e.to_string() })?;
    let clause = pairs.next().ok_or_else(|| ParseError::malformed(text, "empty clause"))?;
    let mut parts = clause.into_inner();

    let opcode = parts.next().ok_or_else(|| ParseError::malformed(text, "missing operator"))?;
    let operator =
        ComparisonOperator::from_code(opcode.as_str()).ok_or_else(|| ParseError::UnknownOperator(opcode.as_str().to_string()))?;

    let path = parts
        .next()
        .and_then(|literal| literal.into_inner().next())
        .ok_or_else(|| ParseError::malformed(text, "empty property"))?;
    let path = path_from_str(path.as_str());

    let value = parts.next().ok_or_else(|| ParseError::malformed(text, "missing value"))?;
    let value = match value.as_rule() {
        Rule::Scalar => scalar_literal(value),
        Rule::Array => {
            let items: Vec<Literal> = value.into_inner().map(scalar_literal).collect();
            if items.is_empty() {
                return Err(ParseError::malformed(text, "empty value array"));
            }
            Literal::List(items)
        }
        other => {
            return Err(ParseError::Syntax { clause: text.to_string(), message: format!("expected a value, got {:?}", other) });
        }
    };

    Ok(QueryClause::new(operator, path, value))
}

/// Parse and validate a dotted property path.
pub fn parse_path(input: &str) -> Result<PathExpr, ParseError> {
    let input = input.trim();
    SieveqlParser::parse(Rule::PathOnly, input).map_err(|_| ParseError::InvalidPath(input.to_string()))?;
    Ok(path_from_str(input))
}

fn path_from_str(path: &str) -> PathExpr { PathExpr { steps: path.split('.').map(str::to_string).collect() } }

fn scalar_literal(pair: Pair<'_, Rule>) -> Literal {
    let text = pair.into_inner().next().map(|text| text.as_str()).unwrap_or_default();
    substitute_keyword(text)
}

/// Any quoted value containing the null sentinel becomes a genuine null.
fn substitute_keyword(text: &str) -> Literal {
    if text.to_lowercase().contains(NULL_SENTINEL) {
        Literal::Null
    } else {
        Literal::String(text.to_string())
    }
}

/// Split on `+CODE+` markers that sit outside quoted values, keeping the markers' codes.
fn split_compositions(input: &str) -> Vec<Piece<'_>> {
    let bytes = input.as_bytes();
    let mut pieces = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' => in_quotes = !in_quotes,
            b'+' if !in_quotes => {
                if let Some(code) = composition_at(&input[i..]) {
                    pieces.push(Piece::Clause(&input[start..i]));
                    pieces.push(Piece::Composition(code));
                    i += code.len() + 2;
                    start = i;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    pieces.push(Piece::Clause(&input[start..]));
    pieces
}

/// `rest` starts at a `+`; returns the code if it opens a `+CODE+` marker.
fn composition_at(rest: &str) -> Option<&str> {
    let body = &rest[1..];
    let end = body.find('+')?;
    let code = &body[..end];
    if (2..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(code)
    } else {
        None
    }
}
