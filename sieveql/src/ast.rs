use serde::{Deserialize, Serialize};
use std::fmt;

/// Replaced by a genuine null wherever it occurs inside a quoted value (case-insensitive).
pub const NULL_SENTINEL: &str = "$null$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,              // eq
    NotEqual,           // ne
    LessThan,           // lt
    LessThanOrEqual,    // lte
    GreaterThan,        // gt
    GreaterThanOrEqual, // gte
    Contains,           // ct
    ContainsOnValue,    // in
    StartsWith,         // sw
    EndsWith,           // ew
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 10] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::Contains,
        Self::ContainsOnValue,
        Self::StartsWith,
        Self::EndsWith,
    ];

    /// Canonical opcode used in query text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::LessThan => "lt",
            Self::LessThanOrEqual => "lte",
            Self::GreaterThan => "gt",
            Self::GreaterThanOrEqual => "gte",
            Self::Contains => "ct",
            Self::ContainsOnValue => "in",
            Self::StartsWith => "sw",
            Self::EndsWith => "ew",
        }
    }

    /// Resolve an opcode, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> { Self::ALL.into_iter().find(|op| op.code().eq_ignore_ascii_case(code.trim())) }

    pub fn is_relational(&self) -> bool {
        matches!(self, Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositionOperator {
    And,
    Or,
}

impl CompositionOperator {
    pub const ALL: [CompositionOperator; 2] = [Self::And, Self::Or];

    pub fn code(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> { Self::ALL.into_iter().find(|op| op.code().eq_ignore_ascii_case(code.trim())) }
}

impl fmt::Display for CompositionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

/// A value as written in query text, after null-sentinel substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    String(String),
    List(Vec<Literal>),
}

impl Literal {
    pub fn is_null(&self) -> bool { matches!(self, Literal::Null) }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "'{}'", NULL_SENTINEL),
            Literal::String(s) => write!(f, "'{}'", s),
            Literal::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A dot-separated property path such as `Address.City`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathExpr {
    pub steps: Vec<String>,
}

impl PathExpr {
    pub fn simple(name: impl Into<String>) -> Self { Self { steps: vec![name.into()] } }

    pub fn first(&self) -> &str { &self.steps[0] }

    pub fn is_simple(&self) -> bool { self.steps.len() == 1 }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.steps.join(".")) }
}

/// One `OPCODE('path', value)` unit of a query, plus the composition joining it to the clauses before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryClause {
    pub composition: Option<CompositionOperator>,
    pub operator: ComparisonOperator,
    pub path: PathExpr,
    pub value: Literal,
}

impl QueryClause {
    pub fn new(operator: ComparisonOperator, path: PathExpr, value: Literal) -> Self {
        Self { composition: None, operator, path, value }
    }

    pub fn joined(mut self, composition: CompositionOperator) -> Self {
        self.composition = Some(composition);
        self
    }
}

impl fmt::Display for QueryClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}('{}', {})", self.operator, self.path, self.value) }
}

/// A fully parsed query: clauses in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub clauses: Vec<QueryClause>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                let composition = clause.composition.unwrap_or(CompositionOperator::And);
                write!(f, "+{}+", composition)?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
