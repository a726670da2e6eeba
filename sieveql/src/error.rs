use thiserror::Error;

/// Errors raised while turning query text into clauses.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("syntax error in clause `{clause}`: {message}")]
    Syntax { clause: String, message: String },
    #[error("malformed clause `{clause}`: {reason}")]
    Malformed { clause: String, reason: &'static str },
    #[error("malformed query: {clauses} clauses joined by {compositions} compositions")]
    CompositionCount { clauses: usize, compositions: usize },
    #[error("invalid property path `{0}`")]
    InvalidPath(String),
    #[error("unknown operator code `{0}`")]
    UnknownOperator(String),
    #[error("unknown composition code `{0}`")]
    UnknownComposition(String),
}

impl ParseError {
    /// True for grammar violations, as opposed to well-formed text naming an unknown code.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::Malformed { .. } | Self::CompositionCount { .. } | Self::InvalidPath(_))
    }

    pub(crate) fn malformed(clause: &str, reason: &'static str) -> Self { Self::Malformed { clause: clause.to_string(), reason } }
}

