use super::temporal;
use crate::value::{FieldType, Value, ValueType};
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    /// Null supplied for a destination that cannot hold it
    #[error("null is not allowed for non-nullable {target}")]
    NullNotAllowed { target: String },
    /// Invalid format for the target type (e.g. "abc" for an i32)
    #[error("invalid format '{value}' for type {target}")]
    InvalidFormat { value: String, target: String },
    /// Numeric overflow when casting between numeric types
    #[error("numeric overflow: '{value}' cannot fit in {target}")]
    NumericOverflow { value: String, target: String },
    /// Cannot cast from source type to target type
    #[error("cannot cast from {from} to {to}")]
    IncompatibleTypes { from: String, to: String },
    /// One element of a list failed
    #[error("element {index}: {source}")]
    Element { index: usize, source: Box<CoercionError> },
}

/// Coerce an operand into exactly the type required by `target`, honoring nullability.
/// Lists are coerced element by element, in order; the first failing element fails the whole list.
pub fn coerce(value: Value, target: &FieldType) -> Result<Value, CoercionError> {
    if value.is_null() {
        return if target.nullable { Ok(Value::Null) } else { Err(CoercionError::NullNotAllowed { target: target.to_string() }) };
    }

    match (&target.ty, value) {
        (ValueType::List(element), Value::List(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| coerce(item, element).map_err(|e| CoercionError::Element { index, source: Box::new(e) }))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (ty, value) => value.cast_to(ty),
    }
}

impl Value {
    /// Cast this (non-null, scalar) value to the specified target type
    pub fn cast_to(self, target: &ValueType) -> Result<Value, CoercionError> {
        // If already the target type, pass it through
        if self.is_instance_of(target) {
            return Ok(self);
        }

        match self {
            Value::String(s) => parse_str(&s, target),
            Value::List(_) | Value::Object(_) | Value::Null => Err(self.incompatible(target)),
            numeric => match numeric.as_number() {
                Some(Number::Float(f)) if target.is_integer() && f.fract() != 0.0 => {
                    Err(CoercionError::InvalidFormat { value: numeric.to_string(), target: target.to_string() })
                }
                Some(number) if target.is_numeric() => number.cast_to(target).ok_or_else(|| numeric.overflow(target)),
                _ => Err(numeric.incompatible(target)),
            },
        }
    }

    fn as_number(&self) -> Option<Number> {
        Some(match self {
            Value::I8(n) => Number::Int(*n as i128),
            Value::I16(n) => Number::Int(*n as i128),
            Value::I32(n) => Number::Int(*n as i128),
            Value::I64(n) => Number::Int(*n as i128),
            Value::I128(n) => Number::Int(*n),
            Value::U8(n) => Number::Int(*n as i128),
            Value::U16(n) => Number::Int(*n as i128),
            Value::U32(n) => Number::Int(*n as i128),
            Value::U64(n) => Number::Int(*n as i128),
            Value::U128(n) => i128::try_from(*n).map(Number::Int).unwrap_or(Number::Float(*n as f64)),
            Value::F32(n) => Number::Float(*n as f64),
            Value::F64(n) => Number::Float(*n),
            _ => return None,
        })
    }

    fn incompatible(&self, target: &ValueType) -> CoercionError {
        CoercionError::IncompatibleTypes { from: self.kind().to_string(), to: target.to_string() }
    }

    fn overflow(&self, target: &ValueType) -> CoercionError {
        CoercionError::NumericOverflow { value: self.to_string(), target: target.to_string() }
    }
}

/// Intermediate form for numeric-to-numeric casts.
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    /// None if the value does not fit the target, or is a float with a fractional part headed for an integer.
    fn cast_to(self, target: &ValueType) -> Option<Value> {
        match self {
            Number::Int(n) => Some(match target {
                ValueType::I8 => Value::I8(i8::try_from(n).ok()?),
                ValueType::I16 => Value::I16(i16::try_from(n).ok()?),
                ValueType::I32 => Value::I32(i32::try_from(n).ok()?),
                ValueType::I64 => Value::I64(i64::try_from(n).ok()?),
                ValueType::I128 => Value::I128(n),
                ValueType::U8 => Value::U8(u8::try_from(n).ok()?),
                ValueType::U16 => Value::U16(u16::try_from(n).ok()?),
                ValueType::U32 => Value::U32(u32::try_from(n).ok()?),
                ValueType::U64 => Value::U64(u64::try_from(n).ok()?),
                ValueType::U128 => Value::U128(u128::try_from(n).ok()?),
                ValueType::F32 => Value::F32(n as f32),
                ValueType::F64 => Value::F64(n as f64),
                _ => return None,
            }),
            Number::Float(f) => match target {
                ValueType::F64 => Some(Value::F64(f)),
                ValueType::F32 if !f.is_finite() || f.abs() <= f32::MAX as f64 => Some(Value::F32(f as f32)),
                ValueType::F32 => None,
                // integers only take finite floats that are in range
                ty if f.is_finite() && f.fract() == 0.0 && f.abs() < 1.7e38 => Number::Int(f as i128).cast_to(ty),
                _ => None,
            },
        }
    }
}

fn parse_str(s: &str, target: &ValueType) -> Result<Value, CoercionError> {
    let invalid = || CoercionError::InvalidFormat { value: s.to_string(), target: target.to_string() };
    let text = s.trim();

    match target {
        ValueType::String => Ok(Value::String(s.to_string())),
        ValueType::Char => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(invalid()),
            }
        }
        ValueType::Bool => match text.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
        ValueType::I8 => parse_int(s, text, target).map(Value::I8),
        ValueType::I16 => parse_int(s, text, target).map(Value::I16),
        ValueType::I32 => parse_int(s, text, target).map(Value::I32),
        ValueType::I64 => parse_int(s, text, target).map(Value::I64),
        ValueType::I128 => parse_int(s, text, target).map(Value::I128),
        ValueType::U8 => parse_int(s, text, target).map(Value::U8),
        ValueType::U16 => parse_int(s, text, target).map(Value::U16),
        ValueType::U32 => parse_int(s, text, target).map(Value::U32),
        ValueType::U64 => parse_int(s, text, target).map(Value::U64),
        ValueType::U128 => parse_int(s, text, target).map(Value::U128),
        ValueType::F32 => text.parse().map(Value::F32).map_err(|_| invalid()),
        ValueType::F64 => text.parse().map(Value::F64).map_err(|_| invalid()),
        ValueType::Timestamp => temporal::parse_timestamp(text).map(Value::Timestamp).ok_or_else(invalid),
        ValueType::DateTime => temporal::parse_datetime(text).map(Value::DateTime).ok_or_else(invalid),
        ValueType::Date => temporal::parse_date(text).map(Value::Date).ok_or_else(invalid),
        ValueType::Duration => temporal::parse_duration(text).map(Value::Duration).ok_or_else(invalid),
        ValueType::Uuid => Uuid::parse_str(text).map(Value::Uuid).map_err(|_| invalid()),
        ValueType::Ulid => Ulid::from_string(text).map(Value::Ulid).map_err(|_| invalid()),
        ValueType::List(_) | ValueType::Object(_) => {
            Err(CoercionError::IncompatibleTypes { from: ValueType::String.to_string(), to: target.to_string() })
        }
    }
}

fn parse_int<N: FromStr<Err = ParseIntError>>(raw: &str, text: &str, target: &ValueType) -> Result<N, CoercionError> {
    text.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            CoercionError::NumericOverflow { value: raw.to_string(), target: target.to_string() }
        }
        _ => CoercionError::InvalidFormat { value: raw.to_string(), target: target.to_string() },
    })
}
