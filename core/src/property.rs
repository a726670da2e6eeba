use crate::value::{FieldType, Value, ValueType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use std::collections::{BTreeSet, VecDeque};
use ulid::Ulid;
use uuid::Uuid;

/// A type that can be stored in a record field and compared by a compiled predicate.
///
/// Implemented for the primitive, temporal and identifier types, for `Option`, `Box` and the
/// sequence collections, and by `#[derive(Record)]` for record types.
pub trait Property: Sized {
    fn property_type() -> FieldType;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Option<Self>;

    /// The value found by following field indices into nested records.
    /// An empty path is the property itself; `None` means the path does not exist.
    fn value_at(&self, path: &[usize]) -> Option<Value> { path.is_empty().then(|| self.to_value()) }
}

macro_rules! scalar_property {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Property for $ty {
                fn property_type() -> FieldType { FieldType::required(ValueType::$variant) }

                fn to_value(&self) -> Value { Value::$variant(self.clone()) }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_property! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    String => String,
    DateTime<Utc> => Timestamp,
    NaiveDateTime => DateTime,
    NaiveDate => Date,
    TimeDelta => Duration,
    Uuid => Uuid,
    Ulid => Ulid,
}

// pointer-sized integers are compared as their 64-bit counterparts
impl Property for isize {
    fn property_type() -> FieldType { FieldType::required(ValueType::I64) }

    fn to_value(&self) -> Value { Value::I64(*self as i64) }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::I64(n) => isize::try_from(n).ok(),
            _ => None,
        }
    }
}

impl Property for usize {
    fn property_type() -> FieldType { FieldType::required(ValueType::U64) }

    fn to_value(&self) -> Value { Value::U64(*self as u64) }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::U64(n) => usize::try_from(n).ok(),
            _ => None,
        }
    }
}

impl Property for std::time::Duration {
    fn property_type() -> FieldType { FieldType::required(ValueType::Duration) }

    fn to_value(&self) -> Value { Value::Duration(TimeDelta::from_std(*self).unwrap_or(TimeDelta::MAX)) }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Duration(delta) => delta.to_std().ok(),
            _ => None,
        }
    }
}

impl<T: Property> Property for Option<T> {
    fn property_type() -> FieldType { FieldType::nullable(T::property_type().ty) }

    fn to_value(&self) -> Value { self.as_ref().map_or(Value::Null, T::to_value) }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            value => T::from_value(value).map(Some),
        }
    }

    // an absent intermediate reads as null all the way down
    fn value_at(&self, path: &[usize]) -> Option<Value> {
        match self {
            Some(inner) => inner.value_at(path),
            None => Some(Value::Null),
        }
    }
}

impl<T: Property> Property for Box<T> {
    fn property_type() -> FieldType { T::property_type() }

    fn to_value(&self) -> Value { self.as_ref().to_value() }

    fn from_value(value: Value) -> Option<Self> { T::from_value(value).map(Box::new) }

    fn value_at(&self, path: &[usize]) -> Option<Value> { self.as_ref().value_at(path) }
}

macro_rules! sequence_property {
    ($($collection:ident $(: $bound:path)?),* $(,)?) => {
        $(
            impl<T: Property $(+ $bound)?> Property for $collection<T> {
                fn property_type() -> FieldType { FieldType::list_of(T::property_type()) }

                fn to_value(&self) -> Value { Value::List(self.iter().map(T::to_value).collect()) }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::List(items) => items.into_iter().map(T::from_value).collect(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

sequence_property! {
    Vec,
    VecDeque,
    BTreeSet: Ord,
}
