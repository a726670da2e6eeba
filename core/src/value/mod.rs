mod cast;
mod temporal;

pub use cast::{coerce, CoercionError};

use crate::schema::Schema;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use std::fmt::{self, Display};
use ulid::Ulid;
use uuid::Uuid;

/// A natively typed property value or query operand.
///
/// `List` doubles as the array operand of a query clause; `Object` holds the field values of a
/// nested record in schema order.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),

    // Numbers
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),

    String(String),
    Timestamp(DateTime<Utc>),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Duration(TimeDelta),
    Uuid(Uuid),
    Ulid(Ulid),
    List(Vec<Value>),
    Object(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// True if this value is a (non-null) instance of `ty`. Lists and objects are matched by shape only.
    pub fn is_instance_of(&self, ty: &ValueType) -> bool {
        matches!(
            (self, ty),
            (Value::Bool(_), ValueType::Bool)
                | (Value::Char(_), ValueType::Char)
                | (Value::I8(_), ValueType::I8)
                | (Value::I16(_), ValueType::I16)
                | (Value::I32(_), ValueType::I32)
                | (Value::I64(_), ValueType::I64)
                | (Value::I128(_), ValueType::I128)
                | (Value::U8(_), ValueType::U8)
                | (Value::U16(_), ValueType::U16)
                | (Value::U32(_), ValueType::U32)
                | (Value::U64(_), ValueType::U64)
                | (Value::U128(_), ValueType::U128)
                | (Value::F32(_), ValueType::F32)
                | (Value::F64(_), ValueType::F64)
                | (Value::String(_), ValueType::String)
                | (Value::Timestamp(_), ValueType::Timestamp)
                | (Value::DateTime(_), ValueType::DateTime)
                | (Value::Date(_), ValueType::Date)
                | (Value::Duration(_), ValueType::Duration)
                | (Value::Uuid(_), ValueType::Uuid)
                | (Value::Ulid(_), ValueType::Ulid)
                | (Value::List(_), ValueType::List(_))
                | (Value::Object(_), ValueType::Object(_))
        )
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::I128(_) => "i128",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "String",
            Value::Timestamp(_) => "DateTime<Utc>",
            Value::DateTime(_) => "NaiveDateTime",
            Value::Date(_) => "NaiveDate",
            Value::Duration(_) => "TimeDelta",
            Value::Uuid(_) => "Uuid",
            Value::Ulid(_) => "Ulid",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::I8(n) => write!(f, "{}", n),
            Value::I16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::I128(n) => write!(f, "{}", n),
            Value::U8(n) => write!(f, "{}", n),
            Value::U16(n) => write!(f, "{}", n),
            Value::U32(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::U128(n) => write!(f, "{}", n),
            Value::F32(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::Date(d) => write!(f, "{}", d),
            Value::Duration(d) => write!(f, "{}", d),
            Value::Uuid(id) => write!(f, "{}", id),
            Value::Ulid(id) => write!(f, "{}", id),
            Value::List(items) | Value::Object(items) => {
                let (open, close) = if matches!(self, Value::List(_)) { ("[", "]") } else { ("{", "}") };
                f.write_str(open)?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(close)
            }
        }
    }
}

/// The concrete type of a property, independent of nullability.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    String,
    Timestamp,
    DateTime,
    Date,
    Duration,
    Uuid,
    Ulid,
    List(Box<FieldType>),
    Object(ObjectType),
}

impl ValueType {
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ValueType::I8
                | ValueType::I16
                | ValueType::I32
                | ValueType::I64
                | ValueType::I128
                | ValueType::U8
                | ValueType::U16
                | ValueType::U32
                | ValueType::U64
                | ValueType::U128
        )
    }

    pub fn is_numeric(&self) -> bool { self.is_integer() || matches!(self, ValueType::F32 | ValueType::F64) }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => f.write_str("bool"),
            ValueType::Char => f.write_str("char"),
            ValueType::I8 => f.write_str("i8"),
            ValueType::I16 => f.write_str("i16"),
            ValueType::I32 => f.write_str("i32"),
            ValueType::I64 => f.write_str("i64"),
            ValueType::I128 => f.write_str("i128"),
            ValueType::U8 => f.write_str("u8"),
            ValueType::U16 => f.write_str("u16"),
            ValueType::U32 => f.write_str("u32"),
            ValueType::U64 => f.write_str("u64"),
            ValueType::U128 => f.write_str("u128"),
            ValueType::F32 => f.write_str("f32"),
            ValueType::F64 => f.write_str("f64"),
            ValueType::String => f.write_str("String"),
            ValueType::Timestamp => f.write_str("DateTime<Utc>"),
            ValueType::DateTime => f.write_str("NaiveDateTime"),
            ValueType::Date => f.write_str("NaiveDate"),
            ValueType::Duration => f.write_str("TimeDelta"),
            ValueType::Uuid => f.write_str("Uuid"),
            ValueType::Ulid => f.write_str("Ulid"),
            ValueType::List(element) => write!(f, "Vec<{}>", element),
            ValueType::Object(object) => f.write_str(object.name),
        }
    }
}

/// A property's value type plus whether it may hold null.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldType {
    pub ty: ValueType,
    pub nullable: bool,
}

impl FieldType {
    pub fn required(ty: ValueType) -> Self { Self { ty, nullable: false } }

    pub fn nullable(ty: ValueType) -> Self { Self { ty, nullable: true } }

    pub fn list_of(element: FieldType) -> Self { Self::required(ValueType::List(Box::new(element))) }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Option<{}>", self.ty)
        } else {
            write!(f, "{}", self.ty)
        }
    }
}

/// A nested record type. The schema is produced on demand so that record types may refer to themselves.
#[derive(Clone, Copy)]
pub struct ObjectType {
    pub name: &'static str,
    schema: fn() -> Schema,
}

impl ObjectType {
    pub const fn new(name: &'static str, schema: fn() -> Schema) -> Self { Self { name, schema } }

    pub fn schema(&self) -> Schema { (self.schema)() }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_tuple("ObjectType").field(&self.name).finish() }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool { self.name == other.name }
}

impl From<sieveql::ast::Literal> for Value {
    fn from(literal: sieveql::ast::Literal) -> Self {
        match literal {
            sieveql::ast::Literal::Null => Value::Null,
            sieveql::ast::Literal::String(s) => Value::String(s),
            sieveql::ast::Literal::List(items) => Value::List(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl From<&sieveql::ast::Literal> for Value {
    fn from(literal: &sieveql::ast::Literal) -> Self { Value::from(literal.clone()) }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self { Value::$variant(value) }
            }
        )*
    };
}

value_from! {
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

impl From<&str> for Value {
    fn from(value: &str) -> Self { Value::String(value.to_string()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self { value.map_or(Value::Null, Into::into) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self { Value::List(items.into_iter().map(Into::into).collect()) }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self { Value::List(items.into_iter().map(Into::into).collect()) }
}
