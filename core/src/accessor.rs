use crate::error::CompileError;
use crate::property::Property;
use crate::schema::Record;
use crate::value::{FieldType, Value, ValueType};
use sieveql::ast::PathExpr;
use std::fmt;
use std::marker::PhantomData;

/// Reads the value at a resolved property path from records of type `T`.
///
/// Built once per (type, path); reading never fails. A path that passes through an absent
/// optional record reads as [`Value::Null`].
pub struct ValueAccessor<T> {
    path: PathExpr,
    indices: Vec<usize>,
    field_type: FieldType,
    _record: PhantomData<fn(&T)>,
}

impl<T: Record> ValueAccessor<T> {
    pub fn get(&self, record: &T) -> Value { record.field_value(&self.indices).unwrap_or(Value::Null) }
}

impl<T> ValueAccessor<T> {
    /// The property type, nullable if the property or any record on the way to it is optional.
    pub fn field_type(&self) -> &FieldType { &self.field_type }

    pub fn path(&self) -> &PathExpr { &self.path }
}

impl<T> Clone for ValueAccessor<T> {
    fn clone(&self) -> Self {
        Self { path: self.path.clone(), indices: self.indices.clone(), field_type: self.field_type.clone(), _record: PhantomData }
    }
}

impl<T> fmt::Debug for ValueAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueAccessor").field("path", &self.path).field("indices", &self.indices).field("type", &self.field_type).finish()
    }
}

/// A [`ValueAccessor`] that converts what it reads into `R`.
pub struct Accessor<T, R> {
    inner: ValueAccessor<T>,
    _output: PhantomData<fn() -> R>,
}

impl<T: Record, R: Property> Accessor<T, R> {
    /// `None` only if the stored value cannot be represented as `R`, which the build-time type
    /// check rules out for well-behaved `Property` impls.
    pub fn get(&self, record: &T) -> Option<R> { R::from_value(self.inner.get(record)) }
}

impl<T, R> Accessor<T, R> {
    pub fn path(&self) -> &PathExpr { self.inner.path() }

    pub fn untyped(&self) -> &ValueAccessor<T> { &self.inner }
}

impl<T, R> Clone for Accessor<T, R> {
    fn clone(&self) -> Self { Self { inner: self.inner.clone(), _output: PhantomData } }
}

impl<T, R> fmt::Debug for Accessor<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_tuple("Accessor").field(&self.inner).finish() }
}

/// Resolve `path` against `T`'s schema.
pub fn compile_value_accessor<T: Record>(path: &PathExpr) -> Result<ValueAccessor<T>, CompileError> {
    let mut schema = T::schema();
    let mut indices = Vec::with_capacity(path.steps.len());
    let mut nullable = false;
    let mut resolved: Option<FieldType> = None;

    for segment in &path.steps {
        if let Some(parent) = resolved.take() {
            schema = match parent.ty {
                ValueType::Object(object) => object.schema(),
                other => return Err(unknown_property(&other.to_string(), segment, path)),
            };
        }
        let (index, field) = schema.field(segment).ok_or_else(|| unknown_property(schema.name, segment, path))?;
        indices.push(index);
        nullable |= field.ty.nullable;
        resolved = Some(field.ty.clone());
    }

    let ty = resolved.ok_or_else(|| CompileError::Parse(sieveql::error::ParseError::InvalidPath(path.to_string())))?;
    Ok(ValueAccessor { path: path.clone(), indices, field_type: FieldType { nullable, ..ty }, _record: PhantomData })
}

/// Resolve `path` against `T` and check that the property's type is exactly `R`.
pub fn compile_accessor<T: Record, R: Property>(path: &str) -> Result<Accessor<T, R>, CompileError> {
    let path = sieveql::parse_path(path)?;
    let inner = compile_value_accessor::<T>(&path)?;
    let expected = R::property_type();
    if *inner.field_type() != expected {
        return Err(CompileError::AccessorType {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: inner.field_type().to_string(),
        });
    }
    Ok(Accessor { inner, _output: PhantomData })
}

fn unknown_property(type_name: &str, segment: &str, path: &PathExpr) -> CompileError {
    CompileError::UnknownProperty { type_name: type_name.to_string(), segment: segment.to_string(), path: path.to_string() }
}
