use crate::property::Property;
use crate::value::{FieldType, Value};

/// A struct whose fields can be addressed by property path.
///
/// Usually implemented with `#[derive(Record)]`. The schema lists fields in declaration order and
/// `field_value` takes indices into that order, one per nesting level.
pub trait Record: Property + 'static {
    fn schema() -> Schema;

    /// The value at `path`, where each index selects a field of the record at that depth.
    fn field_value(&self, path: &[usize]) -> Option<Value>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldDef {
    pub fn new(name: &'static str, ty: FieldType) -> Self { Self { name, ty } }
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<FieldDef>) -> Self { Self { name, fields } }

    /// Find a field by name: an exact match wins, otherwise the first case-insensitive match.
    pub fn field(&self, name: &str) -> Option<(usize, &FieldDef)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name == name)
            .or_else(|| self.fields.iter().enumerate().find(|(_, field)| field.name.eq_ignore_ascii_case(name)))
    }
}
