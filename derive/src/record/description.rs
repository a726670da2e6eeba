use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type};

/// A struct deriving `Record`, with its fields split into addressable and skipped ones.
pub struct RecordDescription {
    name: Ident,
    record_name: String,
    fields: Vec<RecordField>,
    skipped: Vec<Ident>,
}

struct RecordField {
    ident: Ident,
    property_name: String,
    ty: Type,
}

#[derive(Default)]
struct RecordAttributes {
    rename: Option<String>,
    skip: bool,
}

impl RecordDescription {
    pub fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let name = input.ident.clone();
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(&input.generics, "Record cannot be derived for generic types"));
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => fields.named.clone(),
                fields => return Err(syn::Error::new_spanned(fields, "Record can only be derived for structs with named fields")),
            },
            _ => return Err(syn::Error::new_spanned(&name, "Record can only be derived for structs")),
        };

        let record_name = parse_attributes(&input.attrs)?.rename.unwrap_or_else(|| name.to_string());

        let mut addressable = Vec::new();
        let mut skipped = Vec::new();
        for field in fields {
            let attributes = parse_attributes(&field.attrs)?;
            let ident = field.ident.clone().ok_or_else(|| syn::Error::new_spanned(&field, "expected a named field"))?;
            if attributes.skip {
                skipped.push(ident);
                continue;
            }
            let property_name = attributes.rename.unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());
            if addressable.iter().any(|f: &RecordField| f.property_name == property_name) {
                return Err(syn::Error::new_spanned(&ident, format!("duplicate property name `{}`", property_name)));
            }
            addressable.push(RecordField { ident, property_name, ty: field.ty });
        }

        Ok(Self { name, record_name, fields: addressable, skipped })
    }

    pub fn name(&self) -> &Ident { &self.name }
    pub fn record_name(&self) -> &str { &self.record_name }

    pub fn field_idents(&self) -> Vec<&Ident> { self.fields.iter().map(|f| &f.ident).collect() }
    pub fn property_names(&self) -> Vec<&str> { self.fields.iter().map(|f| f.property_name.as_str()).collect() }
    pub fn field_types(&self) -> Vec<&Type> { self.fields.iter().map(|f| &f.ty).collect() }
    pub fn skipped_idents(&self) -> &[Ident] { &self.skipped }
}

fn parse_attributes(attrs: &[syn::Attribute]) -> syn::Result<RecordAttributes> {
    let mut attributes = RecordAttributes::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                attributes.rename = Some(name.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                attributes.skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `rename = \"...\"` or `skip`"))
            }
        })?;
    }
    Ok(attributes)
}
