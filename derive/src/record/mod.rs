mod description;

use description::RecordDescription;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

pub fn derive_record_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let description = match RecordDescription::parse(&input) {
        Ok(description) => description,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = description.name();
    let record_name = description.record_name();
    let idents = description.field_idents();
    let property_names = description.property_names();
    let types = description.field_types();
    let indices = 0..idents.len();
    let skipped = description.skipped_idents();

    let expanded = quote! {
        impl ::sieve::Record for #name {
            fn schema() -> ::sieve::Schema {
                ::sieve::Schema::new(
                    #record_name,
                    vec![#( ::sieve::FieldDef::new(#property_names, <#types as ::sieve::Property>::property_type()) ),*],
                )
            }

            fn field_value(&self, path: &[usize]) -> ::std::option::Option<::sieve::Value> {
                match path.split_first() {
                    ::std::option::Option::None => ::std::option::Option::Some(::sieve::Property::to_value(self)),
                    #( ::std::option::Option::Some((#indices, rest)) => ::sieve::Property::value_at(&self.#idents, rest), )*
                    ::std::option::Option::Some(_) => ::std::option::Option::None,
                }
            }
        }

        impl ::sieve::Property for #name {
            fn property_type() -> ::sieve::FieldType {
                ::sieve::FieldType::required(::sieve::ValueType::Object(::sieve::ObjectType::new(
                    #record_name,
                    <Self as ::sieve::Record>::schema,
                )))
            }

            fn to_value(&self) -> ::sieve::Value {
                ::sieve::Value::Object(vec![#( ::sieve::Property::to_value(&self.#idents) ),*])
            }

            fn from_value(value: ::sieve::Value) -> ::std::option::Option<Self> {
                match value {
                    ::sieve::Value::Object(fields) => {
                        let mut fields = fields.into_iter();
                        ::std::option::Option::Some(Self {
                            #( #idents: ::sieve::Property::from_value(fields.next()?)?, )*
                            #( #skipped: ::std::default::Default::default(), )*
                        })
                    }
                    _ => ::std::option::Option::None,
                }
            }

            fn value_at(&self, path: &[usize]) -> ::std::option::Option<::sieve::Value> {
                ::sieve::Record::field_value(self, path)
            }
        }
    };

    expanded.into()
}
