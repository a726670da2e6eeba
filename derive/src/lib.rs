mod record;

use proc_macro::TokenStream;

/// Derive `Record` and `Property` for a struct with named fields.
///
/// Field attributes: `#[record(rename = "Name")]` sets the property name used in paths,
/// `#[record(skip)]` hides a field (it must implement `Default`). `#[record(rename = "...")]`
/// on the struct renames the record type in schemas and error messages.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream { record::derive_record_impl(input) }
