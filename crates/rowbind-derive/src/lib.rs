//! Derive macros for rowbind
//!
//! Provides `#[derive(Model)]` and `#[derive(FromRow)]` macros.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod from_row;
mod model;

/// Derive `Model` metadata for a struct.
///
/// # Example
///
/// ```ignore
/// use rowbind::Model;
///
/// #[derive(Model)]
/// #[orm(table = "users")]
/// struct User {
///     #[orm(tag = "user_id,primary")]
///     user_id: i64,
///     email: String,
///     password: Option<String>,
/// }
/// ```
///
/// # Generated
///
/// - `TABLE: &'static str` - Table name
/// - `fn fields() -> &'static [FieldDescriptor]` - Ordered field metadata,
///   built once on first use from the raw tag strings
/// - `fn bind_values(&self, include_primary)` - Ordered bound values
/// - `fn assign_primary_key(&mut self, id)` - Generated-id back-assignment
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Specify table name (required)
/// - `#[orm(tag = "column,primary")]` - Field tag: first token is the column
///   name, a `primary` token in the remainder marks the primary key. A field
///   without a tag uses its own name as the column name.
#[proc_macro_derive(Model, attributes(orm))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `FromRow` trait for a struct.
///
/// # Example
///
/// ```ignore
/// use rowbind::FromRow;
///
/// #[derive(FromRow)]
/// struct User {
///     #[orm(tag = "user_id,primary")]
///     user_id: i64,
///     email: String,
///     password: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(tag = "column,...")]` - Map the field to the tag's column name
#[proc_macro_derive(FromRow, attributes(orm))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_row::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
