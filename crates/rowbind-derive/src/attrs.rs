//! Attribute parsing for the rowbind derive macros.
//!
//! Handles struct-level `#[orm(table = "...")]` and field-level
//! `#[orm(tag = "...")]` attributes, plus the syn type analysis the
//! generators share.

use syn::{DeriveInput, Result};

/// Extract table name from the struct-level `#[orm(table = "...")]` attribute.
pub(crate) fn get_table_name(input: &DeriveInput) -> Result<String> {
    for attr in &input.attrs {
        if attr.path().is_ident("orm") {
            if let Ok(nested) = attr.parse_args::<syn::MetaNameValue>() {
                if nested.path.is_ident("table") {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(lit),
                        ..
                    }) = &nested.value
                    {
                        return Ok(lit.value());
                    }
                }
            }
        }
    }
    Err(syn::Error::new_spanned(
        input,
        "Model requires #[orm(table = \"table_name\")] attribute",
    ))
}

/// Raw tag string from a field-level `#[orm(tag = "...")]` attribute.
///
/// A field without a tag uses its own name as the column name.
pub(crate) fn get_field_tag(field: &syn::Field) -> String {
    for attr in &field.attrs {
        if attr.path().is_ident("orm") {
            if let Ok(nested) = attr.parse_args::<syn::MetaNameValue>() {
                if nested.path.is_ident("tag") {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(lit),
                        ..
                    }) = &nested.value
                    {
                        return lit.value();
                    }
                }
            }
        }
    }
    field.ident.as_ref().unwrap().to_string()
}

/// Column name: the tag's first token, verbatim.
pub(crate) fn tag_column(tag: &str) -> String {
    tag.split(',').next().unwrap_or("").to_string()
}

/// Whether the tag remainder carries the `primary` marker.
pub(crate) fn tag_is_primary(tag: &str) -> bool {
    tag.split(',').skip(1).any(|t| t == "primary")
}

/// Extract the inner type T from Option<T>, or return None if not an Option type.
///
/// Recognizes `Option<T>`, `std::option::Option<T>`, and `core::option::Option<T>`.
pub(crate) fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}
