//! Model derive macro implementation

use crate::attrs::{get_field_tag, get_table_name, option_inner, tag_is_primary};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let table = get_table_name(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Model can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Model can only be derived for structs",
            ));
        }
    };

    let mut descriptor_inits = Vec::with_capacity(fields.len());
    let mut value_stmts = Vec::with_capacity(fields.len());
    let mut primary: Option<(syn::Ident, String, bool)> = None;

    for field in fields.iter() {
        let field_ident = field.ident.clone().unwrap();
        let field_name = field_ident.to_string();
        let tag = get_field_tag(field);
        let optional = option_inner(&field.ty).is_some();
        let is_primary = tag_is_primary(&tag);

        if is_primary {
            if primary.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "Model allows at most one field tagged `primary`",
                ));
            }
            primary = Some((field_ident.clone(), field_name.clone(), optional));
        }

        descriptor_inits.push(quote! {
            rowbind::FieldDescriptor::from_tag(#field_name, #tag, #optional)
        });

        // Option fields are dereferenced; an unset optional surfaces as a
        // NullField error naming the field.
        let push = if optional {
            quote! {
                match self.#field_ident.as_ref() {
                    Some(value) => values.push(value),
                    None => return Err(rowbind::MapError::null_field(#field_name)),
                }
            }
        } else {
            quote! {
                values.push(&self.#field_ident);
            }
        };

        value_stmts.push(if is_primary {
            quote! {
                if include_primary {
                    #push
                }
            }
        } else {
            push
        });
    }

    let assign_impl = match &primary {
        Some((pk_ident, pk_name, pk_optional)) => {
            let converted = quote! {
                ::std::convert::TryInto::try_into(id).map_err(|_| {
                    rowbind::MapError::immutable_field(
                        #pk_name,
                        "generated id does not fit the field type",
                    )
                })?
            };
            let assign = if *pk_optional {
                quote! { self.#pk_ident = Some(#converted); }
            } else {
                quote! { self.#pk_ident = #converted; }
            };
            quote! {
                fn assign_primary_key(&mut self, id: i64) -> rowbind::MapResult<()> {
                    #assign
                    Ok(())
                }
            }
        }
        None => {
            let model_name = name.to_string();
            quote! {
                fn assign_primary_key(&mut self, _id: i64) -> rowbind::MapResult<()> {
                    Err(rowbind::MapError::immutable_field(
                        #model_name,
                        "model declares no primary key field",
                    ))
                }
            }
        }
    };

    Ok(quote! {
        impl rowbind::Model for #name {
            const TABLE: &'static str = #table;

            fn fields() -> &'static [rowbind::FieldDescriptor] {
                static FIELDS: ::std::sync::OnceLock<Vec<rowbind::FieldDescriptor>> =
                    ::std::sync::OnceLock::new();
                FIELDS.get_or_init(|| vec![#(#descriptor_inits),*])
            }

            fn bind_values(
                &self,
                include_primary: bool,
            ) -> rowbind::MapResult<Vec<&(dyn tokio_postgres::types::ToSql + Sync)>> {
                let _ = include_primary;
                let mut values: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> = Vec::new();
                #(#value_stmts)*
                Ok(values)
            }

            #assign_impl
        }
    })
}
