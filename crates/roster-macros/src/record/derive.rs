//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `Record` trait and
//! field name constants for filters and sort keys.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, Ident, Path, Result};

use super::attrs::{parse_container_attrs, parse_record_attrs};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let krate: Path = parse_container_attrs(&input.attrs)?
        .krate
        .unwrap_or_else(|| parse_quote!(::roster_engine));

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut record_names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let record_attrs = parse_record_attrs(&field.attrs)?;
        if record_attrs.skip {
            continue;
        }

        let record_name = record_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string());
        if !seen.insert(record_name.clone()) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name '{}'", record_name),
            ));
        }

        let const_name: Ident =
            syn::parse_str(&to_screaming_snake_case(&record_name)).map_err(|_| {
                Error::new(
                    field.span(),
                    format!("record field name '{}' has no valid constant name", record_name),
                )
            })?;
        field_constants.push(quote! {
            /// Record field name.
            pub const #const_name: &'static str = #record_name;
        });

        let value_expr = if record_attrs.display {
            quote! {
                #krate::Value::String(
                    ::std::borrow::Cow::Owned(::std::string::ToString::to_string(&self.#field_name))
                )
            }
        } else {
            quote! { #krate::ToValue::to_value(&self.#field_name) }
        };

        field_matches.push(quote! {
            #record_name => #value_expr,
        });
        record_names.push(record_name);
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics #krate::Record for #struct_name #ty_generics #where_clause {
            fn field(&self, name: &str) -> #krate::Value<'_> {
                match name {
                    #(#field_matches)*
                    _ => #krate::Value::None,
                }
            }

            fn field_names(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![#(#record_names),*]
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}
