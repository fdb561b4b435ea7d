//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[record(...)]` field and container attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordAttr {
    /// Leave this field out of the record.
    pub skip: bool,
    /// Field name seen by the engine (default: the struct field name).
    pub rename: Option<String>,
    /// Expose the field through its `Display` text instead of `ToValue`.
    pub display: bool,
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) if p.is_ident("display") => attr.display = true,

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        let name = s.value();
                        if name.is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(name);
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected: skip, display, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && (attr.display || attr.rename.is_some()) {
            return Err(Error::new(
                input.span(),
                "skip cannot be combined with display or rename",
            ));
        }

        Ok(attr)
    }
}

/// Container-level attributes from `#[record(...)]` on the struct.
#[derive(Default)]
pub struct RecordContainerAttr {
    /// Path to the engine crate (default: `::roster_engine`).
    pub krate: Option<syn::Path>,
}

impl Parse for RecordContainerAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordContainerAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("crate") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        attr.krate = Some(s.parse()?);
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "crate must be a string literal path",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record container attribute. Expected: crate = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[record(...)]` attributes from a struct's attributes.
pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<RecordContainerAttr> {
    for attr in attrs {
        if attr.path().is_ident("record") {
            return attr.parse_args::<RecordContainerAttr>();
        }
    }
    Ok(RecordContainerAttr::default())
}

/// Extract `#[record(...)]` attributes from a field's attributes.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    for attr in attrs {
        if attr.path().is_ident("record") {
            return attr.parse_args::<RecordAttr>();
        }
    }
    Ok(RecordAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_record(tokens: &str) -> Result<RecordAttr> {
        syn::parse_str::<RecordAttr>(tokens)
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_record("").unwrap(), RecordAttr::default());
    }

    #[test]
    fn test_skip() {
        let attr = parse_record("skip").unwrap();
        assert!(attr.skip);
        assert!(!attr.display);
    }

    #[test]
    fn test_rename() {
        let attr = parse_record(r#"rename = "district_name""#).unwrap();
        assert_eq!(attr.rename, Some("district_name".to_string()));
    }

    #[test]
    fn test_display_with_rename() {
        let attr = parse_record(r#"display, rename = "status""#).unwrap();
        assert!(attr.display);
        assert_eq!(attr.rename, Some("status".to_string()));
    }

    #[test]
    fn test_rename_requires_string() {
        let err = parse_record("rename = 5").unwrap_err();
        assert!(err.to_string().contains("string literal"));
    }

    #[test]
    fn test_empty_rename_rejected() {
        assert!(parse_record(r#"rename = """#).is_err());
    }

    #[test]
    fn test_skip_conflicts() {
        let err = parse_record("skip, display").unwrap_err();
        assert!(err.to_string().contains("cannot be combined"));
    }

    #[test]
    fn test_container_crate_path() {
        let attr = syn::parse_str::<RecordContainerAttr>(r#"crate = "roster::engine""#).unwrap();
        let path = attr.krate.unwrap();
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        assert_eq!(segments, vec!["roster", "engine"]);

        assert!(syn::parse_str::<RecordContainerAttr>("")
            .unwrap()
            .krate
            .is_none());
        assert!(syn::parse_str::<RecordContainerAttr>("crate = roster").is_err());
        assert!(syn::parse_str::<RecordContainerAttr>("skip").is_err());
    }

    #[test]
    fn test_unknown_attribute() {
        let err = parse_record("String").unwrap_err();
        assert!(err.to_string().contains("unknown record attribute"));
    }
}
