//! Attribute parsing for the derive macros.
//!
//! - `#[param(...)]` on request-record fields
//! - `#[record(crate = "...")]` on the container
//! - the subset of `#[serde(...)]` that changes JSON member names

use proc_macro2::Span;
use quote::ToTokens;
use syn::{
    punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Field, Ident, Lit, Meta,
    Path, Token,
};

/// Where a field is bound from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Path,
    Query,
    Cookie,
    Header,
    Body,
}

impl Source {
    fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "cookie" => Some(Self::Cookie),
            "header" => Some(Self::Header),
            "body" => Some(Self::Body),
            _ => None,
        }
    }

    /// The `FieldSource` variant name.
    pub fn variant(self) -> Ident {
        let name = match self {
            Self::Path => "Path",
            Self::Query => "Query",
            Self::Cookie => "Cookie",
            Self::Header => "Header",
            Self::Body => "Body",
        };
        Ident::new(name, Span::call_site())
    }
}

/// A parsed `#[param(...)]` attribute.
#[derive(Debug)]
pub struct ParamAttr {
    pub source: Source,
    /// Lookup name; `None` means the field name.
    pub name: Option<String>,
    pub required: bool,
}

fn string_lit(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Some(s.value()),
        _ => None,
    }
}

fn parse_required(expr: &Expr) -> syn::Result<bool> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Bool(b), ..
        }) => Ok(b.value),
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => match s.value().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(syn::Error::new(
                s.span(),
                format!("expected \"true\" or \"false\", found \"{other}\""),
            )),
        },
        _ => Err(syn::Error::new(expr.span(), "expected true or false")),
    }
}

impl ParamAttr {
    /// Parses the `#[param]` attribute of a field, if any.
    pub fn from_field(field: &Field) -> syn::Result<Option<Self>> {
        let mut attrs = field.attrs.iter().filter(|a| a.path().is_ident("param"));
        let Some(attr) = attrs.next() else {
            return Ok(None);
        };
        if let Some(extra) = attrs.next() {
            return Err(syn::Error::new(
                extra.span(),
                "a field can have at most one #[param] attribute",
            ));
        }

        let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        let mut source: Option<(Source, Option<String>)> = None;
        let mut required = None;

        for meta in metas {
            let ident = meta
                .path()
                .get_ident()
                .ok_or_else(|| syn::Error::new(meta.path().span(), "expected identifier"))?
                .to_string();

            if ident == "required" {
                let Meta::NameValue(nv) = &meta else {
                    return Err(syn::Error::new(meta.span(), "expected required = true|false"));
                };
                required = Some(parse_required(&nv.value)?);
                continue;
            }

            let Some(parsed) = Source::from_ident(&ident) else {
                return Err(syn::Error::new(
                    meta.path().span(),
                    format!("unknown attribute: {ident}"),
                ));
            };
            if source.is_some() {
                return Err(syn::Error::new(
                    meta.span(),
                    "a field can have at most one source annotation",
                ));
            }

            let name = match &meta {
                Meta::Path(_) => None,
                Meta::NameValue(nv) if parsed != Source::Body => Some(
                    string_lit(&nv.value)
                        .ok_or_else(|| syn::Error::new(nv.value.span(), "expected string literal"))?,
                ),
                _ => {
                    return Err(syn::Error::new(
                        meta.span(),
                        format!("expected `{ident}` or `{ident} = \"name\"`"),
                    ))
                }
            };
            source = Some((parsed, name));
        }

        let (source, name) = source.ok_or_else(|| {
            syn::Error::new(
                attr.span(),
                "missing source: path, query, cookie, header or body",
            )
        })?;
        if source == Source::Body && required.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "`required` does not apply to body fields; use Option<T>",
            ));
        }

        Ok(Some(Self {
            source,
            name,
            required: required.unwrap_or(true),
        }))
    }
}

/// Returns the path to `gotodoc_core` for generated code.
pub fn crate_path(attrs: &[Attribute]) -> syn::Result<Path> {
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        for meta in metas {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("crate") => {
                    let value = string_lit(&nv.value)
                        .ok_or_else(|| syn::Error::new(nv.value.span(), "expected string literal"))?;
                    return syn::parse_str(&value);
                }
                _ => {
                    return Err(syn::Error::new(
                        meta.span(),
                        format!("unknown attribute: {}", meta.path().to_token_stream()),
                    ))
                }
            }
        }
    }
    syn::parse_str("::gotodoc_core")
}

/// Serde naming attributes relevant to the JSON shape.
#[derive(Debug, Default)]
pub struct SerdeAttrs {
    pub rename: Option<String>,
    pub rename_all: Option<String>,
    pub skip: bool,
}

impl SerdeAttrs {
    /// Reads `rename`, `rename_all` and `skip`; other serde options are ignored.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            for meta in metas {
                match &meta {
                    Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                        out.rename = string_lit(&nv.value);
                    }
                    Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                        out.rename_all = string_lit(&nv.value);
                    }
                    Meta::Path(p) if p.is_ident("skip") || p.is_ident("skip_deserializing") => {
                        out.skip = true;
                    }
                    _ => {}
                }
            }
        }
        Ok(out)
    }
}

fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.extend(c.to_lowercase());
        } else {
            current.extend(c.to_lowercase());
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Applies a serde `rename_all` rule; unknown rules leave the name as is.
pub fn apply_rename_all(rule: &str, name: &str) -> String {
    let words = words(name);
    match rule {
        "lowercase" => name.to_lowercase(),
        "UPPERCASE" => name.to_uppercase(),
        "snake_case" => words.join("_"),
        "SCREAMING_SNAKE_CASE" => words.join("_").to_uppercase(),
        "kebab-case" => words.join("-"),
        "SCREAMING-KEBAB-CASE" => words.join("-").to_uppercase(),
        "PascalCase" => words.iter().map(|w| capitalize(w)).collect(),
        "camelCase" => words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
            .collect(),
        _ => name.to_string(),
    }
}

/// Collects `///` doc lines into one description.
pub fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => string_lit(&nv.value),
            _ => None,
        })
        .map(|line| line.trim().to_string())
        .collect();
    let joined = lines.join(" ").trim().to_string();
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, DeriveInput};

    fn first_field(input: &DeriveInput) -> &Field {
        match &input.data {
            syn::Data::Struct(s) => s.fields.iter().next().unwrap(),
            _ => panic!("expected struct"),
        }
    }

    #[test]
    fn test_parse_path_param() {
        let input: DeriveInput = parse_quote! {
            struct R { #[param(path = "id")] id: String }
        };
        let attr = ParamAttr::from_field(first_field(&input)).unwrap().unwrap();
        assert_eq!(attr.source, Source::Path);
        assert_eq!(attr.name.as_deref(), Some("id"));
        assert!(attr.required);
    }

    #[test]
    fn test_parse_required_forms() {
        let input: DeriveInput = parse_quote! {
            struct R { #[param(query = "q", required = false)] q: String }
        };
        let attr = ParamAttr::from_field(first_field(&input)).unwrap().unwrap();
        assert!(!attr.required);

        let input: DeriveInput = parse_quote! {
            struct R { #[param(cookie = "who", required = "false")] who: String }
        };
        let attr = ParamAttr::from_field(first_field(&input)).unwrap().unwrap();
        assert_eq!(attr.source, Source::Cookie);
        assert!(!attr.required);

        let input: DeriveInput = parse_quote! {
            struct R { #[param(header = "x", required = "maybe")] x: String }
        };
        assert!(ParamAttr::from_field(first_field(&input)).is_err());
    }

    #[test]
    fn test_bare_source_uses_field_name() {
        let input: DeriveInput = parse_quote! {
            struct R { #[param(query)] page: String }
        };
        let attr = ParamAttr::from_field(first_field(&input)).unwrap().unwrap();
        assert_eq!(attr.source, Source::Query);
        assert!(attr.name.is_none());
    }

    #[test]
    fn test_two_sources_rejected() {
        let input: DeriveInput = parse_quote! {
            struct R { #[param(path = "id", query = "id")] id: String }
        };
        let err = ParamAttr::from_field(first_field(&input)).unwrap_err();
        assert!(err.to_string().contains("at most one source"));
    }

    #[test]
    fn test_body_marker() {
        let input: DeriveInput = parse_quote! {
            struct R { #[param(body)] name: String }
        };
        let attr = ParamAttr::from_field(first_field(&input)).unwrap().unwrap();
        assert_eq!(attr.source, Source::Body);

        let input: DeriveInput = parse_quote! {
            struct R { #[param(body, required = false)] name: String }
        };
        assert!(ParamAttr::from_field(first_field(&input)).is_err());
    }

    #[test]
    fn test_unannotated_field() {
        let input: DeriveInput = parse_quote! {
            struct R { #[serde(default)] note: String }
        };
        assert!(ParamAttr::from_field(first_field(&input)).unwrap().is_none());
    }

    #[test]
    fn test_crate_path() {
        let input: DeriveInput = parse_quote! {
            #[record(crate = "gotodoc::core")]
            struct R;
        };
        let path = crate_path(&input.attrs).unwrap();
        assert_eq!(path.to_token_stream().to_string(), "gotodoc :: core");

        let input: DeriveInput = parse_quote! { struct R; };
        let path = crate_path(&input.attrs).unwrap();
        assert_eq!(path.to_token_stream().to_string(), ":: gotodoc_core");
    }

    #[test]
    fn test_serde_attrs() {
        let input: DeriveInput = parse_quote! {
            #[serde(rename_all = "camelCase", deny_unknown_fields)]
            struct R;
        };
        let attrs = SerdeAttrs::from_attrs(&input.attrs).unwrap();
        assert_eq!(attrs.rename_all.as_deref(), Some("camelCase"));
        assert!(!attrs.skip);
    }

    #[test]
    fn test_rename_all_rules() {
        assert_eq!(apply_rename_all("camelCase", "user_id"), "userId");
        assert_eq!(apply_rename_all("PascalCase", "user_id"), "UserId");
        assert_eq!(apply_rename_all("kebab-case", "user_id"), "user-id");
        assert_eq!(apply_rename_all("SCREAMING_SNAKE_CASE", "user_id"), "USER_ID");
        assert_eq!(apply_rename_all("snake_case", "InStock"), "in_stock");
        assert_eq!(apply_rename_all("lowercase", "InStock"), "instock");
        assert_eq!(apply_rename_all("unknown", "InStock"), "InStock");
    }

    #[test]
    fn test_doc_comment() {
        let input: DeriveInput = parse_quote! {
            /// An item
            /// in stock.
            struct R;
        };
        assert_eq!(doc_comment(&input.attrs).as_deref(), Some("An item in stock."));
    }
}
