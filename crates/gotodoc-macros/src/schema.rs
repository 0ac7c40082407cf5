//! `#[derive(ApiSchema)]` expansion.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, Data, DataEnum, DeriveInput, Fields, FieldsNamed, Path};

use crate::parse::{apply_rename_all, crate_path, doc_comment, SerdeAttrs};

pub fn expand_api_schema(input: DeriveInput) -> syn::Result<TokenStream> {
    let krate = crate_path(&input.attrs)?;
    let serde = SerdeAttrs::from_attrs(&input.attrs)?;

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => object_schema(&krate, named, serde.rename_all.as_deref())?,
            Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
                let ty = &unnamed.unnamed[0].ty;
                quote_spanned! {ty.span()=> <#ty as #krate::ApiSchema>::schema() }
            }
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "ApiSchema requires named fields or a single-field newtype",
                ))
            }
        },
        Data::Enum(data) => enum_schema(&krate, data, serde.rename_all.as_deref())?,
        Data::Union(_) => {
            return Err(syn::Error::new(
                input.ident.span(),
                "ApiSchema cannot be derived for unions",
            ))
        }
    };

    let describe = doc_comment(&input.attrs).map(|doc| quote! { .with_description(#doc) });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::ApiSchema for #name #ty_generics #where_clause {
            fn schema() -> #krate::Schema {
                let schema: #krate::Schema = { #body };
                schema #describe
            }
        }
    })
}

fn object_schema(
    krate: &Path,
    fields: &FieldsNamed,
    rename_all: Option<&str>,
) -> syn::Result<TokenStream> {
    let mut properties = Vec::new();

    for field in &fields.named {
        let serde = SerdeAttrs::from_attrs(&field.attrs)?;
        if serde.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let rust_name = ident.to_string();
        let json_name = serde.rename.unwrap_or_else(|| {
            rename_all.map_or_else(|| rust_name.clone(), |rule| apply_rename_all(rule, &rust_name))
        });
        let ty = &field.ty;
        let describe = doc_comment(&field.attrs).map(|doc| quote! { .with_description(#doc) });

        properties.push(quote_spanned! {ty.span()=>
            schema = schema.property(#json_name, <#ty as #krate::ApiSchema>::schema() #describe);
            if <#ty as #krate::ApiSchema>::required() {
                schema = schema.required_property(#json_name);
            }
        });
    }

    Ok(quote! {
        let mut schema = #krate::Schema::object();
        #(#properties)*
        schema
    })
}

fn enum_schema(krate: &Path, data: &DataEnum, rename_all: Option<&str>) -> syn::Result<TokenStream> {
    let mut names = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "ApiSchema can only be derived for enums with unit variants",
            ));
        }
        let serde = SerdeAttrs::from_attrs(&variant.attrs)?;
        if serde.skip {
            continue;
        }
        let rust_name = variant.ident.to_string();
        names.push(serde.rename.unwrap_or_else(|| {
            rename_all.map_or_else(|| rust_name.clone(), |rule| apply_rename_all(rule, &rust_name))
        }));
    }

    Ok(quote! {
        #krate::Schema::string_enum([#(#names),*])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_struct_expansion() {
        let out = expand_api_schema(parse_quote! {
            /// A stocked item.
            struct Item {
                id: u64,
                #[serde(rename = "label")]
                name: String,
                #[serde(skip)]
                cache: String,
            }
        })
        .unwrap()
        .to_string();

        assert!(out.contains("impl :: gotodoc_core :: ApiSchema for Item"));
        assert!(out.contains("\"id\""));
        assert!(out.contains("\"label\""));
        assert!(!out.contains("cache"));
        assert!(out.contains("\"A stocked item.\""));
    }

    #[test]
    fn test_enum_expansion() {
        let out = expand_api_schema(parse_quote! {
            #[serde(rename_all = "lowercase")]
            enum Size { Small, Large }
        })
        .unwrap()
        .to_string();

        assert!(out.contains("string_enum ([\"small\" , \"large\"])"));
    }

    #[test]
    fn test_data_enum_rejected() {
        let result = expand_api_schema(parse_quote! {
            enum Shape { Circle(f64), Square { side: f64 } }
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_newtype_expansion() {
        let out = expand_api_schema(parse_quote! { struct Id(String); })
            .unwrap()
            .to_string();
        assert!(out.contains("< String as :: gotodoc_core :: ApiSchema > :: schema ()"));
    }
}
