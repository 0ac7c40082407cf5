//! `#[derive(RequestRecord)]` expansion.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, Data, DeriveInput, Fields};

use crate::parse::{apply_rename_all, crate_path, ParamAttr, SerdeAttrs, Source};

pub fn expand_request_record(input: DeriveInput) -> syn::Result<TokenStream> {
    let krate = crate_path(&input.attrs)?;
    let container_serde = SerdeAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "RequestRecord on a unit struct has nothing to bind; use `()` instead",
                ))
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "RequestRecord requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "RequestRecord can only be derived for structs",
            ))
        }
    };

    let mut descriptors = Vec::new();
    let mut accessors = Vec::new();
    let mut body_properties = Vec::new();

    for field in fields {
        let Some(param) = ParamAttr::from_field(field)? else {
            continue;
        };
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.to_string();
        let ty = &field.ty;
        let variant = param.source.variant();

        if param.source == Source::Body {
            let serde = SerdeAttrs::from_attrs(&field.attrs)?;
            if serde.skip {
                return Err(syn::Error::new(
                    field.span(),
                    "a body field cannot be skipped by serde",
                ));
            }
            let json_name = serde.rename.unwrap_or_else(|| {
                container_serde
                    .rename_all
                    .as_deref()
                    .map_or_else(|| field_name.clone(), |rule| apply_rename_all(rule, &field_name))
            });

            descriptors.push(quote! {
                #krate::FieldDescriptor::new(#field_name, #json_name, #krate::FieldSource::#variant, true)
            });
            body_properties.push(quote_spanned! {ty.span()=>
                schema = schema.property(#json_name, <#ty as #krate::ApiSchema>::schema());
                if <#ty as #krate::ApiSchema>::required() {
                    schema = schema.required_property(#json_name);
                }
            });
        } else {
            let name = param.name.unwrap_or_else(|| field_name.clone());
            let required = param.required;

            descriptors.push(quote! {
                #krate::FieldDescriptor::new(#field_name, #name, #krate::FieldSource::#variant, #required)
            });
            // A non-String field fails to type-check here.
            accessors.push(quote_spanned! {ty.span()=>
                #field_name => ::core::option::Option::Some(&mut self.#ident),
            });
        }
    }

    let body_schema = if body_properties.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            fn body_schema() -> ::core::option::Option<#krate::Schema> {
                let mut schema = #krate::Schema::object();
                #(#body_properties)*
                ::core::option::Option::Some(schema)
            }
        }
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::RequestRecord for #name #ty_generics #where_clause {
            const FIELDS: &'static [#krate::FieldDescriptor] = &[
                #(#descriptors),*
            ];

            fn field_mut(
                &mut self,
                field: &str,
            ) -> ::core::option::Option<&mut ::std::string::String> {
                match field {
                    #(#accessors)*
                    _ => ::core::option::Option::None,
                }
            }

            #body_schema
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> String {
        expand_request_record(input).unwrap().to_string()
    }

    #[test]
    fn test_expands_descriptors_and_accessors() {
        let out = expand(parse_quote! {
            struct GetItem {
                #[param(path = "id")]
                id: String,
                #[param(query = "search", required = false)]
                search: String,
                note: String,
            }
        });

        assert!(out.contains("\"id\" , \"id\" , :: gotodoc_core :: FieldSource :: Path , true"));
        assert!(out.contains("\"search\" , \"search\" , :: gotodoc_core :: FieldSource :: Query , false"));
        assert!(out.contains("& mut self . search"));
        assert!(!out.contains("note"));
        assert!(!out.contains("body_schema"));
    }

    #[test]
    fn test_body_fields_generate_schema() {
        let out = expand(parse_quote! {
            #[serde(rename_all = "camelCase")]
            struct CreateItem {
                #[param(body)]
                item_name: String,
                #[param(body)]
                #[serde(rename = "q")]
                qty: i64,
            }
        });

        assert!(out.contains("fn body_schema"));
        assert!(out.contains("\"itemName\""));
        assert!(out.contains("\"q\""));
        assert!(out.contains("FieldSource :: Body"));
    }

    #[test]
    fn test_custom_crate_path() {
        let out = expand(parse_quote! {
            #[record(crate = "gotodoc::core")]
            struct R {
                #[param(header = "x-tenant")]
                tenant: String,
            }
        });
        assert!(out.contains("impl gotodoc :: core :: RequestRecord for R"));
    }

    #[test]
    fn test_rejects_enums_and_tuple_structs() {
        assert!(expand_request_record(parse_quote! { enum E { A } }).is_err());
        assert!(expand_request_record(parse_quote! { struct T(String); }).is_err());
        assert!(expand_request_record(parse_quote! { struct U; }).is_err());
    }

    #[test]
    fn test_rejects_skipped_body_field() {
        let result = expand_request_record(parse_quote! {
            struct R {
                #[param(body)]
                #[serde(skip)]
                name: String,
            }
        });
        assert!(result.is_err());
    }
}
