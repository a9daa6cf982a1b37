//! `#[derive(Record)]` implementation.
//!
//! The derive emits two impls: `record_gauge::Record`, which lists the fields
//! in declaration order, and `record_gauge::GaugeField`, which lets a parent
//! record see this type as a nested record and flatten it.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, LitStr, Result, parse_quote};

/// Options from `#[gauge(...)]` on the struct itself.
#[derive(Default)]
struct ContainerAttrs {
    /// Overrides the struct identifier as the type name.
    name: Option<LitStr>,
}

/// Options from `#[gauge(...)]` on a field.
#[derive(Default)]
struct FieldAttrs {
    /// Annotation string, the tag is its first comma-separated segment.
    tag: Option<LitStr>,
    /// Overrides the field identifier as the flattened key.
    rename: Option<LitStr>,
}

fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("gauge")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                parsed.name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown gauge attribute, expected `name`"))
            }
        })?;
    }
    Ok(parsed)
}

fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("gauge")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag") {
                parsed.tag = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("rename") {
                parsed.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown gauge attribute, expected `tag` or `rename`"))
            }
        })?;
    }
    Ok(parsed)
}

/// Field identifier as written, without a raw `r#` prefix.
fn field_key(ident: &Ident) -> String {
    let key = ident.to_string();
    key.strip_prefix("r#").map_or_else(|| key.clone(), str::to_string)
}

/// Require `GaugeField` of every type parameter.
fn add_field_bounds(mut generics: Generics) -> Generics {
    let params: Vec<Ident> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::record_gauge::GaugeField));
    }
    generics
}

/// Generate code for `#[derive(Record)]`.
pub fn expand(input: DeriveInput) -> TokenStream {
    derive(&input).unwrap_or_else(syn::Error::into_compile_error)
}

fn derive(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "derive(Record) can only be used on structs with named fields",
        ));
    };

    let named: Vec<_> = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new_spanned(
                fields,
                "derive(Record) does not support tuple structs",
            ));
        }
    };

    let container = parse_container_attrs(&input.attrs)?;
    let ident = &input.ident;
    let type_name = container
        .name
        .map_or_else(|| ident.to_string(), |name| name.value());

    let mut field_exprs = Vec::with_capacity(named.len());
    for field in named {
        let Some(member) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        let key = attrs
            .rename
            .map_or_else(|| field_key(member), |rename| rename.value());
        let annotation = attrs.tag.map(|tag| tag.value()).unwrap_or_default();

        field_exprs.push(quote! {
            ::record_gauge::Field::new(
                #key,
                #annotation,
                ::record_gauge::GaugeField::field_kind(&self.#member),
            )
        });
    }

    let generics = add_field_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::record_gauge::Record for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<::record_gauge::Field<'_>> {
                ::std::vec![#(#field_exprs),*]
            }
        }

        impl #impl_generics ::record_gauge::GaugeField for #ident #ty_generics #where_clause {
            fn field_kind(&self) -> ::record_gauge::FieldKind<'_> {
                ::record_gauge::FieldKind::Record(self)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_named_struct() {
        let input: DeriveInput = parse_quote! {
            struct Sample {
                #[gauge(tag = "Name,string")]
                name: String,
                count: i64,
            }
        };
        let output = derive(&input).unwrap().to_string();
        assert!(output.contains("\"Sample\""));
        assert!(output.contains("\"Name,string\""));
        assert!(output.contains("\"count\""));
        assert!(output.contains("FieldKind :: Record (self)"));
    }

    #[test]
    fn container_name_overrides_ident() {
        let input: DeriveInput = parse_quote! {
            #[gauge(name = "ChipStat")]
            struct Chip {
                funny: i64,
            }
        };
        let output = derive(&input).unwrap().to_string();
        assert!(output.contains("\"ChipStat\""));
        assert!(!output.contains("\"Chip\""));
    }

    #[test]
    fn rename_overrides_key() {
        let input: DeriveInput = parse_quote! {
            struct PoolData {
                #[gauge(rename = "User")]
                user: String,
            }
        };
        let output = derive(&input).unwrap().to_string();
        assert!(output.contains("\"User\""));
    }

    #[test]
    fn raw_identifier_key() {
        let ident: Ident = parse_quote!(r#type);
        assert_eq!(field_key(&ident), "type");
    }

    #[test]
    fn unit_struct_has_no_fields() {
        let input: DeriveInput = parse_quote! {
            struct Empty;
        };
        let output = derive(&input).unwrap().to_string();
        assert!(output.contains("vec ! []"));
    }

    #[test]
    fn rejects_enums() {
        let input: DeriveInput = parse_quote! {
            enum State { Up, Down }
        };
        assert!(derive(&input).is_err());
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            struct Pair(i64, i64);
        };
        assert!(derive(&input).is_err());
    }

    #[test]
    fn rejects_unknown_attribute() {
        let input: DeriveInput = parse_quote! {
            struct Sample {
                #[gauge(skip)]
                name: String,
            }
        };
        assert!(derive(&input).is_err());
    }

    #[test]
    fn type_parameters_are_bounded() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T> {
                inner: T,
            }
        };
        let output = derive(&input).unwrap().to_string();
        assert!(output.contains("where T : :: record_gauge :: GaugeField"));
    }

    #[test]
    fn existing_where_clause_is_extended() {
        let input: DeriveInput = parse_quote! {
            struct Pair<'a, A, B: Clone> where A: Copy {
                left: A,
                right: &'a B,
            }
        };
        let output = derive(&input).unwrap().to_string();
        assert!(output.contains("A : Copy"));
        assert!(output.contains("A : :: record_gauge :: GaugeField"));
        assert!(output.contains("B : :: record_gauge :: GaugeField"));
    }
}
