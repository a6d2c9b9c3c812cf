//! Procedural macros for `bevy_ldtkmap`.
//!
//! This crate provides the `LdtkFields` derive macro, which builds a component
//! from an LDtk entity's field instances and can bind it to an entity
//! identifier, and the `LdtkEnum` derive macro for LDtk enum fields.

use proc_macro::TokenStream;
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Expr, Fields, LitStr, Token, Type, parse_macro_input,
    parse_quote, punctuated::Punctuated, token::Comma,
};

/// Get the path tokens for `bevy_ldtkmap_core` (through the umbrella crate if
/// the caller depends on it).
fn get_core_path() -> proc_macro2::TokenStream {
    if let Ok(found) = crate_name("bevy_ldtkmap") {
        match found {
            // Examples within the umbrella crate use `bevy_ldtkmap::` too
            FoundCrate::Itself => quote!(::bevy_ldtkmap::core),
            FoundCrate::Name(name) => {
                let ident = format_ident!("{name}");
                quote!(::#ident::core)
            }
        }
    } else if let Ok(found) = crate_name("bevy_ldtkmap_core") {
        match found {
            // The core crate declares `extern crate self as bevy_ldtkmap_core`
            FoundCrate::Itself => quote!(::bevy_ldtkmap_core),
            FoundCrate::Name(name) => {
                let ident = format_ident!("{name}");
                quote!(::#ident)
            }
        }
    } else {
        quote!(::bevy_ldtkmap::core)
    }
}

/// Derive macro for building a type from LDtk entity fields.
///
/// This macro generates:
/// - A `FromLdtkFields` implementation reading each struct field from the
///   LDtk field with the same identifier
/// - With `#[ldtk(entity = "...")]`, an inventory submission so the type is
///   inserted on every spawned entity with that identifier
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_ldtkmap_macros::LdtkFields;
///
/// #[derive(Component, LdtkFields)]
/// #[ldtk(entity = "Door")]
/// struct Door {
///     locked: bool,
///     #[ldtk(name = "key_id")]
///     key: Option<i32>,
///     #[ldtk(default = 1.5)]
///     open_time: f32,
/// }
/// ```
///
/// # Attributes
///
/// - `#[ldtk(entity = "...")]` - Bind the component to an entity identifier (type-level)
/// - `#[ldtk(name = "...")]` - LDtk field identifier, if different from the Rust name
/// - `#[ldtk(default = ...)]` - Value used when the field is missing or null
///   (`#[ldtk(default)]` uses `Default::default()`)
/// - `#[ldtk(skip)]` - Don't read this field, use `Default::default()`
///
/// `Option<T>` fields are `None` when the field is missing. Other fields
/// without a default make conversion fail with `FieldError::Missing`.
#[proc_macro_derive(LdtkFields, attributes(ldtk))]
pub fn derive_ldtk_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_ldtk_fields_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive macro for reading a unit enum from an LDtk enum field.
///
/// Variants match the LDtk enum value by name, or by
/// `#[ldtk(name = "...")]` when the names differ. Plain string fields are
/// accepted too, so the same enum works with simplified exports.
///
/// # Example
///
/// ```ignore
/// #[derive(LdtkEnum, Clone, Copy, PartialEq, Debug)]
/// enum Item {
///     Sword,
///     #[ldtk(name = "Health_potion")]
///     Potion,
/// }
/// ```
#[proc_macro_derive(LdtkEnum, attributes(ldtk))]
pub fn derive_ldtk_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let result = match &input.data {
        Data::Enum(data) => handle_enum(&input, data),
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "LdtkEnum can only be derived for enums",
        )),
    };

    match result {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_ldtk_fields_impl(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let type_name = &input.ident;
    let core = get_core_path();
    let container = parse_container_attrs(&input.attrs)?;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            type_name,
            "LdtkFields can only be derived for structs",
        ));
    };

    let constructor = match &data.fields {
        Fields::Named(fields) => {
            let inits = fields
                .named
                .iter()
                .map(|field| field_init(field, &core))
                .collect::<syn::Result<Vec<_>>>()?;
            quote! { Self { #(#inits),* } }
        }
        Fields::Unit => quote! { Self },
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                type_name,
                "LdtkFields does not support tuple structs",
            ));
        }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields_ident = if matches!(data.fields, Fields::Unit) {
        format_ident!("_fields")
    } else {
        format_ident!("__fields")
    };

    let from_fields = quote! {
        impl #impl_generics #core::fields::FromLdtkFields for #type_name #ty_generics #where_clause {
            fn from_ldtk_fields(
                #fields_ident: &#core::fields::LdtkFields,
            ) -> ::std::result::Result<Self, #core::fields::FieldError> {
                ::std::result::Result::Ok(#constructor)
            }
        }
    };

    let Some(entity) = container.entity else {
        return Ok(from_fields);
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[ldtk(entity = \"...\")] requires a type without generic parameters",
        ));
    }

    Ok(quote! {
        #from_fields

        // Submit to inventory for compile-time registration
        #core::inventory::submit! {
            #core::registry::LdtkEntityInfo {
                identifier: #entity,
                type_name: ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#type_name)),
                insert: #type_name::__ldtk_insert,
            }
        }

        impl #type_name {
            #[doc(hidden)]
            fn __ldtk_insert(
                __entity: &mut ::bevy::ecs::system::EntityCommands,
                __fields: &#core::fields::LdtkFields,
            ) -> ::std::result::Result<(), #core::fields::FieldError> {
                let component = <Self as #core::fields::FromLdtkFields>::from_ldtk_fields(__fields)?;
                __entity.insert(component);
                ::std::result::Result::Ok(())
            }
        }
    })
}

/// Initializer for one named struct field.
fn field_init(field: &syn::Field, core: &proc_macro2::TokenStream) -> syn::Result<proc_macro2::TokenStream> {
    let Some(field_name) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    let attrs = parse_field_attrs(&field.attrs)?;

    if attrs.skip {
        return Ok(quote! { #field_name: ::std::default::Default::default() });
    }

    let ldtk_name = attrs
        .name
        .map_or_else(|| field_name.to_string(), |name| name.value());
    let field_type = &field.ty;

    let init = if let Some(default) = attrs.default {
        quote! {
            match __fields.get(#ldtk_name) {
                ::std::option::Option::None
                | ::std::option::Option::Some(#core::fields::FieldValue::Null) => #default,
                ::std::option::Option::Some(_) => __fields.get_as::<#field_type>(#ldtk_name)?,
            }
        }
    } else if is_option_type(field_type) {
        quote! {
            if __fields.contains(#ldtk_name) {
                __fields.get_as::<#field_type>(#ldtk_name)?
            } else {
                ::std::option::Option::None
            }
        }
    } else {
        quote! { __fields.get_as::<#field_type>(#ldtk_name)? }
    };

    Ok(quote! { #field_name: #init })
}

fn handle_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<proc_macro2::TokenStream> {
    let enum_name = &input.ident;
    let core = get_core_path();

    let arms = unit_variant_arms(&data.variants)?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #core::fields::FromFieldValue for #enum_name #ty_generics #where_clause {
            fn from_field_value(value: &#core::fields::FieldValue) -> ::std::option::Option<Self> {
                match value {
                    #core::fields::FieldValue::Enum(s) | #core::fields::FieldValue::String(s) => {
                        match s.as_str() {
                            #(#arms)*
                            _ => ::std::option::Option::None,
                        }
                    }
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

/// `"Name" => Some(Self::Variant),` for each variant.
fn unit_variant_arms(
    variants: &Punctuated<syn::Variant, Comma>,
) -> syn::Result<Vec<proc_macro2::TokenStream>> {
    variants
        .iter()
        .map(|variant| {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    variant,
                    "LdtkEnum only supports unit variants",
                ));
            }
            let attrs = parse_field_attrs(&variant.attrs)?;
            let variant_ident = &variant.ident;
            let variant_name = attrs
                .name
                .map_or_else(|| variant_ident.to_string(), |name| name.value());
            Ok(quote! {
                #variant_name => ::std::option::Option::Some(Self::#variant_ident),
            })
        })
        .collect()
}

#[derive(Default)]
struct ContainerAttrs {
    entity: Option<LitStr>,
}

/// Parse `#[ldtk(entity = "...")]` on the type.
fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("ldtk")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("entity") {
                parsed.entity = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown ldtk attribute, expected `entity`"))
            }
        })?;
    }
    Ok(parsed)
}

#[derive(Default)]
struct FieldAttrs {
    name: Option<LitStr>,
    default: Option<Expr>,
    skip: bool,
}

/// Parse `#[ldtk(name = "...", default = ..., skip)]` on a field or variant.
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("ldtk")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                parsed.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("default") {
                parsed.default = Some(if meta.input.peek(Token![=]) {
                    meta.value()?.parse()?
                } else {
                    parse_quote!(::std::default::Default::default())
                });
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
            } else {
                return Err(meta.error("unknown ldtk attribute, expected `name`, `default` or `skip`"));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}

/// Whether the type is written as `Option<T>`.
fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
    {
        return args.args.len() == 1;
    }
    false
}
