//! Derive macros for slicestore
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `slicestore_core::Action` for an action enum
//!
//! # Example
//!
//! ```ignore
//! use slicestore_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     Increment { counter_id: String },
//!     #[action(rename = "reset-all")]
//!     ResetAll,
//! }
//!
//! assert_eq!(CounterAction::Increment { counter_id: "c1".into() }.name(), "increment");
//! assert_eq!(CounterAction::ResetAll.name(), "reset-all");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive macro for action enums
///
/// Implements `slicestore_core::Action`, whose `name()` returns the event tag
/// of the variant. The tag defaults to the variant name in lower camel case
/// (`UsersStored` becomes `usersStored`), matching the
/// `#[serde(rename_all = "camelCase")]` convention used for tagged actions.
///
/// # Attributes
///
/// - `#[action(rename = "...")]` - Use an explicit tag for a variant
///
/// # Errors
///
/// Produces a compile error if applied to a non-enum type or if an
/// `#[action(...)]` attribute is malformed.
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_action(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let mut name_arms = Vec::with_capacity(data_enum.variants.len());

    for variant in &data_enum.variants {
        let variant_ident = &variant.ident;
        let tag = renamed(&variant.attrs)?
            .unwrap_or_else(|| lower_camel_case(&variant_ident.to_string()));

        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_ident { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_ident(..) },
            Fields::Unit => quote! { Self::#variant_ident },
        };
        name_arms.push(quote! { #pattern => #tag, });
    }

    // An uninhabited enum has no arms; `match *self {}` keeps it well-formed.
    let body = if name_arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#name_arms)*
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::slicestore_core::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                #body
            }
        }
    })
}

/// Reads `#[action(rename = "...")]` from a variant's attributes
fn renamed(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut tag = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                tag = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported action attribute, expected `rename`"))
            }
        })?;
    }

    Ok(tag)
}

/// `UserRemoveSelected` -> `userRemoveSelected`
fn lower_camel_case(ident: &str) -> String {
    let mut chars = ident.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}
