//! Procedural macros for form-dispatch

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Case convention for generated action names
    #[darling(default)]
    rename_all: Option<String>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,

    /// Explicit action name, overriding `rename_all`
    #[darling(default)]
    rename: Option<String>,

    /// Debounce key attached to this variant's metadata
    #[darling(default)]
    debounce: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum RenameRule {
    Pascal,
    Snake,
    ScreamingSnake,
}

impl RenameRule {
    fn parse(rule: Option<&str>) -> Option<Self> {
        match rule {
            None | Some("PascalCase") => Some(Self::Pascal),
            Some("snake_case") => Some(Self::Snake),
            Some("SCREAMING_SNAKE_CASE") => Some(Self::ScreamingSnake),
            Some(_) => None,
        }
    }

    fn apply(self, ident: &str) -> String {
        match self {
            Self::Pascal => ident.to_string(),
            Self::Snake => to_snake_case(ident),
            Self::ScreamingSnake => to_snake_case(ident).to_uppercase(),
        }
    }
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Derive macro for the Action trait
///
/// Generates:
/// - `name() -> &'static str`, the variant name (or its renamed form)
/// - `meta() -> Option<ActionMeta>` for variants marked `#[action(debounce = "...")]`
/// - an inherent `NAMES` constant listing every action name in declaration order
///
/// # Attributes
///
/// - `#[action(rename_all = "SCREAMING_SNAKE_CASE")]` on the enum; also
///   accepts `"snake_case"` and `"PascalCase"` (the default)
/// - `#[action(rename = "...")]` on a variant
/// - `#[action(debounce = "keystroke")]` on a variant
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(rename_all = "SCREAMING_SNAKE_CASE")]
/// enum EditionAction {
///     UpdateStatus(Option<i64>),
///     #[action(debounce = "keystroke")]
///     UpdateWeight(Option<f64>),
///     ShowPhysical,
/// }
///
/// assert_eq!(EditionAction::ShowPhysical.name(), "SHOW_PHYSICAL");
/// assert!(EditionAction::UpdateWeight(None).meta().is_some());
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    if variants.is_empty() {
        return syn::Error::new_spanned(&input, "Action requires at least one variant")
            .to_compile_error()
            .into();
    }

    let Some(rule) = RenameRule::parse(opts.rename_all.as_deref()) else {
        return syn::Error::new_spanned(
            &input.ident,
            "unsupported rename_all value, expected \"PascalCase\", \"snake_case\" or \"SCREAMING_SNAKE_CASE\"",
        )
        .to_compile_error()
        .into();
    };

    let action_names: Vec<String> = variants
        .iter()
        .map(|v| {
            v.rename
                .clone()
                .unwrap_or_else(|| rule.apply(&v.ident.to_string()))
        })
        .collect();

    // `{ .. }` matches unit, tuple and struct variants alike
    let name_arms = variants.iter().zip(&action_names).map(|(v, action_name)| {
        let variant = &v.ident;
        quote! { #name::#variant { .. } => #action_name }
    });

    let meta_fn = if variants.iter().any(|v| v.debounce.is_some()) {
        let meta_arms = variants.iter().map(|v| {
            let variant = &v.ident;
            match &v.debounce {
                Some(key) => quote! {
                    #name::#variant { .. } => ::core::option::Option::Some(
                        form_dispatch::ActionMeta::debounce(#key)
                    )
                },
                None => quote! {
                    #name::#variant { .. } => ::core::option::Option::None
                },
            }
        });
        quote! {
            fn meta(&self) -> ::core::option::Option<form_dispatch::ActionMeta> {
                match self {
                    #(#meta_arms),*
                }
            }
        }
    } else {
        quote! {}
    };

    let names_doc = format!("Every [`{}`] action name, in declaration order.", name);

    let expanded = quote! {
        impl form_dispatch::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            #meta_fn
        }

        impl #name {
            #[doc = #names_doc]
            pub const NAMES: &'static [&'static str] = &[#(#action_names),*];
        }
    };

    TokenStream::from(expanded)
}
