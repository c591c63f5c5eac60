//! Procedural macros for the aoc-companion library

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Lit, parse_macro_input};

/// Derive macro registering a day with the plugin manifest
///
/// The generated plugin records the type's name and the module it is defined
/// in. Discovery matches the last segment of that module path against day
/// folder names, so a day defined in `year_2023/day05/mod.rs` is found for the
/// folder `day05`.
///
/// # Attributes
///
/// - `module`: Optional. Folder name to register under instead of the
///   defining module's name, for days defined outside their own module
///
/// # Requirements
///
/// The type must implement the `Day` trait. If the trait is not implemented,
/// you will get a compile-time error:
///
/// ```text
/// error[E0277]: the trait bound `Day05: Day` is not satisfied
///   |
///   | struct Day05;
///   |        ^^^^^ unsatisfied trait bound
/// ```
///
/// # Example
///
/// ```ignore
/// use aoc_companion::{AocDay, ConfigError, Day, DayConfig, TaskResult};
///
/// #[derive(AocDay)]
/// pub struct Day05;
///
/// impl Day for Day05 {
///     // ... implementation
/// }
/// ```
#[proc_macro_derive(AocDay, attributes(aoc))]
pub fn derive_aoc_day(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "AocDay cannot be derived for generic types",
        ));
    }

    let mut module: Option<String> = None;
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("aoc")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("module") {
                match meta.value()?.parse()? {
                    Lit::Str(lit) => {
                        module = Some(lit.value());
                        Ok(())
                    }
                    other => Err(syn::Error::new_spanned(other, "expected a string literal")),
                }
            } else {
                Err(meta.error("unsupported aoc attribute, expected `module`"))
            }
        })?;
    }

    let module_path = match module {
        Some(module) => quote! { ::core::concat!(::core::module_path!(), "::", #module) },
        None => quote! { ::core::module_path!() },
    };

    Ok(quote! {
        // Compile-time check that the type implements the Day trait
        const _: () = {
            trait MustImplementDay: ::aoc_companion::Day {}
            impl MustImplementDay for #name {}
        };

        ::aoc_companion::inventory::submit! {
            ::aoc_companion::DayPlugin {
                name: #name_str,
                module_path: #module_path,
                factory: ::aoc_companion::instantiate::<#name>,
            }
        }
    })
}
