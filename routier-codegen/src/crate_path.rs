//! Crate path resolution for generated code.
//!
//! Detects whether the user depends on `routier` (facade) or `routier-core`
//! directly, and returns the appropriate path prefix for generated code.

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// Returns the token stream for accessing `routier_core` types.
///
/// If the user depends on `routier`, returns `::routier`.
/// Otherwise returns `::routier_core`.
pub fn routier_core_path() -> TokenStream {
    // First check if the facade crate is available
    if let Ok(found) = crate_name("routier") {
        match found {
            FoundCrate::Itself => quote!(crate),
            FoundCrate::Name(name) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident)
            }
        }
    } else if let Ok(found) = crate_name("routier-core") {
        match found {
            FoundCrate::Itself => quote!(crate),
            FoundCrate::Name(name) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident)
            }
        }
    } else {
        // Fallback - assume routier_core is available (for error messages)
        quote!(::routier_core)
    }
}
