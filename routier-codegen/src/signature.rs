//! Delegate signature rendering.

use proc_macro2::TokenStream;
use quote::quote;

use crate::descriptor::EndpointDescriptor;

/// Render the nominal callable type matching the endpoint's parameter list
/// and response shape, for binding-site type checks upstream.
///
/// Zero parameters and no meaningful response yields `fn()`; a meaningful
/// response adds `-> W` with the as-declared (wrapped) response type. With
/// `consider_optionality`, optional parameters render as `Option<T>` so the
/// delegate type matches a nullable handler parameter exactly. Rendering
/// only; runtime behavior is unaffected.
pub fn delegate_type(descriptor: &EndpointDescriptor, consider_optionality: bool) -> TokenStream {
    let ret = descriptor.meaningful_response().map(|response| {
        let wrapped = &response.wrapped_response_type;
        quote! { -> #wrapped }
    });

    if descriptor.parameters.is_empty() {
        return quote! { fn() #ret };
    }

    let types: Vec<TokenStream> = descriptor
        .parameters
        .iter()
        .map(|param| param.rendered_ty(consider_optionality))
        .collect();
    quote! { fn(#(#types),*) #ret }
}
