//! Response classification and response-writing emission.
//!
//! Every response descriptor maps to exactly one [`ResponseStrategy`]; the
//! writing statement for each strategy is emitted from an exhaustive match
//! so an unhandled shape is a compile error here, not a silent fallthrough
//! in generated code.

use proc_macro2::TokenStream;
use quote::quote;

use crate::crate_path::routier_core_path;
use crate::descriptor::ResponseDescriptor;

/// How the generated routine writes the handler's result to the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStrategy {
    /// No response declared on a synchronous endpoint: complete immediately.
    NoResponse,
    /// The result value executes itself against the request context.
    SelfExecuting,
    /// Textual primitive: written directly as the body, no serialization.
    PlainText,
    /// Type-erased result: defer to the runtime helper that inspects the
    /// value at request time. The one place runtime polymorphism exists.
    DynamicObject,
    /// Any other concrete type: serialize as structured data. The default
    /// and most common path.
    Serialized,
    /// No response declared on an awaitable endpoint: fall through.
    NoResponseAwaitable,
}

impl ResponseStrategy {
    /// Select the strategy for a response descriptor.
    ///
    /// Predicates are evaluated top-to-bottom; the first match wins. The
    /// choice depends only on the descriptor's shape and the owning
    /// endpoint's awaitability.
    pub fn classify(response: Option<&ResponseDescriptor>, endpoint_awaitable: bool) -> Self {
        let Some(response) = response else {
            return ResponseStrategy::NoResponse;
        };
        if response.has_no_response && !endpoint_awaitable {
            return ResponseStrategy::NoResponse;
        }
        if response.is_self_executing {
            return ResponseStrategy::SelfExecuting;
        }
        if let Some(ty) = &response.response_type {
            if is_text_type(ty) {
                return ResponseStrategy::PlainText;
            }
            if is_dynamic_type(ty) {
                return ResponseStrategy::DynamicObject;
            }
            return ResponseStrategy::Serialized;
        }
        ResponseStrategy::NoResponseAwaitable
    }

    /// Whether the generated routine binds the handler result to a local.
    pub(crate) fn captures_result(&self) -> bool {
        !matches!(
            self,
            ResponseStrategy::NoResponse | ResponseStrategy::NoResponseAwaitable
        )
    }

    /// Emit the writing tail of a request-handling routine.
    ///
    /// Awaitable routines await the write and return nothing; synchronous
    /// routines return the write's future directly, or the completed-task
    /// sentinel when there is nothing to write.
    pub(crate) fn write_stmt(&self, routine_awaitable: bool) -> TokenStream {
        let krate = routier_core_path();
        let call = match self {
            ResponseStrategy::NoResponse | ResponseStrategy::NoResponseAwaitable => {
                return if routine_awaitable {
                    quote! {}
                } else {
                    quote! { return #krate::task::completed(); }
                };
            }
            ResponseStrategy::SelfExecuting => {
                quote! { #krate::response::Respond::respond(__result, &mut __ctx) }
            }
            ResponseStrategy::PlainText => {
                quote! { #krate::response::write_text(&mut __ctx, __result) }
            }
            ResponseStrategy::DynamicObject => {
                quote! { #krate::response::write_dynamic(&mut __ctx, __result) }
            }
            ResponseStrategy::Serialized => {
                quote! { #krate::response::write_json(&mut __ctx, __result) }
            }
        };
        if routine_awaitable {
            quote! { #call.await; }
        } else {
            quote! { return #call; }
        }
    }
}

/// Textual primitive check: `String`, `str`, `&str`, `Cow<_, str>`.
fn is_text_type(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Reference(reference) => is_text_type(&reference.elem),
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map_or(false, |segment| match segment.ident.to_string().as_str() {
                "String" | "str" => true,
                "Cow" => cow_over_str(segment),
                _ => false,
            }),
        _ => false,
    }
}

fn cow_over_str(segment: &syn::PathSegment) -> bool {
    if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
        args.args.iter().any(|arg| {
            matches!(arg, syn::GenericArgument::Type(inner) if is_text_type(inner))
        })
    } else {
        false
    }
}

/// Type-erased check: trait objects, plain or behind `&`/`Box`/`Arc`.
fn is_dynamic_type(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::TraitObject(_) => true,
        syn::Type::Reference(reference) => is_dynamic_type(&reference.elem),
        syn::Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return false;
            };
            if segment.ident != "Box" && segment.ident != "Arc" {
                return false;
            }
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                args.args.iter().any(|arg| {
                    matches!(arg, syn::GenericArgument::Type(inner) if is_dynamic_type(inner))
                })
            } else {
                false
            }
        }
        _ => false,
    }
}
