//! Plain (non-filtered) request-handler synthesis.

use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::args::direct_args;
use crate::crate_path::routier_core_path;
use crate::descriptor::EndpointDescriptor;
use crate::response::ResponseStrategy;

/// Emit the plain request-handling routine for one endpoint.
///
/// `param_prep` is the opaque parameter-preparation block supplied by the
/// binding front end; it is positioned here, never constructed. The emitted
/// routine, in order: binding gate, preparation, 400 short-circuit, default
/// content type, handler invocation, response write. The gate check always
/// precedes the handler call: a binding failure never reaches the handler.
///
/// The routine is declared `async` if and only if the endpoint is awaitable;
/// a synchronous routine never awaits and returns a completion future
/// instead.
pub fn request_handler_body(
    descriptor: &EndpointDescriptor,
    param_prep: &TokenStream,
) -> TokenStream {
    let krate = routier_core_path();
    let strategy = ResponseStrategy::classify(descriptor.response.as_ref(), descriptor.is_awaitable);

    let prep = (!descriptor.parameters.is_empty()).then(|| param_prep.clone());

    let gate_exit = if descriptor.is_awaitable {
        quote! { return; }
    } else {
        quote! { return #krate::task::completed(); }
    };

    // Declared content type is a default only; an explicitly set one wins.
    let content_type_default = descriptor
        .response
        .as_ref()
        .and_then(|response| response.content_type.as_deref())
        .map(|content_type| {
            quote! {
                if __ctx.content_type().is_none() {
                    __ctx.set_content_type(#content_type);
                }
            }
        });

    let args = direct_args(&descriptor.parameters);
    let call = if descriptor.is_awaitable {
        quote! { __handler(#(#args),*).await }
    } else {
        quote! { __handler(#(#args),*) }
    };
    let invoke = if strategy.captures_result() {
        quote! { let __result = #call; }
    } else {
        quote! { #call; }
    };

    let write = strategy.write_stmt(descriptor.is_awaitable);

    let body = quote! {
        let mut __binding_failed = false;
        #prep
        if __binding_failed {
            __ctx.set_status(400);
            #gate_exit
        }
        #content_type_default
        #invoke
        #write
    };

    if descriptor.is_awaitable {
        quote! {
            async fn __routier_request_handler(mut __ctx: #krate::RequestContext) {
                #body
            }
        }
    } else {
        quote! {
            fn __routier_request_handler(
                mut __ctx: #krate::RequestContext,
            ) -> #krate::task::CompletionFuture {
                #body
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ParameterDescriptor, ResponseDescriptor, SourceLocation};

    fn endpoint(
        parameters: Vec<ParameterDescriptor>,
        response: Option<ResponseDescriptor>,
        is_awaitable: bool,
    ) -> EndpointDescriptor {
        EndpointDescriptor {
            http_method: "GET".to_string(),
            parameters,
            response,
            is_awaitable,
            location: SourceLocation {
                file: "src/app.rs".to_string(),
                line: 7,
            },
        }
    }

    fn param(name: &str, ty: syn::Type) -> ParameterDescriptor {
        ParameterDescriptor {
            ty,
            is_optional: false,
            symbol_name: name.to_string(),
            capabilities: vec![],
        }
    }

    fn typed_response(ty: syn::Type) -> ResponseDescriptor {
        ResponseDescriptor {
            response_type: Some(ty.clone()),
            wrapped_response_type: ty,
            is_awaitable: false,
            has_no_response: false,
            is_self_executing: false,
            content_type: None,
            capabilities: vec![],
        }
    }

    fn flat(tokens: &TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    #[test]
    fn zero_parameter_void_sync_endpoint() {
        let prep = quote! { let __unused = (); };
        let body = request_handler_body(&endpoint(vec![], None, false), &prep);
        let rendered = flat(&body);

        assert!(rendered.contains("letmut__binding_failed=false;"));
        // No parameters: the preparation block must not be positioned.
        assert!(!rendered.contains("__unused"));
        assert!(rendered.contains("__handler();"));
        assert!(rendered.contains("return::routier_core::task::completed();"));
        // Synchronous routine: plain fn, no awaits anywhere.
        assert!(rendered.starts_with("fn__routier_request_handler"));
        assert!(!rendered.contains(".await"));
    }

    #[test]
    fn two_parameter_serialized_sync_endpoint() {
        let prep = quote! {
            let __arg_id = __ctx.route_value("id");
            let __arg_name = __ctx.query_value("name");
        };
        let descriptor = endpoint(
            vec![
                param("id", syn::parse_quote!(u64)),
                param("name", syn::parse_quote!(String)),
            ],
            Some(typed_response(syn::parse_quote!(Vec<Item>))),
            false,
        );
        let rendered = flat(&request_handler_body(&descriptor, &prep));

        assert!(rendered.contains("let__arg_id=__ctx.route_value(\"id\");"));
        assert!(rendered.contains("if__binding_failed{__ctx.set_status(400);"));
        assert!(rendered.contains("let__result=__handler(__arg_id,__arg_name);"));
        assert!(rendered.contains("return::routier_core::response::write_json(&mut__ctx,__result);"));
    }

    // Binding failure must short-circuit before the handler runs.
    #[test]
    fn gate_check_precedes_handler_invocation() {
        let prep = quote! { let __arg_id = __ctx.route_value("id"); };
        let descriptor = endpoint(
            vec![param("id", syn::parse_quote!(u64))],
            Some(typed_response(syn::parse_quote!(String))),
            true,
        );
        let rendered = flat(&request_handler_body(&descriptor, &prep));

        let gate = rendered
            .find("if__binding_failed{__ctx.set_status(400);return;}")
            .expect("gate guard with early return");
        let call = rendered.find("__handler(").expect("handler invocation");
        assert!(gate < call);
    }

    #[test]
    fn awaitable_endpoint_awaits_handler_exactly_once() {
        let prep = TokenStream::new();
        let descriptor = endpoint(
            vec![],
            Some(typed_response(syn::parse_quote!(Vec<Item>))),
            true,
        );
        let rendered = flat(&request_handler_body(&descriptor, &prep));

        assert!(rendered.starts_with("asyncfn__routier_request_handler"));
        assert_eq!(rendered.matches("__handler(").count(), 1);
        assert!(rendered.contains("let__result=__handler().await;"));
        assert!(rendered.contains("write_json(&mut__ctx,__result).await;"));
        assert!(!rendered.contains("task::completed"));
    }

    #[test]
    fn declared_content_type_is_only_a_default() {
        let prep = TokenStream::new();
        let mut response = typed_response(syn::parse_quote!(String));
        response.content_type = Some("text/html".to_string());
        let descriptor = endpoint(vec![], Some(response), false);
        let rendered = flat(&request_handler_body(&descriptor, &prep));

        assert!(rendered.contains(
            "if__ctx.content_type().is_none(){__ctx.set_content_type(\"text/html\");}"
        ));
    }

    #[test]
    fn self_executing_result_delegates_to_the_value() {
        let prep = TokenStream::new();
        let mut response = typed_response(syn::parse_quote!(StatusPage));
        response.is_self_executing = true;
        let descriptor = endpoint(vec![], Some(response), true);
        let rendered = flat(&request_handler_body(&descriptor, &prep));

        assert!(rendered.contains("Respond::respond(__result,&mut__ctx).await;"));
    }

    #[test]
    fn awaitable_void_endpoint_falls_through() {
        let prep = TokenStream::new();
        let mut response = typed_response(syn::parse_quote!(()));
        response.response_type = None;
        response.has_no_response = true;
        let descriptor = endpoint(vec![], Some(response), true);
        let rendered = flat(&request_handler_body(&descriptor, &prep));

        assert!(rendered.contains("__handler().await;"));
        assert!(!rendered.contains("__result"));
        assert!(!rendered.contains("task::completed"));
    }

    #[test]
    fn synthesis_is_idempotent() {
        let prep = quote! { let __arg_id = __ctx.route_value("id"); };
        let descriptor = endpoint(
            vec![param("id", syn::parse_quote!(u64))],
            Some(typed_response(syn::parse_quote!(Vec<Item>))),
            false,
        );
        let first = request_handler_body(&descriptor, &prep).to_string();
        let second = request_handler_body(&descriptor, &prep).to_string();
        assert_eq!(first, second);
    }
}
