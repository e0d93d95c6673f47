//! Registration-time metadata population synthesis.
//!
//! Runs once per endpoint at route-registration time, never per request.
//! Statements operate on the endpoint builder `__builder`, with the
//! reflective handle `__method_info` for the underlying handler in scope
//! (both provided by the registration front end).

use proc_macro2::TokenStream;
use quote::quote;

use crate::crate_path::routier_core_path;
use crate::descriptor::{EndpointDescriptor, MetadataCapability};
use crate::response::ResponseStrategy;

/// Emit the metadata-population statements for one endpoint.
///
/// Built-in response metadata comes first, then custom contributions from
/// the response type, then per-parameter contributions in declaration order.
pub fn metadata_population_statements(descriptor: &EndpointDescriptor) -> TokenStream {
    let krate = routier_core_path();
    let mut statements: Vec<TokenStream> = Vec::new();

    if let Some(response) = &descriptor.response {
        let strategy = ResponseStrategy::classify(Some(response), descriptor.is_awaitable);
        match strategy {
            ResponseStrategy::PlainText => {
                statements.push(quote! {
                    __builder.with_metadata(#krate::meta::Produces {
                        status: 200,
                        type_name: ::core::option::Option::None,
                        content_type: "text/plain",
                    });
                });
            }
            ResponseStrategy::Serialized | ResponseStrategy::DynamicObject => {
                // Both strategies only classify when a response type exists.
                if let Some(ty) = &response.response_type {
                    statements.push(quote! {
                        __builder.with_metadata(#krate::meta::Produces {
                            status: 200,
                            type_name: ::core::option::Option::Some(
                                ::core::any::type_name::<#ty>(),
                            ),
                            content_type: "application/json",
                        });
                    });
                }
            }
            ResponseStrategy::SelfExecuting
            | ResponseStrategy::NoResponse
            | ResponseStrategy::NoResponseAwaitable => {}
        }

        if response.declares(MetadataCapability::EndpointMetadata) {
            if let Some(ty) = &response.response_type {
                statements.push(quote! {
                    <#ty as #krate::meta::EndpointMetadataProvider>::populate(
                        &__method_info,
                        __builder,
                    );
                });
            }
        }
    }

    // Parameter-info lookup happens once per endpoint, only when some
    // parameter actually contributes parameter-level metadata.
    let needs_parameter_infos = descriptor
        .parameters
        .iter()
        .any(|param| param.declares(MetadataCapability::ParameterMetadata));
    if needs_parameter_infos {
        statements.push(quote! {
            let __parameter_infos = __method_info.parameters();
        });
    }

    for param in &descriptor.parameters {
        let ty = &param.ty;
        if param.declares(MetadataCapability::EndpointMetadata) {
            statements.push(quote! {
                <#ty as #krate::meta::EndpointMetadataProvider>::populate(
                    &__method_info,
                    __builder,
                );
            });
        }
        if param.declares(MetadataCapability::ParameterMetadata) {
            let name = &param.symbol_name;
            statements.push(quote! {
                <#ty as #krate::meta::ParameterMetadataProvider>::populate(
                    __parameter_infos.by_name(#name),
                    __builder,
                );
            });
        }
    }

    quote! { #(#statements)* }
}
