//! Endpoint descriptor model.
//!
//! One [`EndpointDescriptor`] is built per discovered route registration by
//! the analysis front end, consumed exactly once by the synthesis functions
//! in this crate, then discarded. Descriptors are never mutated here.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};

/// A capability declared by a parameter or response type, opting it into
/// registration-time metadata contribution.
///
/// Modeled as a sum type rather than loose booleans so that a new capability
/// is added here, not threaded through every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataCapability {
    /// The type contributes endpoint-level metadata.
    EndpointMetadata,
    /// The type contributes metadata for the parameter it binds.
    ParameterMetadata,
}

/// Source file + line of the route registration call site.
///
/// Opaque to synthesis logic; only used to build a stable identity key.
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

/// One bound handler parameter, in declaration order.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Semantic type of the bound value (without any `Option` wrapper).
    pub ty: syn::Type,
    /// Whether binding failure is tolerated (nullable binding).
    pub is_optional: bool,
    /// Stable identifier used in generated variable names.
    pub symbol_name: String,
    pub capabilities: Vec<MetadataCapability>,
}

impl ParameterDescriptor {
    pub fn declares(&self, capability: MetadataCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Local variable holding the bound value in generated routines.
    pub(crate) fn arg_ident(&self) -> syn::Ident {
        format_ident!("__arg_{}", self.symbol_name)
    }

    /// The parameter type as rendered in type position: wrapped in `Option`
    /// when optionality-aware rendering is requested and the binding is
    /// optional. Affects only the textual rendering, never behavior.
    pub(crate) fn rendered_ty(&self, consider_optionality: bool) -> TokenStream {
        let ty = &self.ty;
        if consider_optionality && self.is_optional {
            quote! { ::core::option::Option<#ty> }
        } else {
            quote! { #ty }
        }
    }
}

/// The handler's declared response shape.
#[derive(Debug, Clone)]
pub struct ResponseDescriptor {
    /// Return type after unwrapping any future/task wrapper, or `None` for
    /// void-shaped returns.
    pub response_type: Option<syn::Type>,
    /// The as-declared return type (before unwrapping); used for the
    /// delegate type.
    pub wrapped_response_type: syn::Type,
    /// Producing the response requires awaiting.
    pub is_awaitable: bool,
    /// True for void-shaped returns. Mutually exclusive with
    /// `is_self_executing`.
    pub has_no_response: bool,
    /// The response value knows how to write itself to the exchange.
    pub is_self_executing: bool,
    /// Declared content-type override, applied as a default only.
    pub content_type: Option<String>,
    pub capabilities: Vec<MetadataCapability>,
}

impl ResponseDescriptor {
    pub fn declares(&self, capability: MetadataCapability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Normalized, immutable facts about one route registration.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// Raw verb from the registration call site (`"GET"`, `"POST"`, ...).
    pub http_method: String,
    /// Ordered; order is preserved in every emitted argument list.
    pub parameters: Vec<ParameterDescriptor>,
    /// Absent means the handler produces no observable output contract.
    pub response: Option<ResponseDescriptor>,
    /// The handler itself must be awaited.
    pub is_awaitable: bool,
    pub location: SourceLocation,
}

impl EndpointDescriptor {
    /// Parsed verb, failing on anything outside the five recognized values.
    pub fn verb(&self) -> syn::Result<HttpVerb> {
        HttpVerb::parse(&self.http_method)
    }

    /// The routing-constructor identifier for this endpoint's verb
    /// (`get`, `put`, `post`, `delete`, `patch`).
    ///
    /// An unrecognized verb is a fatal configuration error; it is never
    /// defaulted.
    pub fn verb_token(&self) -> syn::Result<syn::Ident> {
        let verb = self.verb()?;
        Ok(syn::Ident::new(verb.as_routing_fn(), Span::call_site()))
    }

    /// Stable `(file, line)` identity expression for this registration.
    pub fn source_key(&self) -> TokenStream {
        let file = &self.location.file;
        let line = self.location.line;
        quote! { (#file, #line) }
    }

    /// A response the delegate type must surface: present and not
    /// void-shaped.
    pub(crate) fn meaningful_response(&self) -> Option<&ResponseDescriptor> {
        self.response.as_ref().filter(|r| !r.has_no_response)
    }
}

/// The five verbs a route registration may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

impl HttpVerb {
    pub fn parse(raw: &str) -> syn::Result<Self> {
        match raw {
            "GET" => Ok(HttpVerb::Get),
            "PUT" => Ok(HttpVerb::Put),
            "POST" => Ok(HttpVerb::Post),
            "DELETE" => Ok(HttpVerb::Delete),
            "PATCH" => Ok(HttpVerb::Patch),
            other => Err(syn::Error::new(
                Span::call_site(),
                format!("unsupported HTTP method `{other}` on route registration"),
            )),
        }
    }

    /// Name of the routing constructor in the runtime router.
    pub fn as_routing_fn(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Put => "put",
            HttpVerb::Post => "post",
            HttpVerb::Delete => "delete",
            HttpVerb::Patch => "patch",
        }
    }

    /// Default success status for the verb, used by the registration front
    /// end when no override is present.
    pub fn default_status(&self) -> u16 {
        match self {
            HttpVerb::Get => 200,
            HttpVerb::Post => 201,
            HttpVerb::Put => 200,
            HttpVerb::Delete => 204,
            HttpVerb::Patch => 200,
        }
    }
}
