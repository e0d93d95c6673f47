//! Request-handler synthesis for Routier route registrations.
//!
//! Given the normalized description of one route registration — its ordered
//! parameter list, response shape, verb, and awaitability — this crate emits
//! the code that executes the route at request time, with no runtime type
//! inspection: which strategy writes the response, whether the routine is
//! `async`, and how arguments flow are all decided here, once, at build
//! time.
//!
//! Four independent artifacts are produced per [`EndpointDescriptor`], all
//! pure functions of their input:
//!
//! - [`delegate_type`] — the handler's nominal callable type, for
//!   binding-site type checks;
//! - [`request_handler_body`] — the plain request-handling routine;
//! - [`filtered_request_handler_body`] — the variant routing the call
//!   through a filter pipeline;
//! - [`metadata_population_statements`] — registration-time metadata.
//!
//! The route-registration front end (which builds descriptors and the
//! per-source parameter-binding statements) and the runtime crate the
//! emitted code references are external; emitted paths resolve through
//! [`crate_path::routier_core_path`].

pub mod codegen;
pub mod crate_path;
pub mod descriptor;
pub mod response;
pub mod signature;

pub use codegen::{
    filtered_request_handler_body, metadata_population_statements, request_handler_body,
};
pub use descriptor::{
    EndpointDescriptor, HttpVerb, MetadataCapability, ParameterDescriptor, ResponseDescriptor,
    SourceLocation,
};
pub use response::ResponseStrategy;
pub use signature::delegate_type;
