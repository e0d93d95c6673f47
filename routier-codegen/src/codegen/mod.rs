//! Invocation and metadata synthesis.

pub mod args;
pub mod filtered;
pub mod handler;
pub mod metadata;

pub use filtered::filtered_request_handler_body;
pub use handler::request_handler_body;
pub use metadata::metadata_population_statements;
