//! Parameter Resolver
//!
//! Computes outgoing request parameters from assistant settings, model
//! metadata and the provider capability descriptor, and applies the
//! model-family message rules (developer prompt, leading user message).

pub mod context;
pub mod models;
pub mod resolver;

pub use context::{CONTEXT_MARGIN, filter_context};
pub use resolver::{ParameterResolver, RequestParameters};
