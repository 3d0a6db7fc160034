//! Request-side context types shared across layers.
//!
//! Turns an inbound HTTP request into the transport-agnostic
//! `RequestContext` the policy evaluator consumes, and resolves the
//! caller's principal without coupling the guard to a credential source.

pub mod principal;
pub mod request;

pub use principal::{bearer_token, PrincipalResolver, StaticTokenResolver};
pub use request::from_request;
