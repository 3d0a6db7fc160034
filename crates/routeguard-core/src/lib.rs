//! routeguard core: route access policy, request context, and error types.
//!
//! Evaluation is a pure function of an ordered rule table and a request
//! context. The crate carries no transport or runtime dependencies so the
//! same policy can sit behind any HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `RouteGuardError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod policy;

/// Shared result type.
pub use error::{ClientCode, Result, RouteGuardError};
pub use policy::{
    evaluate, AccessRule, Decision, Evaluation, Matched, Outcome, Policy, Principal,
    RequestContext, RoutePattern,
};
