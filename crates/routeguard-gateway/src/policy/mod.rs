//! Policy layer (route rules, request-forgery verification).
//!
//! Route rules are compiled by `routeguard-core`; this layer adds the
//! integrity check the guard runs when an allowed decision asks for it.

pub mod integrity;

pub use integrity::{IntegrityFailure, IntegrityVerifier, SameOriginVerifier};
