//! routeguard gateway library entry.
//!
//! Wires config, principal resolution, the route guard middleware, and the
//! ops endpoints into an axum stack. Consumed by the binary (`main.rs`) and
//! by integration tests; `router::protect` lets other services reuse the
//! guard in front of their own routes.

pub mod app_state;
pub mod config;
pub mod context;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod services;
pub mod transport;
