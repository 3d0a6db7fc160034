//! Transport layer (HTTP).
//!
//! Exposes the route guard middleware that sits between the HTTP server and
//! the guarded handlers.

pub mod guard;
