//! Top-level facade crate for routeguard.
//!
//! Re-exports the policy core and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use routeguard_core::*;
}

pub mod gateway {
    pub use routeguard_gateway::*;
}
