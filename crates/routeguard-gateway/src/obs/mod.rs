//! Lightweight in-process metrics.
//!
//! Decision counters stored as atomics and rendered by the `/metrics`
//! handler in Prometheus text format.

pub mod metrics;
