//! Route access policy (patterns, rules, evaluation).
//!
//! Rules are compiled once and evaluated in declared order; the first
//! matching pattern decides. Evaluation is pure and lock-free, so a single
//! `Policy` can be shared across request workers.

pub mod context;
pub mod engine;
pub mod pattern;
pub mod rule;

pub use context::{normalize_path, Principal, RequestContext};
pub use engine::{evaluate, Evaluation, Matched, Outcome, Policy};
pub use pattern::RoutePattern;
pub use rule::{AccessRule, Decision};
