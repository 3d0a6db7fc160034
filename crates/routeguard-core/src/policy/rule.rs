//! Access rules: a compiled route pattern plus the decision it carries.

use serde::Deserialize;

use super::pattern::RoutePattern;
use crate::error::Result;

/// What a matching rule decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    DenyAll,
    RequireAuthenticated,
    Permit,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::DenyAll => "deny_all",
            Decision::RequireAuthenticated => "require_authenticated",
            Decision::Permit => "permit",
        }
    }
}

/// One entry of the ordered rule table.
#[derive(Debug, Clone)]
pub struct AccessRule {
    pub pattern: RoutePattern,
    pub decision: Decision,
    /// Skip request-forgery verification for requests this rule allows.
    pub csrf_exempt: bool,
}

impl AccessRule {
    pub fn new(pattern: &str, decision: Decision) -> Result<Self> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            decision,
            csrf_exempt: false,
        })
    }

    pub fn deny_all(pattern: &str) -> Result<Self> {
        Self::new(pattern, Decision::DenyAll)
    }

    pub fn authenticated(pattern: &str) -> Result<Self> {
        Self::new(pattern, Decision::RequireAuthenticated)
    }

    pub fn permit(pattern: &str) -> Result<Self> {
        Self::new(pattern, Decision::Permit)
    }

    pub fn csrf_exempt(mut self, exempt: bool) -> Self {
        self.csrf_exempt = exempt;
        self
    }
}
