//! Policy evaluation: ordered first-match over the rule table, with an
//! explicit default for unmatched routes.

use crate::error::{ClientCode, Result, RouteGuardError};

use super::context::RequestContext;
use super::rule::{AccessRule, Decision};

/// Result of evaluating one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Terminal: denied regardless of identity.
    Rejected,
    /// Route needs a principal and none was present.
    Unauthorized,
    /// Proceed. When `requires_integrity_check` is set, request-forgery
    /// verification must pass before a state-mutating request is handled.
    Allowed { requires_integrity_check: bool },
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Rejected => "rejected",
            Outcome::Unauthorized => "unauthorized",
            Outcome::Allowed { .. } => "allowed",
        }
    }

    pub fn is_allowed(self) -> bool {
        matches!(self, Outcome::Allowed { .. })
    }

    /// Client-facing code for refusals; `None` when allowed.
    pub fn client_code(self) -> Option<ClientCode> {
        match self {
            Outcome::Rejected => Some(ClientCode::AccessDenied),
            Outcome::Unauthorized => Some(ClientCode::Unauthorized),
            Outcome::Allowed { .. } => None,
        }
    }
}

/// Which entry of the table produced the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matched<'a> {
    Rule { index: usize, pattern: &'a str },
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation<'a> {
    pub outcome: Outcome,
    pub matched: Matched<'a>,
}

/// Ordered rule table plus the explicit fallback decision.
/// Construct once at startup, then share via Arc.
#[derive(Debug, Clone)]
pub struct Policy {
    rules: Vec<AccessRule>,
    default: Decision,
}

impl Policy {
    pub fn new(rules: Vec<AccessRule>, default: Decision) -> Self {
        tracing::debug!(rules = rules.len(), default = default.as_str(), "route policy compiled");
        Self { rules, default }
    }

    /// The two-rule table: `/decrypt` denied, `/encrypt` authenticated and
    /// exempt from forgery checks.
    pub fn observed(default: Decision) -> Result<Self> {
        Ok(Self::new(
            vec![
                AccessRule::deny_all("/decrypt")?,
                AccessRule::authenticated("/encrypt")?.csrf_exempt(true),
            ],
            default,
        ))
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    pub fn default_decision(&self) -> Decision {
        self.default
    }

    /// First matching rule wins; otherwise the configured default applies.
    pub fn evaluate(&self, ctx: &RequestContext) -> Outcome {
        self.evaluate_detailed(ctx).outcome
    }

    pub fn evaluate_detailed(&self, ctx: &RequestContext) -> Evaluation<'_> {
        match self.first_match(ctx) {
            Some((index, rule)) => Evaluation {
                outcome: decide(rule.decision, rule.csrf_exempt, ctx),
                matched: Matched::Rule { index, pattern: rule.pattern.as_str() },
            },
            None => Evaluation {
                outcome: decide(self.default, false, ctx),
                matched: Matched::Default,
            },
        }
    }

    /// Like [`Policy::evaluate`] but refuses to fall back on the default.
    pub fn evaluate_strict(&self, ctx: &RequestContext) -> Result<Outcome> {
        self.first_match(ctx)
            .map(|(_, rule)| decide(rule.decision, rule.csrf_exempt, ctx))
            .ok_or_else(|| RouteGuardError::NoMatchingRule(ctx.path().to_string()))
    }

    fn first_match(&self, ctx: &RequestContext) -> Option<(usize, &AccessRule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, r)| r.pattern.matches(ctx.path()))
    }
}

fn decide(decision: Decision, csrf_exempt: bool, ctx: &RequestContext) -> Outcome {
    match decision {
        Decision::DenyAll => Outcome::Rejected,
        Decision::RequireAuthenticated if !ctx.is_authenticated() => Outcome::Unauthorized,
        Decision::RequireAuthenticated | Decision::Permit => Outcome::Allowed {
            requires_integrity_check: !csrf_exempt,
        },
    }
}

/// Free-function form of [`Policy::evaluate`].
pub fn evaluate(policy: &Policy, ctx: &RequestContext) -> Outcome {
    policy.evaluate(ctx)
}
