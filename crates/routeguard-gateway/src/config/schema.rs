use std::collections::BTreeMap;

use routeguard_core::error::{Result, RouteGuardError};
use routeguard_core::{AccessRule, Decision, Policy};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteGuardConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    pub policy: PolicySection,

    #[serde(default)]
    pub auth: AuthSection,

    #[serde(default)]
    pub csrf: CsrfSection,
}

impl RouteGuardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RouteGuardError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.policy.validate()?;
        self.auth.validate()?;

        Ok(())
    }

    /// Compile the rule table into an evaluator.
    pub fn compile_policy(&self) -> Result<Policy> {
        self.policy.compile()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<std::net::SocketAddr>().map_err(|_| {
            RouteGuardError::BadConfig(format!(
                "gateway.listen must be a valid socket address: {}",
                self.listen
            ))
        })?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Ordered rule table. `default` has no serde default: the
/// fallback for unmatched routes must always be written down.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    pub default: Decision,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl PolicySection {
    pub fn validate(&self) -> Result<()> {
        for (i, r) in self.rules.iter().enumerate() {
            if r.csrf_exempt && r.decision == Decision::DenyAll {
                return Err(RouteGuardError::BadConfig(format!(
                    "policy.rules[{i}] ({}): csrf_exempt has no effect on deny_all",
                    r.pattern
                )));
            }
        }
        // compiling doubles as pattern validation
        self.compile().map_err(|e| match e {
            RouteGuardError::InvalidPattern(msg) => {
                RouteGuardError::BadConfig(format!("policy.rules: invalid pattern {msg}"))
            }
            other => other,
        })?;
        Ok(())
    }

    pub fn compile(&self) -> Result<Policy> {
        let rules = self
            .rules
            .iter()
            .map(|r| -> Result<AccessRule> {
                Ok(AccessRule::new(&r.pattern, r.decision)?.csrf_exempt(r.csrf_exempt))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Policy::new(rules, self.default))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub pattern: String,
    pub decision: Decision,
    #[serde(default)]
    pub csrf_exempt: bool,
}

/// Static bearer tokens (token -> principal id). Not a credential store.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        for (token, principal) in &self.tokens {
            if token.trim().is_empty() {
                return Err(RouteGuardError::BadConfig("auth.tokens: empty token".into()));
            }
            if principal.trim().is_empty() {
                return Err(RouteGuardError::BadConfig(
                    "auth.tokens: empty principal id".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsrfSection {
    #[serde(default = "default_csrf_enabled")]
    pub enabled: bool,
}

impl Default for CsrfSection {
    fn default() -> Self {
        Self { enabled: default_csrf_enabled() }
    }
}

fn default_csrf_enabled() -> bool {
    true
}
