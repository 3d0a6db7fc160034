//! Shared application state for the routeguard gateway.
//!
//! Everything here is built once at startup and read-only afterwards, so
//! request workers share it through a single `Arc` without locking.

use std::sync::Arc;

use routeguard_core::error::Result;
use routeguard_core::Policy;

use crate::config::RouteGuardConfig;
use crate::context::{PrincipalResolver, StaticTokenResolver};
use crate::obs::metrics::GuardMetrics;
use crate::policy::{IntegrityVerifier, SameOriginVerifier};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    policy: Policy,
    resolver: Arc<dyn PrincipalResolver>,
    verifier: Option<Arc<dyn IntegrityVerifier>>,
    metrics: GuardMetrics,
}

impl AppState {
    /// Build state with the static token resolver from `auth.tokens`.
    pub fn new(cfg: RouteGuardConfig) -> Result<Self> {
        let resolver = StaticTokenResolver::from_config(&cfg.auth);
        if resolver.is_empty() {
            tracing::warn!("auth.tokens is empty; authenticated routes will always answer 401");
        }
        Self::with_resolver(cfg, Arc::new(resolver))
    }

    /// Build state with a caller-provided principal resolver.
    pub fn with_resolver(cfg: RouteGuardConfig, resolver: Arc<dyn PrincipalResolver>) -> Result<Self> {
        let policy = cfg.compile_policy()?;

        let verifier: Option<Arc<dyn IntegrityVerifier>> = if cfg.csrf.enabled {
            Some(Arc::new(SameOriginVerifier))
        } else {
            tracing::warn!("csrf.enabled=false; integrity checks are skipped for every route");
            None
        };

        for (i, r) in policy.rules().iter().enumerate() {
            tracing::info!(
                index = i,
                pattern = %r.pattern,
                decision = r.decision.as_str(),
                csrf_exempt = r.csrf_exempt,
                "route rule"
            );
        }
        tracing::info!(default = policy.default_decision().as_str(), "route default");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                policy,
                resolver,
                verifier,
                metrics: GuardMetrics::default(),
            }),
        })
    }

    pub fn policy(&self) -> &Policy {
        &self.inner.policy
    }

    pub fn resolver(&self) -> &dyn PrincipalResolver {
        self.inner.resolver.as_ref()
    }

    pub fn verifier(&self) -> Option<&dyn IntegrityVerifier> {
        self.inner.verifier.as_deref()
    }

    pub fn metrics(&self) -> &GuardMetrics {
        &self.inner.metrics
    }

    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![("routeguard_policy_rules", self.inner.policy.rules().len() as u64)]
    }
}
