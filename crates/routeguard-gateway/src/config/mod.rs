//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use routeguard_core::error::{Result, RouteGuardError};

pub use schema::{
    AuthSection, CsrfSection, GatewaySection, PolicySection, RouteGuardConfig, RuleConfig,
};

/// Default config location when neither CLI nor env provide one.
pub const DEFAULT_PATH: &str = "routeguard.yaml";

/// Env var consulted when no CLI argument is given.
pub const PATH_ENV: &str = "ROUTEGUARD_CONFIG";

pub fn load_from_file(path: &str) -> Result<RouteGuardConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RouteGuardError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RouteGuardConfig> {
    let cfg: RouteGuardConfig = serde_yaml::from_str(s)
        .map_err(|e| RouteGuardError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// First CLI argument, then `ROUTEGUARD_CONFIG`, then [`DEFAULT_PATH`].
pub fn resolve_path(cli_arg: Option<String>, env_value: Option<String>) -> String {
    let given = |p: &String| !p.trim().is_empty();
    cli_arg
        .filter(given)
        .or(env_value.filter(given))
        .unwrap_or_else(|| DEFAULT_PATH.to_string())
}
