//! Request context handed to the evaluator.

use crate::error::{Result, RouteGuardError};

/// Identity associated with an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Path + optional principal (+ method) of one inbound request.
///
/// Construction validates and normalizes the path, so every context that
/// reaches the evaluator is well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    path: String,
    method: String,
    principal: Option<Principal>,
}

impl RequestContext {
    pub fn new(path: &str, principal: Option<Principal>) -> Result<Self> {
        Ok(Self {
            path: normalize_path(path)?,
            method: "GET".to_string(),
            principal,
        })
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_ascii_uppercase();
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Safe methods never mutate state, so forgery checks do not apply to them.
    pub fn is_safe_method(&self) -> bool {
        matches!(self.method.as_str(), "GET" | "HEAD" | "OPTIONS" | "TRACE")
    }
}

/// Normalize a request path for matching.
///
/// Collapses repeated slashes and drops a trailing slash. Rejects empty paths,
/// paths not starting with `/`, NUL bytes, and `.`/`..` segments.
pub fn normalize_path(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(RouteGuardError::InvalidRequestContext("missing path".into()));
    }
    if !raw.starts_with('/') {
        return Err(RouteGuardError::InvalidRequestContext(format!(
            "path must start with '/': {raw}"
        )));
    }
    if raw.contains('\0') {
        return Err(RouteGuardError::InvalidRequestContext("path contains NUL".into()));
    }

    let mut out = String::with_capacity(raw.len());
    for seg in raw.split('/').filter(|s| !s.is_empty()) {
        if seg == "." || seg == ".." {
            return Err(RouteGuardError::InvalidRequestContext(format!(
                "relative segment in path: {raw}"
            )));
        }
        out.push('/');
        out.push_str(seg);
    }
    if out.is_empty() {
        out.push('/');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn normalizes_slashes() {
        assert_eq!(normalize_path("/encrypt/").unwrap(), "/encrypt");
        assert_eq!(normalize_path("//a///b").unwrap(), "/a/b");
        assert_eq!(normalize_path("/").unwrap(), "/");
    }

    #[test]
    fn missing_or_relative_path_is_invalid() {
        for bad in ["", "decrypt", "*", "/a/../decrypt", "/./decrypt"] {
            let err = RequestContext::new(bad, None).unwrap_err();
            assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "path={bad:?}");
        }
    }

    #[test]
    fn safe_methods() {
        let ctx = RequestContext::new("/x", None).unwrap();
        assert!(ctx.is_safe_method());
        assert!(!ctx.clone().with_method("post").is_safe_method());
        assert_eq!(ctx.with_method("delete").method(), "DELETE");
    }
}
