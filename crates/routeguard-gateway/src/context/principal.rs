use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};

use routeguard_core::Principal;

use crate::config::AuthSection;

/// Resolves the authenticated principal of a request, if any.
///
/// Returning `None` is not an error: whether a principal is required is the
/// policy's call, not the resolver's.
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Principal>;
}

/// Fixed bearer-token table loaded from `auth.tokens`.
#[derive(Debug, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenResolver {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tokens: entries
                .into_iter()
                .map(|(k, v)| (k.into(), Principal::new(v)))
                .collect(),
        }
    }

    pub fn from_config(auth: &AuthSection) -> Self {
        Self::new(auth.tokens.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl PrincipalResolver for StaticTokenResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Principal> {
        let token = bearer_token(headers)?;
        let principal = self.tokens.get(token).cloned();
        if principal.is_none() {
            tracing::debug!("bearer token not recognized");
        }
        principal
    }
}

/// Extract the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(auth: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        h
    }

    #[test]
    fn parses_bearer_scheme_case_insensitively() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer  abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn resolves_known_tokens_only() {
        let r = StaticTokenResolver::new([("dev-token", "user:dev")]);
        assert_eq!(
            r.resolve(&headers("Bearer dev-token")).await,
            Some(Principal::new("user:dev"))
        );
        assert_eq!(r.resolve(&headers("Bearer nope")).await, None);
        assert_eq!(r.resolve(&HeaderMap::new()).await, None);
    }
}
