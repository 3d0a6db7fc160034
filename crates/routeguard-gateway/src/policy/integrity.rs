//! Request-forgery verification.
//!
//! Only the per-route decision is configurable; no tokens are issued or
//! stored here. The built-in verifier accepts a state-mutating request when
//! its `Origin` (or, lacking that, `Referer`) names the same authority as
//! the `Host` header.

use axum::http::{header, HeaderMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityFailure {
    #[error("missing Host header")]
    MissingHost,
    #[error("missing Origin and Referer headers")]
    MissingOrigin,
    #[error("malformed origin: {0}")]
    MalformedOrigin(String),
    #[error("cross-origin request from {origin} to {host}")]
    CrossOrigin { origin: String, host: String },
}

pub trait IntegrityVerifier: Send + Sync {
    fn verify(&self, headers: &HeaderMap) -> Result<(), IntegrityFailure>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SameOriginVerifier;

impl IntegrityVerifier for SameOriginVerifier {
    fn verify(&self, headers: &HeaderMap) -> Result<(), IntegrityFailure> {
        let host = header_str(headers, header::HOST).ok_or(IntegrityFailure::MissingHost)?;

        let source = header_str(headers, header::ORIGIN)
            .or_else(|| header_str(headers, header::REFERER))
            .ok_or(IntegrityFailure::MissingOrigin)?;

        let origin = origin_of(source)
            .ok_or_else(|| IntegrityFailure::MalformedOrigin(source.to_string()))?;

        if same_authority(&origin, host.trim()) {
            Ok(())
        } else {
            Err(IntegrityFailure::CrossOrigin {
                origin: source.to_string(),
                host: host.to_string(),
            })
        }
    }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Scheme-qualified authority with the scheme's default port filled in.
#[derive(Debug, PartialEq, Eq)]
struct Origin<'a> {
    host: &'a str,
    port: u16,
    scheme_default: Option<u16>,
}

/// `https://a.example/path` -> `a.example:443`. `null` origins and unknown
/// schemes without an explicit port have none.
fn origin_of(url: &str) -> Option<Origin<'_>> {
    let (scheme, rest) = url.split_once("://")?;
    let end = rest.find(|c| matches!(c, '/' | '?' | '#')).unwrap_or(rest.len());
    let auth = &rest[..end];
    // drop userinfo
    let auth = auth.rsplit_once('@').map_or(auth, |(_, h)| h);

    let default_port = match scheme.to_ascii_lowercase().as_str() {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    };
    let (host, port) = split_host_port(auth)?;
    let port = match port {
        Some(p) => p,
        None => default_port?,
    };
    Some(Origin { host, port, scheme_default: default_port })
}

/// A `Host` without a port names the origin scheme's default port.
fn same_authority(origin: &Origin<'_>, host: &str) -> bool {
    let Some((host, port)) = split_host_port(host) else {
        return false;
    };
    if !origin.host.eq_ignore_ascii_case(host) {
        return false;
    }
    match port {
        Some(p) => p == origin.port,
        None => origin.scheme_default == Some(origin.port),
    }
}

/// `a.example:8080` -> (`a.example`, Some(8080)); `[::1]:80` -> (`[::1]`, Some(80)).
fn split_host_port(auth: &str) -> Option<(&str, Option<u16>)> {
    let (host, port) = if auth.starts_with('[') {
        let close = auth.find(']')?;
        let (host, tail) = auth.split_at(close + 1);
        match tail {
            "" => (host, None),
            t => (host, Some(t.strip_prefix(':')?)),
        }
    } else {
        match auth.rsplit_once(':') {
            Some((h, p)) => (h, Some(p)),
            None => (auth, None),
        }
    };
    if host.is_empty() {
        return None;
    }
    let port = match port {
        Some(p) => Some(p.parse::<u16>().ok()?),
        None => None,
    };
    Some((host, port))
}
