//! Route pattern compilation and matching.
//!
//! Supported forms:
//! - exact: `/encrypt`
//! - prefix: `/api/**` (matches `/api` and everything below it)
//! - glob: `/api/*/keys`, `/files/**/meta` (`*` = one segment, `**` = zero or more)
//! - any: `/**`
//!
//! Wildcards must occupy a whole segment. Patterns are matched against
//! normalized paths (see [`super::context::normalize_path`]).

use std::fmt;

use crate::error::{Result, RouteGuardError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Star,
    DoubleStar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Matcher {
    Exact(String),
    Prefix(String),
    Glob(Vec<Segment>),
    Any,
}

/// Compiled route pattern. Keeps the source text for logs and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    matcher: Matcher,
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Result<Self> {
        if !raw.starts_with('/') {
            return Err(RouteGuardError::InvalidPattern(format!(
                "{raw} (must start with '/')"
            )));
        }

        let mut segments = Vec::new();
        for s in raw.split('/').filter(|s| !s.is_empty()) {
            let seg = match s {
                "*" => Segment::Star,
                "**" => Segment::DoubleStar,
                s if s.contains('*') => {
                    return Err(RouteGuardError::InvalidPattern(format!(
                        "{raw} (wildcards must be a whole segment)"
                    )));
                }
                "." | ".." => {
                    return Err(RouteGuardError::InvalidPattern(format!(
                        "{raw} (relative segments are not allowed)"
                    )));
                }
                s => Segment::Literal(s.to_string()),
            };
            segments.push(seg);
        }

        let matcher = classify(segments);
        Ok(Self { raw: raw.to_string(), matcher })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `path` must already be normalized.
    pub fn matches(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Exact(p) => p == path,
            Matcher::Prefix(p) => {
                path == p
                    || (path.starts_with(p.as_str()) && path.as_bytes().get(p.len()) == Some(&b'/'))
            }
            Matcher::Glob(pat) => {
                let segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
                match_segments(pat, &segs)
            }
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn classify(segments: Vec<Segment>) -> Matcher {
    let wildcards = segments.iter().filter(|s| !matches!(s, Segment::Literal(_))).count();

    if wildcards == 0 {
        return Matcher::Exact(join(&segments));
    }

    if wildcards == 1 && segments.last() == Some(&Segment::DoubleStar) {
        let base = &segments[..segments.len() - 1];
        if base.is_empty() {
            return Matcher::Any;
        }
        return Matcher::Prefix(join(base));
    }

    Matcher::Glob(segments)
}

fn join(segments: &[Segment]) -> String {
    let mut out = String::new();
    for s in segments {
        if let Segment::Literal(l) = s {
            out.push('/');
            out.push_str(l);
        }
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Wildcard match over segments, remembering only the last `**` seen.
/// Runs in O(pattern * path) regardless of how many `**` the pattern holds.
fn match_segments(pat: &[Segment], path: &[&str]) -> bool {
    let (mut p, mut s) = (0, 0);
    // (pattern index after the last `**`, path index it currently absorbs up to)
    let mut resume: Option<(usize, usize)> = None;

    while s < path.len() {
        match pat.get(p) {
            Some(Segment::DoubleStar) => {
                resume = Some((p + 1, s));
                p += 1;
            }
            Some(seg) if seg.matches_one(path[s]) => {
                p += 1;
                s += 1;
            }
            _ => match resume {
                Some((rp, rs)) => {
                    resume = Some((rp, rs + 1));
                    p = rp;
                    s = rs + 1;
                }
                None => return false,
            },
        }
    }

    pat[p..].iter().all(|seg| *seg == Segment::DoubleStar)
}

impl Segment {
    fn matches_one(&self, segment: &str) -> bool {
        match self {
            Segment::Literal(l) => l == segment,
            Segment::Star => true,
            Segment::DoubleStar => false,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn p(s: &str) -> RoutePattern {
        RoutePattern::parse(s).unwrap()
    }

    #[test]
    fn exact_matches_only_itself() {
        let pat = p("/encrypt");
        assert!(pat.matches("/encrypt"));
        assert!(!pat.matches("/encrypt/x"));
        assert!(!pat.matches("/encrypted"));
        assert!(!pat.matches("/"));
    }

    #[test]
    fn trailing_slash_in_pattern_is_ignored() {
        assert!(p("/encrypt/").matches("/encrypt"));
    }

    #[test]
    fn prefix_respects_segment_boundary() {
        let pat = p("/api/**");
        assert!(pat.matches("/api"));
        assert!(pat.matches("/api/v1/keys"));
        assert!(!pat.matches("/apikeys"));
    }

    #[test]
    fn any_matches_root() {
        let pat = p("/**");
        assert!(pat.matches("/"));
        assert!(pat.matches("/a/b/c"));
    }

    #[test]
    fn star_is_single_segment() {
        let pat = p("/api/*/keys");
        assert!(pat.matches("/api/v1/keys"));
        assert!(!pat.matches("/api/keys"));
        assert!(!pat.matches("/api/v1/v2/keys"));
    }

    #[test]
    fn double_star_in_middle() {
        let pat = p("/files/**/meta");
        assert!(pat.matches("/files/meta"));
        assert!(pat.matches("/files/a/b/meta"));
        assert!(!pat.matches("/files/a/b"));
    }

    #[test]
    fn repeated_double_star_stays_linear() {
        let pat = p("/**/a/**/a/**/a/**/b");
        let path = "/a".repeat(4000);
        let started = std::time::Instant::now();
        assert!(!pat.matches(&path));
        assert!(pat.matches(&format!("{path}/b")));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        let pat = p("/**/admin/**/purge/**/now");
        assert!(pat.matches("/x/admin/y/z/purge/now"));
        assert!(!pat.matches("/x/purge/admin/now"));
    }

    #[test]
    fn rejects_partial_wildcards_and_relative_paths() {
        assert!(RoutePattern::parse("/api/v*").is_err());
        assert!(RoutePattern::parse("api").is_err());
        assert!(RoutePattern::parse("/a/../b").is_err());
        let err = RoutePattern::parse("").unwrap_err();
        assert_eq!(err.client_code().as_str(), "INVALID_PATTERN");
    }
}
