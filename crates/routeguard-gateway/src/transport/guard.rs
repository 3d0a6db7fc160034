//! Route guard middleware.
//!
//! Per request:
//! - resolve the principal (bearer token)
//! - build a `RequestContext` (400 when malformed)
//! - evaluate the route policy
//! - `Rejected` -> 403, `Unauthorized` -> 401, `Allowed` -> integrity check
//!   (state-mutating methods only, when the decision asks for it) -> handler

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use routeguard_core::{ClientCode, Matched, Outcome};

use crate::app_state::AppState;
use crate::context;

pub async fn route_guard(State(app): State<AppState>, mut req: Request, next: Next) -> Response {
    let principal = app.resolver().resolve(req.headers()).await;

    let ctx = match context::from_request(&req, principal) {
        Ok(ctx) => ctx,
        Err(e) => {
            app.metrics().invalid_requests.inc(&[]);
            tracing::debug!(error = %e, uri = %req.uri(), "malformed request context");
            return error_response(StatusCode::BAD_REQUEST, e.client_code(), &e.to_string());
        }
    };

    let ev = app.policy().evaluate_detailed(&ctx);
    let rule = match ev.matched {
        Matched::Rule { pattern, .. } => pattern,
        Matched::Default => "default",
    };
    app.metrics()
        .decisions
        .inc(&[("outcome", ev.outcome.as_str()), ("rule", rule)]);
    tracing::debug!(
        path = ctx.path(),
        method = ctx.method(),
        authenticated = ctx.is_authenticated(),
        outcome = ev.outcome.as_str(),
        rule,
        "route policy evaluated"
    );

    let requires_integrity_check = match ev.outcome {
        Outcome::Allowed { requires_integrity_check } => requires_integrity_check,
        refused => return refusal_response(refused),
    };

    if requires_integrity_check && !ctx.is_safe_method() {
        if let Some(verifier) = app.verifier() {
            if let Err(e) = verifier.verify(req.headers()) {
                app.metrics()
                    .integrity_failures
                    .inc(&[("reason", integrity_reason(&e))]);
                tracing::info!(path = ctx.path(), error = %e, "integrity check failed");
                return error_response(
                    StatusCode::FORBIDDEN,
                    ClientCode::IntegrityCheckFailed,
                    &e.to_string(),
                );
            }
        }
    }

    if let Some(p) = ctx.principal() {
        req.extensions_mut().insert(p.clone());
    }
    next.run(req).await
}

/// 401 with a Bearer challenge for `Unauthorized`, 403 for anything else.
/// The body code comes from [`Outcome::client_code`].
fn refusal_response(outcome: Outcome) -> Response {
    let code = outcome.client_code().unwrap_or(ClientCode::AccessDenied);
    match outcome {
        Outcome::Unauthorized => {
            let mut resp =
                error_response(StatusCode::UNAUTHORIZED, code, "authentication required");
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            resp
        }
        _ => error_response(StatusCode::FORBIDDEN, code, "access denied"),
    }
}

fn integrity_reason(e: &crate::policy::IntegrityFailure) -> &'static str {
    use crate::policy::IntegrityFailure::*;
    match e {
        MissingHost => "missing_host",
        MissingOrigin => "missing_origin",
        MalformedOrigin(_) => "malformed_origin",
        CrossOrigin { .. } => "cross_origin",
    }
}

fn error_response(status: StatusCode, code: ClientCode, msg: &str) -> Response {
    (status, Json(json!({ "code": code.as_str(), "msg": msg }))).into_response()
}
