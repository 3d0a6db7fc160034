//! Echo upstream: reports what reached it.
//!
//! Stands in for real application handlers (the guarded service owns its own
//! `/encrypt` logic). Useful for checking a policy file end to end.

use axum::{extract::Extension, http::Method, http::Uri, Json};
use serde_json::{json, Value};

use routeguard_core::Principal;

pub async fn echo(method: Method, uri: Uri, principal: Option<Extension<Principal>>) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "principal": principal.map(|Extension(p)| p.id),
    }))
}
