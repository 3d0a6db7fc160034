use axum::http::Request;

use routeguard_core::error::{Result, RouteGuardError};
use routeguard_core::{Principal, RequestContext};

/// Build the evaluator input from an HTTP request.
///
/// The path is percent-decoded before normalization so `/%64ecrypt` and
/// `/decrypt` are the same route to the policy.
pub fn from_request<B>(req: &Request<B>, principal: Option<Principal>) -> Result<RequestContext> {
    let raw = req.uri().path();
    let decoded = urlencoding::decode(raw).map_err(|_| {
        RouteGuardError::InvalidRequestContext(format!("path is not valid utf-8: {raw}"))
    })?;
    Ok(RequestContext::new(&decoded, principal)?.with_method(req.method().as_str()))
}
