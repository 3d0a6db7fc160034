//! Axum router wiring.
//!
//! Ops endpoints are mounted outside the guard; every other path goes
//! through `route_guard` before reaching the echo upstream.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, ops, services, transport};

pub fn build_router(state: AppState) -> Router {
    let guarded = protect(Router::new().fallback(services::echo::echo), state.clone());

    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
        .merge(guarded)
}

/// Put an existing router behind the route guard.
pub fn protect<S>(router: Router<S>, state: AppState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(state, transport::guard::route_guard))
}
