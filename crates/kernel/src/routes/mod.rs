//! HTTP route handlers.

pub mod auth;
pub mod health;
pub mod helpers;
pub mod layout;
pub mod metrics;
pub mod pages;

use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::error::AppError;
use crate::state::AppState;

/// Every kernel route.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(auth::router())
        .merge(layout::router())
        .merge(health::router())
        .merge(metrics::router())
        .fallback(not_found)
}

/// The complete application: routes, session layer and request tracing.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    // Last added = first executed: TraceLayer → session → routes
    router()
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
