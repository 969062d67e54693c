//! Sidebar open/collapsed toggle.

use axum::response::Redirect;
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::debug;

use crate::csrf::verify_csrf_token;
use crate::error::{AppError, AppResult};
use crate::layout::{safe_return_path, toggle_sidebar};
use crate::menu::DASHBOARD_PATH;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ToggleForm {
    #[serde(rename = "_token", default)]
    csrf_token: String,
    #[serde(default)]
    return_to: Option<String>,
}

/// POST /layout/sidebar
async fn toggle(session: Session, Form(form): Form<ToggleForm>) -> AppResult<Redirect> {
    if !matches!(verify_csrf_token(&session, &form.csrf_token).await, Ok(true)) {
        return Err(AppError::InvalidToken);
    }

    let collapsed = toggle_sidebar(&session).await?;
    debug!(collapsed, "sidebar toggled");

    Ok(Redirect::to(safe_return_path(
        form.return_to.as_deref(),
        DASHBOARD_PATH,
    )))
}

/// Create the layout router.
pub fn router() -> Router<AppState> {
    Router::new().route("/layout/sidebar", post(toggle))
}
