//! Authentication routes (login, sign-out).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, error, info, warn};

use crate::access::HOME_PATH;
use crate::account::AccountMenu;
use crate::auth::SignInError;
use crate::csrf::{generate_csrf_token, verify_csrf_token};
use crate::error::AppError;
use crate::layout::safe_return_path;
use crate::menu::DASHBOARD_PATH;
use crate::state::AppState;

use super::helpers::{LOGIN_PATH, current_profile, page_context, render_template};

/// Path of the sign-out action.
pub const LOGOUT_PATH: &str = "/user/logout";

/// Query string of the login form.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub destination: Option<String>,
}

/// Form-based login request.
#[derive(Debug, Deserialize)]
pub struct LoginFormRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(rename = "_token", default)]
    pub csrf_token: String,
}

/// Form carrying only a CSRF token.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    #[serde(rename = "_token", default)]
    pub csrf_token: String,
}

/// Login form handler.
///
/// GET /user/login
/// - Signed-in users go straight to the dashboard
async fn login_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Response {
    if current_profile(&state, &session).await.is_some() {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    render_login(&state, &session, query.destination.as_deref(), "", None, StatusCode::OK).await
}

/// Form-based login handler.
///
/// POST /user/login
async fn login_form_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginFormRequest>,
) -> Response {
    let destination = form.destination.as_deref();

    if !matches!(verify_csrf_token(&session, &form.csrf_token).await, Ok(true)) {
        return render_login(
            &state,
            &session,
            destination,
            &form.username,
            Some("Invalid form token. Please try again."),
            StatusCode::FORBIDDEN,
        )
        .await;
    }

    match state
        .auth()
        .sign_in(&session, &form.username, &form.password)
        .await
    {
        Ok(profile) => {
            state.metrics().record_login(true);
            info!(user = %profile.username, role = %profile.role, "user logged in");
            Redirect::to(safe_return_path(destination, DASHBOARD_PATH)).into_response()
        }
        Err(SignInError::InvalidCredentials) => {
            state.metrics().record_login(false);
            warn!(user = %form.username, "failed login attempt");
            render_login(
                &state,
                &session,
                destination,
                &form.username,
                Some("Invalid username or password"),
                StatusCode::UNAUTHORIZED,
            )
            .await
        }
        Err(e) => {
            error!(error = %e, "failed to establish session");
            AppError::Internal(e.into()).into_response()
        }
    }
}

/// Render the login form, optionally with an error message.
async fn render_login(
    state: &AppState,
    session: &Session,
    destination: Option<&str>,
    username: &str,
    error: Option<&str>,
    status: StatusCode,
) -> Response {
    let mut context = page_context(state, session, None, LOGIN_PATH, "Iniciar sesión").await;

    let csrf_token = generate_csrf_token(session).await.unwrap_or_else(|e| {
        error!(error = %e, "failed to generate CSRF token");
        String::new()
    });
    context.insert("csrf_token", &csrf_token);
    context.insert("destination", &destination.unwrap_or_default());
    context.insert("username", username);
    context.insert("error", &error);

    let mut response = render_template(state, "user/login.html", &context);
    if response.status().is_success() {
        *response.status_mut() = status;
    }
    response
}

/// Sign-out handler.
///
/// POST /user/logout
/// - Ends the session through the auth collaborator, then redirects home
/// - A stale or reused token gets a confirmation form with a fresh one
async fn logout(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<TokenForm>,
) -> Response {
    if !matches!(verify_csrf_token(&session, &form.csrf_token).await, Ok(true)) {
        let Some(profile) = current_profile(&state, &session).await else {
            return Redirect::to(HOME_PATH).into_response();
        };
        debug!(user = %profile.username, "sign-out token not accepted, asking to confirm");
        let context =
            page_context(&state, &session, Some(&profile), LOGOUT_PATH, "Cerrar sesión").await;
        return render_template(&state, "user/logout.html", &context);
    }

    let outcome = AccountMenu::sign_out(state.auth(), &session).await;
    state.metrics().record_sign_out();

    Redirect::to(outcome.redirect_to).into_response()
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_form).post(login_form_submit))
        .route(LOGOUT_PATH, post(logout))
}
