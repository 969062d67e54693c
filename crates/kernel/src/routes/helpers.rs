//! Shared route helpers for page rendering and access checks.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::{error, info};

use crate::access::{AccessDecision, AccessGate, Denial, RoleRequirement};
use crate::account::AccountMenu;
use crate::csrf::generate_csrf_token;
use crate::layout::sidebar_collapsed;
use crate::menu::NavigationShell;
use crate::models::UserProfile;
use crate::state::AppState;

/// Path of the login form.
pub const LOGIN_PATH: &str = "/user/login";

/// Signed-in profile, or `None`. Session read failures count as signed out.
pub async fn current_profile(state: &AppState, session: &Session) -> Option<UserProfile> {
    match state.auth().current_profile(session).await {
        Ok(profile) => profile,
        Err(e) => {
            error!(error = %e, "failed to load current profile");
            None
        }
    }
}

/// Login URL that returns to `path` afterwards.
pub fn login_redirect(path: &str) -> Response {
    Redirect::to(&format!(
        "{LOGIN_PATH}?destination={}",
        urlencoding::encode(path)
    ))
    .into_response()
}

/// Require a signed-in user whose role satisfies `requirement`.
///
/// Redirects to the login form when nobody is signed in and renders the
/// access-denied page (403) when the gate says no.
pub async fn require_role(
    state: &AppState,
    session: &Session,
    path: &str,
    requirement: &RoleRequirement,
) -> Result<UserProfile, Response> {
    let Some(profile) = current_profile(state, session).await else {
        return Err(login_redirect(path));
    };

    match AccessGate::check(profile.role(), requirement) {
        AccessDecision::Allowed => Ok(profile),
        AccessDecision::Denied(denial) => {
            info!(user = %profile.username, role = %profile.role, %path, "access denied");
            state.metrics().record_denied(path, &profile.role);
            Err(render_denied(state, session, &profile, path, &denial).await)
        }
    }
}

/// Context shared by every page: site name, title, path, shell and account menu.
///
/// The shell and account menu are only present for a signed-in profile.
pub async fn page_context(
    state: &AppState,
    session: &Session,
    profile: Option<&UserProfile>,
    path: &str,
    title: &str,
) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("site_name", state.site_name());
    context.insert("title", title);
    context.insert("path", path);

    let shell = match profile {
        Some(profile) => Some(NavigationShell::for_profile(
            profile,
            path,
            sidebar_collapsed(session).await,
        )),
        None => None,
    };
    context.insert("shell", &shell);
    context.insert("account", &AccountMenu::from_profile(profile));

    let csrf_token = if profile.is_some() {
        generate_csrf_token(session).await.unwrap_or_else(|e| {
            error!(error = %e, "failed to generate CSRF token");
            String::new()
        })
    } else {
        String::new()
    };
    context.insert("csrf_token", &csrf_token);

    context
}

/// Render a page template, preferring path-specific overrides.
pub fn render_page(
    state: &AppState,
    path: &str,
    template: &str,
    context: &tera::Context,
) -> Response {
    html_response(state.theme().render_page(path, template, context), template)
}

/// Render exactly `template`, without path suggestions.
pub fn render_template(state: &AppState, template: &str, context: &tera::Context) -> Response {
    let result = state
        .theme()
        .tera()
        .render(template, context)
        .map_err(anyhow::Error::from);
    html_response(result, template)
}

fn html_response(result: anyhow::Result<String>, template: &str) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = ?e, template = %template, "failed to render template");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(
                    "<!DOCTYPE html>\n<html><head><title>Error</title></head>\
                     <body><h1>Error</h1><p>The page could not be rendered.</p></body></html>",
                ),
            )
                .into_response()
        }
    }
}

/// The denial view with its two recovery actions.
pub async fn render_denied(
    state: &AppState,
    session: &Session,
    profile: &UserProfile,
    path: &str,
    denial: &Denial,
) -> Response {
    let mut context = page_context(state, session, Some(profile), path, "Acceso denegado").await;
    context.insert("denial", denial);

    let mut response = render_template(state, "access_denied.html", &context);
    if response.status().is_success() {
        *response.status_mut() = StatusCode::FORBIDDEN;
    }
    response
}
