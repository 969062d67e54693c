//! Home, dashboard and one section page per navigation path.

use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use tower_sessions::Session;

use crate::access::{HOME_PATH, RoleRequirement};
use crate::menu::{DASHBOARD_PATH, NavigationEntry, resolver};
use crate::state::AppState;

use super::helpers::{current_profile, page_context, render_page, require_role};

/// Create the page router.
///
/// Every path that appears in any role's menu gets a route; access to it is
/// limited to the roles whose menu lists it.
pub fn router() -> Router<AppState> {
    let mut router = Router::new()
        .route(HOME_PATH, get(home))
        .route(DASHBOARD_PATH, get(dashboard));

    for entry in resolver::all_entries()
        .into_iter()
        .filter(|e| e.path != DASHBOARD_PATH)
    {
        router = router.route(
            entry.path,
            get(move |State(state): State<AppState>, session: Session| {
                section(state, session, entry)
            }),
        );
    }

    router
}

/// Public landing page. Signed-in users see it inside the shell.
async fn home(State(state): State<AppState>, session: Session) -> Response {
    let profile = current_profile(&state, &session).await;
    let context = page_context(
        &state,
        &session,
        profile.as_ref(),
        HOME_PATH,
        state.site_name(),
    )
    .await;
    render_page(&state, HOME_PATH, "home.html", &context)
}

/// Dashboard, open to every signed-in user.
async fn dashboard(State(state): State<AppState>, session: Session) -> Response {
    let profile = match require_role(
        &state,
        &session,
        DASHBOARD_PATH,
        &RoleRequirement::Authenticated,
    )
    .await
    {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    state
        .metrics()
        .record_page_view(DASHBOARD_PATH, &profile.role);
    let context = page_context(&state, &session, Some(&profile), DASHBOARD_PATH, "Dashboard").await;
    render_page(&state, DASHBOARD_PATH, "dashboard.html", &context)
}

/// Section page for one navigation entry.
async fn section(state: AppState, session: Session, entry: NavigationEntry) -> Response {
    let requirement = RoleRequirement::for_path(entry.path);
    let profile = match require_role(&state, &session, entry.path, &requirement).await {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    state.metrics().record_page_view(entry.path, &profile.role);
    let mut context = page_context(&state, &session, Some(&profile), entry.path, entry.title).await;
    context.insert("icon", &entry.icon);
    render_page(&state, entry.path, "section.html", &context)
}
