//! Layout state owned by the layout collaborator.
//!
//! The only state is the sidebar open/collapsed flag, kept in the session.

use anyhow::{Context, Result};
use tower_sessions::Session;

/// Session key for the collapsed sidebar flag.
pub const SESSION_SIDEBAR_COLLAPSED: &str = "sidebar_collapsed";

/// Whether the sidebar is collapsed for this session. Defaults to open.
pub async fn sidebar_collapsed(session: &Session) -> bool {
    session
        .get::<bool>(SESSION_SIDEBAR_COLLAPSED)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Flip the collapsed flag and return the new value.
pub async fn toggle_sidebar(session: &Session) -> Result<bool> {
    let collapsed = !sidebar_collapsed(session).await;
    session
        .insert(SESSION_SIDEBAR_COLLAPSED, collapsed)
        .await
        .context("failed to store sidebar state")?;
    Ok(collapsed)
}

/// Local redirect target, or `fallback` for anything that could leave the site.
pub fn safe_return_path<'a>(candidate: Option<&'a str>, fallback: &'a str) -> &'a str {
    match candidate {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => fallback,
    }
}
