//! Account menu: display metadata derived from the signed-in profile.

use serde::Serialize;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::access::HOME_PATH;
use crate::auth::AuthProvider;
use crate::models::{Role, UserProfile};

/// Visual variant of the role badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

/// Role badge shown next to the user's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleBadge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl RoleBadge {
    /// Badge for a raw role id. Values without a table entry show as-is.
    pub fn for_role(role: &str) -> Self {
        let (label, variant) = match Role::parse(role) {
            Some(Role::Admin) => ("Administrador", BadgeVariant::Destructive),
            Some(Role::Coach) => ("Entrenador", BadgeVariant::Default),
            Some(Role::Player) => ("Jugador", BadgeVariant::Secondary),
            Some(Role::Parent) => ("Padre/Madre", BadgeVariant::Outline),
            Some(Role::CoachMain | Role::CoachTeam) | None => (role, BadgeVariant::Secondary),
        };
        Self {
            label: label.to_string(),
            variant,
        }
    }
}

/// First letter of each whitespace-separated token, upper-cased.
pub fn initials(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Everything the account menu template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountMenu {
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub initials: String,
    pub badge: RoleBadge,
}

impl AccountMenu {
    /// `None` when nobody is signed in; the menu then renders nothing.
    pub fn from_profile(profile: Option<&UserProfile>) -> Option<Self> {
        let profile = profile?;
        Some(Self {
            display_name: profile.display_name.clone(),
            email: profile.email.clone(),
            avatar_url: profile.avatar_url.clone().filter(|_| profile.has_avatar()),
            initials: initials(&profile.display_name),
            badge: RoleBadge::for_role(&profile.role),
        })
    }

    /// End the session through the auth collaborator, then go home.
    ///
    /// Failures belong to the collaborator; they are logged and the
    /// redirect happens regardless.
    pub async fn sign_out(auth: &dyn AuthProvider, session: &Session) -> SignOutOutcome {
        match auth.sign_out(session).await {
            Ok(Some(username)) => info!(user = %username, "user signed out"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "sign-out failed"),
        }
        SignOutOutcome {
            redirect_to: HOME_PATH,
        }
    }
}

/// Where to send the browser after signing out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignOutOutcome {
    pub redirect_to: &'static str,
}
