//! User profile model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::{DEFAULT_ROLE, Role};

/// Profile of an authenticated user.
///
/// Owned by the auth collaborator; everything else only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Raw role id as stored. May be outside the known set.
    #[serde(default = "default_role")]
    pub role: String,
    pub email: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl UserProfile {
    /// Parsed role, or `None` when the stored value is not a known role.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Whether the profile has an avatar image to show.
    pub fn has_avatar(&self) -> bool {
        self.avatar_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn profile(role: &str) -> UserProfile {
        UserProfile {
            id: Uuid::nil(),
            username: "juan".to_string(),
            display_name: "Juan Pérez".to_string(),
            avatar_url: None,
            role: role.to_string(),
            email: "juan@example.com".to_string(),
        }
    }

    #[test]
    fn missing_role_defaults_to_player() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "username": "ana",
            "display_name": "Ana",
            "email": "ana@example.com"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, "player");
        assert_eq!(profile.role(), Some(Role::Player));
    }

    #[test]
    fn empty_role_is_not_defaulted() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "username": "ana",
            "display_name": "Ana",
            "role": "",
            "email": "ana@example.com"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, "");
        assert_eq!(profile.role(), None);
    }

    #[test]
    fn unknown_role_is_kept_raw() {
        let profile = profile("referee");
        assert_eq!(profile.role(), None);
        assert_eq!(profile.role, "referee");
    }

    #[test]
    fn empty_avatar_counts_as_missing() {
        let mut profile = profile("coach");
        assert!(!profile.has_avatar());
        profile.avatar_url = Some(String::new());
        assert!(!profile.has_avatar());
        profile.avatar_url = Some("/avatars/juan.png".to_string());
        assert!(profile.has_avatar());
    }
}
