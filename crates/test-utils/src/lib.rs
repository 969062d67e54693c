//! Banquillo test utilities.
//!
//! Fixtures for integration tests: user records and the TOML user
//! directory text the kernel loads them from.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher};
use serde::Serialize;

/// Password given to every fixture user unless overridden.
pub const DEFAULT_PASSWORD: &str = "correct horse battery staple";

/// Create a test user with default values.
pub fn test_user(username: &str, role: &str) -> TestUser {
    TestUser {
        username: username.to_string(),
        display_name: format!("{username} Test"),
        email: format!("{username}@club.example"),
        role: Some(role.to_string()),
        avatar_url: None,
        password: DEFAULT_PASSWORD.to_string(),
    }
}

/// A test user builder for creating directory fixtures.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
    pub password: String,
}

impl TestUser {
    /// Set the display name.
    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }

    /// Set an avatar image.
    pub fn with_avatar(mut self, url: &str) -> Self {
        self.avatar_url = Some(url.to_string());
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    /// Leave the role out so the directory default applies.
    pub fn without_role(mut self) -> Self {
        self.role = None;
        self
    }
}

#[derive(Serialize)]
struct DirectoryFile<'a> {
    users: Vec<UserRecord<'a>>,
}

#[derive(Serialize)]
struct UserRecord<'a> {
    username: &'a str,
    display_name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
    password_hash: String,
}

/// Render a user directory file for `users`, hashing each password.
///
/// # Panics
///
/// Panics if hashing or TOML serialization fails.
#[allow(clippy::expect_used)]
pub fn users_toml(users: &[TestUser]) -> String {
    let records = users
        .iter()
        .map(|u| UserRecord {
            username: &u.username,
            display_name: &u.display_name,
            email: &u.email,
            role: u.role.as_deref(),
            avatar_url: u.avatar_url.as_deref(),
            password_hash: Argon2::default()
                .hash_password(u.password.as_bytes(), &SaltString::generate(&mut OsRng))
                .expect("hash fixture password")
                .to_string(),
        })
        .collect();

    toml::to_string(&DirectoryFile { users: records }).expect("serialize user directory")
}

/// One user per known role, named after the role.
pub fn one_user_per_role() -> Vec<TestUser> {
    ["admin", "coach", "coach_main", "coach_team", "player", "parent"]
        .into_iter()
        .map(|role| test_user(role, role))
        .collect()
}
