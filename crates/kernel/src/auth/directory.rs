//! User directory loaded from a TOML file.
//!
//! ```toml
//! [[users]]
//! username = "laura"
//! display_name = "Laura Gómez"
//! email = "laura@club.example"
//! role = "admin"
//! password_hash = "$argon2id$v=19$..."
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::UserProfile;
use crate::models::role::DEFAULT_ROLE;

/// Errors raised while loading a directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read user directory {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid user directory: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate username: {0}")]
    DuplicateUser(String),

    #[error("user {0} has an unparseable password hash")]
    InvalidHash(String),
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    id: Option<Uuid>,
    username: String,
    display_name: String,
    email: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct DirectoryEntry {
    profile: UserProfile,
    password_hash: String,
}

/// Read-only set of known users.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, DirectoryEntry>,
}

impl UserDirectory {
    /// Load the directory from a TOML file.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse the directory from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, DirectoryError> {
        let file: DirectoryFile = toml::from_str(text)?;
        let mut users = HashMap::with_capacity(file.users.len());

        for record in file.users {
            if PasswordHash::new(&record.password_hash).is_err() {
                return Err(DirectoryError::InvalidHash(record.username));
            }
            if users.contains_key(&record.username) {
                return Err(DirectoryError::DuplicateUser(record.username));
            }

            let profile = UserProfile {
                id: record.id.unwrap_or_else(Uuid::now_v7),
                username: record.username.clone(),
                display_name: record.display_name,
                avatar_url: record.avatar_url,
                role: record.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
                email: record.email,
            };
            users.insert(
                record.username,
                DirectoryEntry {
                    profile,
                    password_hash: record.password_hash,
                },
            );
        }

        debug!(count = users.len(), "loaded user directory");
        Ok(Self { users })
    }

    /// Profile for a username.
    pub fn get(&self, username: &str) -> Option<&UserProfile> {
        self.users.get(username).map(|e| &e.profile)
    }

    /// Profile for a username if `password` matches its hash.
    pub fn verify(&self, username: &str, password: &str) -> Option<&UserProfile> {
        let entry = self.users.get(username)?;
        verify_password(&entry.password_hash, password).then_some(&entry.profile)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Check a password against a PHC hash string.
pub fn verify_password(hash: &str, password: &str) -> bool {
    if password.is_empty() {
        return false;
    }

    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn directory_toml(entries: &[(&str, &str, Option<&str>)]) -> String {
        let mut out = String::new();
        for (username, password, role) in entries {
            let hash = hash_password(password).unwrap();
            out.push_str("[[users]]\n");
            out.push_str(&format!("username = \"{username}\"\n"));
            out.push_str(&format!("display_name = \"{username} Test\"\n"));
            out.push_str(&format!("email = \"{username}@example.com\"\n"));
            if let Some(role) = role {
                out.push_str(&format!("role = \"{role}\"\n"));
            }
            out.push_str(&format!("password_hash = \"{hash}\"\n\n"));
        }
        out
    }

    #[test]
    fn verify_matching_password() {
        let dir =
            UserDirectory::from_toml_str(&directory_toml(&[("ana", "secret", Some("coach"))]))
                .unwrap();
        let profile = dir.verify("ana", "secret").unwrap();
        assert_eq!(profile.role, "coach");
        assert!(dir.verify("ana", "wrong").is_none());
        assert!(dir.verify("nobody", "secret").is_none());
    }

    #[test]
    fn missing_role_defaults_to_player() {
        let dir = UserDirectory::from_toml_str(&directory_toml(&[("ana", "pw", None)])).unwrap();
        assert_eq!(dir.get("ana").unwrap().role, "player");
    }

    #[test]
    fn unknown_role_is_preserved() {
        let dir =
            UserDirectory::from_toml_str(&directory_toml(&[("ana", "pw", Some("referee"))]))
                .unwrap();
        assert_eq!(dir.get("ana").unwrap().role, "referee");
    }

    #[test]
    fn empty_role_is_kept_as_unrecognized() {
        let dir =
            UserDirectory::from_toml_str(&directory_toml(&[("ana", "pw", Some(""))])).unwrap();
        let profile = dir.get("ana").unwrap();
        assert_eq!(profile.role, "");
        assert_eq!(profile.role(), None);
        assert_eq!(crate::menu::resolve_str(&profile.role).len(), 1);
    }

    #[test]
    fn duplicate_usernames_rejected() {
        let text = directory_toml(&[("ana", "a", None), ("ana", "b", None)]);
        assert!(matches!(
            UserDirectory::from_toml_str(&text),
            Err(DirectoryError::DuplicateUser(name)) if name == "ana"
        ));
    }

    #[test]
    fn bad_hash_rejected() {
        let text = r#"
            [[users]]
            username = "ana"
            display_name = "Ana"
            email = "ana@example.com"
            password_hash = "plaintext"
        "#;
        assert!(matches!(
            UserDirectory::from_toml_str(text),
            Err(DirectoryError::InvalidHash(_))
        ));
    }

    #[test]
    fn empty_file_is_empty_directory() {
        let dir = UserDirectory::from_toml_str("").unwrap();
        assert!(dir.is_empty());
    }

    #[test]
    fn empty_password_never_verifies() {
        let hash = hash_password("").unwrap();
        assert!(!verify_password(&hash, ""));
    }
}
