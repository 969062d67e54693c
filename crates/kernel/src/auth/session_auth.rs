//! Session-backed auth provider.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tower_sessions::Session;
use tracing::debug;

use super::{AuthProvider, SignInError, UserDirectory};
use crate::models::UserProfile;

/// Session key for storing the authenticated username.
pub const SESSION_USERNAME: &str = "username";

/// Keeps the signed-in username in the session and profiles in a directory.
#[derive(Debug, Clone)]
pub struct SessionAuth {
    directory: Arc<UserDirectory>,
}

impl SessionAuth {
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }
}

#[async_trait]
impl AuthProvider for SessionAuth {
    async fn current_profile(&self, session: &Session) -> Result<Option<UserProfile>> {
        let username: Option<String> = session
            .get(SESSION_USERNAME)
            .await
            .context("failed to read username from session")?;

        let Some(username) = username else {
            return Ok(None);
        };

        // A user removed from the directory stays signed out.
        let profile = self.directory.get(&username).cloned();
        if profile.is_none() {
            debug!(user = %username, "session user not in directory");
        }
        Ok(profile)
    }

    async fn sign_in(
        &self,
        session: &Session,
        username: &str,
        password: &str,
    ) -> Result<UserProfile, SignInError> {
        let profile = self
            .directory
            .verify(username, password)
            .cloned()
            .ok_or(SignInError::InvalidCredentials)?;

        session.cycle_id().await?;
        session
            .insert(SESSION_USERNAME, profile.username.clone())
            .await?;

        Ok(profile)
    }

    async fn sign_out(&self, session: &Session) -> Result<Option<String>> {
        let username: Option<String> = session.get(SESSION_USERNAME).await.ok().flatten();

        session
            .flush()
            .await
            .context("failed to delete session")?;

        Ok(username)
    }
}
