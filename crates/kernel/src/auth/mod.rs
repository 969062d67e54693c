//! Auth/session collaborator.
//!
//! The shell only needs three things from authentication: who is signed in,
//! a way to sign in, and a way to sign out. [`AuthProvider`] is that seam;
//! [`SessionAuth`] implements it over tower-sessions and a [`UserDirectory`].

pub mod directory;
mod session_auth;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tower_sessions::Session;

use crate::models::UserProfile;

pub use directory::{DirectoryError, UserDirectory, hash_password, verify_password};
pub use session_auth::{SESSION_USERNAME, SessionAuth};

/// Typed sign-in failure for explicit status code mapping.
#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("session store error")]
    Session(#[from] tower_sessions::session::Error),
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Profile of the signed-in user, if any.
    async fn current_profile(&self, session: &Session) -> Result<Option<UserProfile>>;

    /// Verify credentials and bind the user to the session.
    async fn sign_in(
        &self,
        session: &Session,
        username: &str,
        password: &str,
    ) -> Result<UserProfile, SignInError>;

    /// Terminate the session. Returns the username that was signed in.
    async fn sign_out(&self, session: &Session) -> Result<Option<String>>;
}
