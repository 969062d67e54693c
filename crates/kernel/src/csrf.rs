//! CSRF tokens for the shell's forms (login, sign-out, sidebar toggle).
//!
//! Tokens are random, bound to the session, single-use and time-limited.

use anyhow::{Result, bail};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tower_sessions::Session;

/// Session key for storing issued tokens.
const CSRF_SESSION_KEY: &str = "csrf_tokens";

/// Maximum number of live tokens per session.
const MAX_TOKENS: usize = 10;

/// Token validity period in seconds (1 hour).
const TOKEN_VALIDITY_SECS: i64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IssuedToken {
    token: String,
    issued_at: i64,
}

impl IssuedToken {
    fn is_fresh(&self, now: i64) -> bool {
        now - self.issued_at <= TOKEN_VALIDITY_SECS
    }
}

async fn load_tokens(session: &Session) -> Vec<IssuedToken> {
    session
        .get(CSRF_SESSION_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

async fn store_tokens(session: &Session, tokens: Vec<IssuedToken>) -> Result<()> {
    session
        .insert(CSRF_SESSION_KEY, tokens)
        .await
        .map_err(|e| anyhow::anyhow!("failed to store CSRF tokens: {e}"))
}

/// Issue a token and remember it in the session.
pub async fn generate_csrf_token(session: &Session) -> Result<String> {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    let issued_at = chrono::Utc::now().timestamp();

    let mut hasher = Sha256::new();
    hasher.update(random_bytes);
    hasher.update(issued_at.to_le_bytes());
    let token = hex::encode(hasher.finalize());

    let mut tokens = load_tokens(session).await;
    tokens.push(IssuedToken {
        token: token.clone(),
        issued_at,
    });
    if tokens.len() > MAX_TOKENS {
        let excess = tokens.len() - MAX_TOKENS;
        tokens.drain(..excess);
    }
    store_tokens(session, tokens).await?;

    Ok(token)
}

/// Consume a submitted token. `Ok(false)` for unknown or expired tokens.
pub async fn verify_csrf_token(session: &Session, submitted: &str) -> Result<bool> {
    if submitted.is_empty() {
        bail!("empty CSRF token");
    }

    let mut tokens = load_tokens(session).await;
    if tokens.is_empty() {
        return Ok(false);
    }

    let now = chrono::Utc::now().timestamp();
    let Some(index) = tokens
        .iter()
        .position(|t| t.token == submitted && t.is_fresh(now))
    else {
        return Ok(false);
    };

    tokens.remove(index);
    tokens.retain(|t| t.is_fresh(now));
    store_tokens(session, tokens).await?;

    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn token_is_hex_sha256() {
        let token = generate_csrf_token(&session()).await.unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn tokens_are_single_use() {
        let session = session();
        let token = generate_csrf_token(&session).await.unwrap();
        assert!(verify_csrf_token(&session, &token).await.unwrap());
        assert!(!verify_csrf_token(&session, &token).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_and_empty_tokens_fail() {
        let session = session();
        generate_csrf_token(&session).await.unwrap();
        assert!(!verify_csrf_token(&session, "deadbeef").await.unwrap());
        assert!(verify_csrf_token(&session, "").await.is_err());
    }

    #[tokio::test]
    async fn oldest_tokens_are_pruned() {
        let session = session();
        let first = generate_csrf_token(&session).await.unwrap();
        for _ in 0..MAX_TOKENS {
            generate_csrf_token(&session).await.unwrap();
        }
        assert!(!verify_csrf_token(&session, &first).await.unwrap());
    }

    #[test]
    fn freshness_window() {
        let token = IssuedToken {
            token: String::new(),
            issued_at: 1_000,
        };
        assert!(token.is_fresh(1_000 + TOKEN_VALIDITY_SECS));
        assert!(!token.is_fresh(1_001 + TOKEN_VALIDITY_SECS));
    }
}
