//! Session layers: Redis for deployments, in-memory for development and tests.

use anyhow::{Context, Result};
use fred::prelude::*;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_redis_store::RedisStore;

/// Default session expiry (24 hours of inactivity).
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Parse a SameSite policy name; anything unrecognized is strict.
pub fn same_site_from_str(value: &str) -> SameSite {
    match value {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

fn configure<S: SessionStore>(store: S, same_site: SameSite, secure: bool) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_secure(secure)
        .with_http_only(true)
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            DEFAULT_SESSION_EXPIRY_HOURS,
        )))
}

/// Session layer backed by process memory.
pub fn memory_session_layer(same_site: SameSite, secure: bool) -> SessionManagerLayer<MemoryStore> {
    configure(MemoryStore::default(), same_site, secure)
}

/// Session layer backed by Redis.
pub async fn redis_session_layer(
    redis_url: &str,
    same_site: SameSite,
    secure: bool,
) -> Result<SessionManagerLayer<RedisStore<Pool>>> {
    let config = Config::from_url(redis_url).context("failed to parse Redis URL")?;

    let pool = Builder::from_config(config)
        .build_pool(1)
        .context("failed to create Redis pool")?;

    pool.init()
        .await
        .context("failed to connect to Redis for sessions")?;

    Ok(configure(RedisStore::new(pool), same_site, secure))
}
