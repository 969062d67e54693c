//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Where sessions are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Path to the TOML user directory (default: ./users.toml).
    pub users_file: PathBuf,

    /// Directory of template overrides. Built-in templates are used otherwise.
    pub templates_dir: Option<PathBuf>,

    /// Session store: "memory" (default) or "redis".
    pub session_backend: SessionBackend,

    /// Redis connection URL, used when the session store is Redis.
    pub redis_url: String,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,

    /// Only send the session cookie over HTTPS (default: true).
    pub cookie_secure: bool,

    /// Name shown in the top bar.
    pub site_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let users_file = env::var("USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./users.toml"));

        let templates_dir = env::var("TEMPLATES_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let session_backend = parse_session_backend(
            &env::var("SESSION_STORE").unwrap_or_else(|_| "memory".to_string()),
        )?;

        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        let cookie_secure = env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .context("COOKIE_SECURE must be true or false")?;

        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| "Banquillo".to_string());

        Ok(Self {
            port,
            users_file,
            templates_dir,
            session_backend,
            redis_url,
            cookie_same_site,
            cookie_secure,
            site_name,
        })
    }
}

fn parse_session_backend(value: &str) -> Result<SessionBackend> {
    match value.trim().to_lowercase().as_str() {
        "memory" => Ok(SessionBackend::Memory),
        "redis" => Ok(SessionBackend::Redis),
        other => bail!("SESSION_STORE must be \"memory\" or \"redis\", got {other:?}"),
    }
}
