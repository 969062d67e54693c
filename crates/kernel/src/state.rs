//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::auth::{AuthProvider, SessionAuth, UserDirectory};
use crate::config::Config;
use crate::metrics::Metrics;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Nothing in it changes after
/// start-up except metric counters.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Site name shown in the top bar.
    site_name: String,

    /// Auth/session collaborator.
    auth: Arc<dyn AuthProvider>,

    /// Theme engine for template rendering.
    theme: Arc<ThemeEngine>,

    /// Prometheus metrics.
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Build state from configuration: load the user directory and templates.
    pub fn new(config: &Config) -> Result<Self> {
        let directory = UserDirectory::load(&config.users_file)
            .with_context(|| format!("failed to load {}", config.users_file.display()))?;
        info!(users = directory.len(), "user directory loaded");

        let theme = match &config.templates_dir {
            Some(dir) => ThemeEngine::with_overrides(dir)?,
            None => ThemeEngine::builtin()?,
        };

        Ok(Self::from_parts(
            config.site_name.clone(),
            Arc::new(SessionAuth::new(directory)),
            theme,
        ))
    }

    /// Assemble state from ready-made collaborators.
    pub fn from_parts(site_name: String, auth: Arc<dyn AuthProvider>, theme: ThemeEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                site_name,
                auth,
                theme: Arc::new(theme),
                metrics: Arc::new(Metrics::new()),
            }),
        }
    }

    pub fn site_name(&self) -> &str {
        &self.inner.site_name
    }

    /// Get the auth collaborator.
    pub fn auth(&self) -> &dyn AuthProvider {
        self.inner.auth.as_ref()
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Get the metrics registry.
    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }
}
