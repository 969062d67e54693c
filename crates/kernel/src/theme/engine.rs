//! Theme engine with Tera templates and per-path page suggestions.

use std::path::Path;

use anyhow::{Context, Result};
use dashmap::DashMap;
use tera::Tera;
use tracing::debug;

/// Templates compiled into the binary. A template directory may override any
/// of them by name.
const BUILTIN_TEMPLATES: [(&str, &str); 9] = [
    ("base.html", include_str!("../../templates/base.html")),
    (
        "partials/sidebar.html",
        include_str!("../../templates/partials/sidebar.html"),
    ),
    (
        "partials/account_menu.html",
        include_str!("../../templates/partials/account_menu.html"),
    ),
    ("home.html", include_str!("../../templates/home.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("section.html", include_str!("../../templates/section.html")),
    (
        "access_denied.html",
        include_str!("../../templates/access_denied.html"),
    ),
    ("user/login.html", include_str!("../../templates/user/login.html")),
    (
        "user/logout.html",
        include_str!("../../templates/user/logout.html"),
    ),
];

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
    /// Cache mapping suggestion lists to resolved template names.
    suggestion_cache: DashMap<String, String>,
}

impl ThemeEngine {
    /// Built-in templates only.
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN_TEMPLATES.to_vec())
            .context("failed to compile built-in templates")?;

        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
        })
    }

    /// Templates from `template_dir`, falling back to the built-ins for any
    /// name the directory does not provide.
    pub fn with_overrides(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        // Parent templates may be built-ins, so chains are built after merging.
        let mut tera = Tera::parse(pattern_str).context("failed to parse template overrides")?;
        let overrides = tera.get_template_names().count();

        let builtin = Self::builtin()?;
        tera.extend(&builtin.tera)
            .context("failed to merge built-in templates")?;

        debug!(overrides, dir = %template_dir.display(), "loaded template overrides");

        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
        })
    }

    /// Get the underlying Tera instance for custom operations.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Resolve the best template from a list of suggestions.
    ///
    /// Templates are tried in order; the first one that exists is returned.
    pub fn resolve_template(&self, suggestions: &[&str]) -> Option<String> {
        if suggestions.is_empty() {
            return None;
        }

        let cache_key = suggestions.join("|");
        if let Some(cached) = self.suggestion_cache.get(&cache_key) {
            return Some(cached.clone());
        }

        for suggestion in suggestions {
            let template_name = if suggestion.ends_with(".html") {
                (*suggestion).to_string()
            } else {
                format!("{suggestion}.html")
            };
            if self.tera.get_template(&template_name).is_ok() {
                self.suggestion_cache
                    .insert(cache_key, template_name.clone());
                return Some(template_name);
            }
        }

        None
    }

    /// Page template suggestions for a request path, most specific first.
    ///
    /// `/admin/requests` → `page--admin--requests`, `page--admin`, then the
    /// page's default template.
    pub fn page_suggestions(path: &str, default: &str) -> Vec<String> {
        let normalized = path.trim_matches('/').replace('/', "--");
        let mut suggestions = Vec::new();

        if !normalized.is_empty() {
            suggestions.push(format!("page--{normalized}"));
            if let Some((first, _)) = normalized.split_once("--") {
                suggestions.push(format!("page--{first}"));
            }
        }

        suggestions.push(default.to_string());
        suggestions
    }

    /// Render the page for `path`, preferring a path-specific override.
    pub fn render_page(
        &self,
        path: &str,
        default_template: &str,
        context: &tera::Context,
    ) -> Result<String> {
        let suggestions = Self::page_suggestions(path, default_template);
        let suggestion_refs: Vec<&str> = suggestions.iter().map(String::as_str).collect();

        let template = self
            .resolve_template(&suggestion_refs)
            .unwrap_or_else(|| default_template.to_string());

        self.tera
            .render(&template, context)
            .with_context(|| format!("failed to render {template}"))
    }
}

impl ThemeEngine {
    /// Render the bare shell for a signed-out visitor.
    ///
    /// Fails when an override breaks `base.html` or one of its partials.
    pub fn render_shell(&self, site_name: &str) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("site_name", site_name);
        context.insert("title", site_name);
        context.insert("path", "/");
        context.insert("shell", &Option::<()>::None);
        context.insert("account", &Option::<()>::None);
        context.insert("csrf_token", "");

        self.tera
            .render("base.html", &context)
            .context("failed to render base.html")
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine").finish_non_exhaustive()
    }
}
