//! Prometheus metrics collection.
//!
//! Counts what the shell decides: which pages render for which roles, how
//! often the access gate denies, and sign-in/sign-out activity.

use prometheus_client::encoding::{EncodeLabelSet, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

/// Page labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct PageLabels {
    pub path: String,
    pub role: String,
}

/// Login outcome labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct LoginLabels {
    pub outcome: String,
}

/// Application metrics.
pub struct Metrics {
    registry: Registry,

    /// Protected pages rendered, by path and role.
    pub page_views: Family<PageLabels, Counter>,

    /// Access gate denials, by path and role.
    pub access_denied: Family<PageLabels, Counter>,

    /// Login attempts by outcome.
    pub logins: Family<LoginLabels, Counter>,

    /// Sign-outs.
    pub sign_outs: Counter,
}

impl Metrics {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let page_views = Family::<PageLabels, Counter>::default();
        registry.register(
            "page_views",
            "Protected pages rendered",
            page_views.clone(),
        );

        let access_denied = Family::<PageLabels, Counter>::default();
        registry.register(
            "access_denied",
            "Requests turned away by the access gate",
            access_denied.clone(),
        );

        let logins = Family::<LoginLabels, Counter>::default();
        registry.register("logins", "Login attempts", logins.clone());

        let sign_outs = Counter::default();
        registry.register("sign_outs", "Sessions ended by sign-out", sign_outs.clone());

        Self {
            registry,
            page_views,
            access_denied,
            logins,
            sign_outs,
        }
    }

    /// Record a rendered protected page.
    pub fn record_page_view(&self, path: &str, role: &str) {
        self.page_views.get_or_create(&labels(path, role)).inc();
    }

    /// Record a denial.
    pub fn record_denied(&self, path: &str, role: &str) {
        self.access_denied.get_or_create(&labels(path, role)).inc();
    }

    /// Record a login attempt.
    pub fn record_login(&self, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.logins
            .get_or_create(&LoginLabels {
                outcome: outcome.to_string(),
            })
            .inc();
    }

    /// Record a sign-out.
    pub fn record_sign_out(&self) {
        self.sign_outs.inc();
    }

    /// Encode metrics in Prometheus text format.
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        // Prometheus encoding to String buffer is infallible
        #[allow(clippy::expect_used)]
        encode(&mut buffer, &self.registry).expect("encoding metrics");
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish()
    }
}

/// Unknown roles share one label to bound cardinality.
fn labels(path: &str, role: &str) -> PageLabels {
    let role = crate::models::Role::parse(role).map_or("unknown", |r| r.as_str());
    PageLabels {
        path: path.to_string(),
        role: role.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let output = Metrics::new().encode();
        assert!(output.contains("page_views"));
        assert!(output.contains("sign_outs_total"));
    }

    #[test]
    fn test_record_denied() {
        let metrics = Metrics::new();
        metrics.record_denied("/admin", "player");
        let output = metrics.encode();
        assert!(output.contains(r#"access_denied_total{path="/admin",role="player"} 1"#));
    }

    #[test]
    fn test_unknown_role_label() {
        let metrics = Metrics::new();
        metrics.record_page_view("/dashboard", "referee");
        let output = metrics.encode();
        assert!(output.contains(r#"role="unknown""#));
        assert!(!output.contains("referee"));
    }

    #[test]
    fn test_record_login() {
        let metrics = Metrics::new();
        metrics.record_login(true);
        metrics.record_login(false);
        metrics.record_login(false);
        let output = metrics.encode();
        assert!(output.contains(r#"logins_total{outcome="failure"} 2"#));
    }
}
