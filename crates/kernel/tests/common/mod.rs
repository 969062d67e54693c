#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`TestApp`] wraps the REAL kernel router with an in-memory session store
//! and a user directory built from `banquillo-test-utils` fixtures. Hashing
//! the fixture passwords is slow, so the directory text is built once per
//! test binary and shared.

#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions::cookie::SameSite;

use banquillo_kernel::auth::{SessionAuth, UserDirectory};
use banquillo_kernel::theme::ThemeEngine;
use banquillo_kernel::{AppState, routes, session};
use banquillo_test_utils::{DEFAULT_PASSWORD, one_user_per_role, test_user, users_toml};

/// Directory shared by every test: one user per role, an unknown-role user
/// and a user with an avatar.
static USERS_TOML: LazyLock<String> = LazyLock::new(|| {
    let mut users = one_user_per_role();
    users.push(test_user("referee", "referee").with_display_name("Rita Árbitra"));
    users.push(
        test_user("juan", "coach")
            .with_display_name("Juan Pérez")
            .with_avatar("/avatars/juan.png"),
    );
    users.push(test_user("nobody", "player").without_role());
    users_toml(&users)
});

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_theme(ThemeEngine::builtin().expect("built-in templates"))
    }

    /// Same fixtures, rendered with `theme`.
    pub fn with_theme(theme: ThemeEngine) -> Self {
        let directory = UserDirectory::from_toml_str(&USERS_TOML).expect("fixture directory");
        let state = AppState::from_parts(
            "Banquillo".to_string(),
            Arc::new(SessionAuth::new(directory)),
            theme,
        );
        let router = routes::app(
            state.clone(),
            session::memory_session_layer(SameSite::Strict, false),
        );

        Self { router, state }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// GET `path`, sending `cookies` when non-empty.
    pub async fn get(&self, path: &str, cookies: &str) -> Response {
        let mut builder = Request::builder().method("GET").uri(path);
        if !cookies.is_empty() {
            builder = builder.header(header::COOKIE, cookies);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// POST an urlencoded form to `path`.
    pub async fn post_form(&self, path: &str, cookies: &str, fields: &[(&str, &str)]) -> Response {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if !cookies.is_empty() {
            builder = builder.header(header::COOKIE, cookies);
        }
        self.request(builder.body(Body::from(body)).unwrap()).await
    }

    /// Log in through the real form and return the session cookie.
    pub async fn login(&self, username: &str) -> String {
        let response = self.login_with(username, DEFAULT_PASSWORD, None).await;
        assert_eq!(
            response.status(),
            StatusCode::SEE_OTHER,
            "login failed for {username}"
        );
        extract_cookies(&response).expect("session cookie after login")
    }

    /// Submit the login form and return the raw response.
    pub async fn login_with(
        &self,
        username: &str,
        password: &str,
        destination: Option<&str>,
    ) -> Response {
        let form = self.get("/user/login", "").await;
        assert_eq!(form.status(), StatusCode::OK);
        let cookies = extract_cookies(&form).expect("session cookie on login form");
        let html = body_string(form).await;
        let token = extract_csrf_token(&html).expect("csrf token on login form");

        let mut fields = vec![
            ("_token", token.as_str()),
            ("username", username),
            ("password", password),
        ];
        if let Some(destination) = destination {
            fields.push(("destination", destination));
        }
        self.post_form("/user/login", &cookies, &fields).await
    }

    /// GET a page and return its status, the (possibly rotated) cookie and body.
    pub async fn page(&self, path: &str, cookies: &str) -> (StatusCode, String, String) {
        let response = self.get(path, cookies).await;
        let status = response.status();
        let cookies = extract_cookies(&response).unwrap_or_else(|| cookies.to_string());
        (status, cookies, body_string(response).await)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// `name=value` pairs from every Set-Cookie header, joined for a Cookie header.
pub fn extract_cookies(response: &Response) -> Option<String> {
    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::to_string)
        .collect();

    if cookies.is_empty() {
        None
    } else {
        Some(cookies.join("; "))
    }
}

/// First CSRF token found in a rendered form.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let marker = r#"name="_token" value=""#;
    let start = html.find(marker)? + marker.len();
    let end = html[start..].find('"')? + start;
    Some(html[start..end].to_string()).filter(|t| !t.is_empty())
}

/// Location header of a redirect.
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Collect a response body into a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
