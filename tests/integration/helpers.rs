//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use library_api::{AppState, build_app};
use library_core::config::AppConfig;
use library_core::types::UserId;
use library_database::MemoryDocumentStore;
use library_entity::UserRole;

/// Password given to every user created by [`TestApp::create_test_user`].
pub const PASSWORD: &str = "secret123";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Wired services, for arranging data directly
    pub state: AppState,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_config(Self::config())
    }

    /// Load the fixture configuration
    pub fn config() -> AppConfig {
        AppConfig::from_file("tests/fixtures/test_config.toml").expect("Failed to load test config")
    }

    /// Create a test application with an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config.clone(), Arc::new(MemoryDocumentStore::new()))
            .expect("Failed to build state");
        let router = build_app(state.clone());
        Self {
            router,
            state,
            config,
        }
    }

    /// Create a user with the given role and return their ID
    pub async fn create_test_user(&self, username: &str, role: UserRole) -> UserId {
        self.state
            .users
            .create_user(
                username,
                &format!("Test {username}"),
                &format!("{username}@example.com"),
                PASSWORD,
                role,
            )
            .await
            .expect("Failed to create test user")
            .id
    }

    /// A fresh cookie-keeping client
    pub fn browser(&self) -> Browser {
        Browser {
            router: self.router.clone(),
            cookie_name: self.config.session.cookie_name.clone(),
            cookie: None,
        }
    }

    /// Create a user and return a browser logged in as them
    pub async fn logged_in(&self, username: &str, role: UserRole) -> (UserId, Browser) {
        let id = self.create_test_user(username, role).await;
        let mut browser = self.browser();
        let response = browser
            .post("/user/login", &[("username", username), ("password", PASSWORD)])
            .await;
        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(response.location.as_deref(), Some("/"), "Login failed");
        (id, browser)
    }
}

/// Issues requests and keeps the session cookie between them
pub struct Browser {
    router: Router,
    cookie_name: String,
    /// Current session token, if any
    pub cookie: Option<String>,
}

impl Browser {
    /// GET a path
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let req = Request::builder().method("GET").uri(path);
        self.send(req, Body::empty()).await
    }

    /// POST a url-encoded form
    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(req, Body::from(body)).await
    }

    async fn send(&mut self, mut req: http::request::Builder, body: Body) -> TestResponse {
        if let Some(token) = &self.cookie {
            req = req.header(COOKIE, format!("{}={}", self.cookie_name, token));
        }
        let req = req.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.store_cookie(response.headers());

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            location,
            body,
        }
    }

    fn store_cookie(&mut self, headers: &http::HeaderMap) {
        let prefix = format!("{}=", self.cookie_name);
        for value in headers.get_all(SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let Some(rest) = value.strip_prefix(&prefix) else {
                continue;
            };
            let token = rest.split(';').next().unwrap_or_default();
            self.cookie = (!token.is_empty()).then(|| token.to_string());
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Redirect target, if any
    pub location: Option<String>,
    /// Parsed JSON view model
    pub body: Value,
}

impl TestResponse {
    /// Assert a `302 Found` to `location`
    pub fn assert_redirect(&self, location: &str) {
        assert_eq!(self.status, StatusCode::FOUND, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(location));
    }

    /// Field error messages in order
    pub fn errors(&self) -> Vec<(String, String)> {
        self.body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .map(|e| {
                        (
                            e["field"].as_str().unwrap_or_default().to_string(),
                            e["message"].as_str().unwrap_or_default().to_string(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Flash message texts in order
    pub fn flash(&self) -> Vec<String> {
        self.body["flash"]
            .as_array()
            .map(|flash| {
                flash
                    .iter()
                    .map(|f| f["message"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Percent-encode a form component
fn encode(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
