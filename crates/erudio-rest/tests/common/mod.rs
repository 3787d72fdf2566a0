//! In-memory application shared by the router tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use erudio_config::AppConfig;
use erudio_repository::Repositories;
use erudio_rest::{create_router, AppState};
use erudio_security::PasswordHasher;
use erudio_service::AccountCredentialsVO;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ORIGIN: &str = "http://localhost:8888";
pub const USERNAME: &str = "leandro";
pub const PASSWORD: &str = "admin123";

/// A response with its body collected as text.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_repositories(Repositories::in_memory()).await
    }

    /// Builds the app over `repositories` with one account, leandro/admin123.
    pub async fn with_repositories(repositories: Repositories) -> Self {
        let config = AppConfig::default();
        let hasher = PasswordHasher::with_cost(8 * 1024, 1, 1).expect("argon2 parameters");
        let state = AppState::new(&config, repositories, hasher).expect("application state");
        state
            .auth_service
            .ensure_account(USERNAME, PASSWORD, &["ADMIN".to_string(), "MANAGER".to_string()])
            .await
            .expect("bootstrap account");

        let router = create_router(state.clone(), &config.server);
        Self { router, state }
    }

    pub async fn access_token(&self) -> String {
        self.state
            .auth_service
            .sign_in(AccountCredentialsVO::new(USERNAME, PASSWORD))
            .await
            .expect("sign-in")
            .access_token
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("UTF-8 body"),
        }
    }

    /// Sends a request carrying a valid access token.
    pub async fn send_authorized(&self, builder: RequestBuilder) -> TestResponse {
        let token = self.access_token().await;
        self.send(builder.bearer(&token).build()).await
    }
}

/// Small request builder for the tests.
pub struct RequestBuilder {
    method: Method,
    uri: String,
    headers: Vec<(axum::http::HeaderName, String)>,
    body: Body,
}

impl RequestBuilder {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: Vec::new(),
            body: Body::empty(),
        }
    }

    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn accept(mut self, media: &str) -> Self {
        self.headers.push((ACCEPT, media.to_string()));
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.headers.push((AUTHORIZATION, format!("Bearer {token}")));
        self
    }

    pub fn json(self, body: &Value) -> Self {
        self.body(APPLICATION_JSON, body.to_string())
    }

    pub fn body(mut self, content_type: &str, body: impl Into<String>) -> Self {
        self.headers.push((CONTENT_TYPE, content_type.to_string()));
        self.body = Body::from(body.into());
        self
    }

    pub fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        builder.body(self.body).expect("valid request")
    }
}

pub const APPLICATION_JSON: &str = "application/json";
