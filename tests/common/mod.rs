use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use taskgate::router::init_router;
use taskgate::state::AppState;
use taskgate_auth::Role;
use taskgate_config::{CorsConfig, JwtConfig, RateLimitConfig};
use taskgate_core::hash_password;
use taskgate_db::{MemoryStore, UserStore};
use taskgate_models::User;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";
pub const TEST_PASSWORD: &str = "password123";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

#[allow(dead_code)]
pub struct TestUser {
    pub user: User,
    pub token: String,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        Self::with_rate_limit(RateLimitConfig::default())
    }

    pub fn with_rate_limit(rate_limit_config: RateLimitConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            store.clone(),
            JwtConfig::new(TEST_SECRET),
            CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            rate_limit_config,
        );

        Self {
            router: init_router(state.clone()),
            state,
            store,
        }
    }

    /// Inserts a user directly and signs a token for it.
    pub async fn seed_user(&self, email: &str, role: Role) -> TestUser {
        let user = User::with_role(email, hash_password(TEST_PASSWORD).unwrap(), role);
        self.store.create_user(&user).await.unwrap();

        let token = self
            .state
            .codec
            .issue(&user.id.to_string(), &user.email, role, self.state.token_ttl())
            .unwrap();

        TestUser { user, token }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends a JSON request, optionally with a bearer token, and decodes the
    /// JSON response body (`Value::Null` when empty).
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}
