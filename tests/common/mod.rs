#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use registrar::registrar_auth::Role;
use registrar::registrar_config::AppConfig;
use registrar::registrar_db::{MemoryStore, RecordStore};
use registrar::registrar_models::auth::NewAccount;
use registrar::router::init_router;
use registrar::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

/// Builds the full router over an empty in-memory store.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

/// Like [`setup_test_app`], with extra environment-style settings.
pub fn setup_test_app_with(settings: &[(&str, &str)]) -> TestApp {
    let mut env: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), TEST_SECRET.to_string()),
        ("PASSWORD_HASH_COST".to_string(), "4".to_string()),
    ]);
    for (key, value) in settings {
        env.insert(key.to_string(), value.to_string());
    }
    let config = AppConfig::from_lookup(move |key: &str| env.get(key).cloned());

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), &config);

    TestApp {
        router: init_router(state.clone()),
        state,
        store,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    /// Registers through the API and returns the token and response body.
    pub async fn register(&self, email: &str, password: &str, role: &str) -> (String, Value) {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({ "email": email, "password": password, "role": role })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        (body["token"].as_str().unwrap().to_string(), body)
    }

    /// Admins cannot self-register by default, so they are created directly.
    pub async fn admin_token(&self) -> String {
        let password_hash = self.state.credentials.hash_password("admin123").unwrap();
        let admin = self
            .store
            .create_user(NewAccount {
                email: "admin@example.com".to_string(),
                password_hash,
                role: Role::Admin,
            })
            .await
            .unwrap();
        self.state
            .credentials
            .issue_token(admin.id, &admin.email, Role::Admin)
            .unwrap()
    }

    /// Creates a student record as admin and returns its id.
    pub async fn create_student(&self, admin: &str, name: &str, surname: &str) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/students",
                Some(admin),
                Some(json!({ "name": name, "surname": surname })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create student failed: {body}");
        body["id"].as_i64().unwrap()
    }
}
