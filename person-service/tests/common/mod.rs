#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use person_service::config::{PersonConfig, MONGODB_SERVICE_HOST, MONGODB_SERVICE_PORT};
use person_service::services::{InMemoryConnector, InMemoryPersonStore};
use person_service::startup::{build_router, AppState};
use serde::de::DeserializeOwned;
use service_core::config::{Config as CoreConfig, EnvSource};
use service_core::middleware::CORRELATION_ID_HEADER;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

pub const TEST_CORRELATION_ID: &str = "test-correlation-id";

pub fn mongo_env() -> HashMap<String, String> {
    env(&[(MONGODB_SERVICE_HOST, "localhost"), (MONGODB_SERVICE_PORT, "27017")])
}

pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Environment that tests can change while the router is running.
#[derive(Default)]
pub struct SharedEnv {
    vars: Mutex<HashMap<String, String>>,
}

impl SharedEnv {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self {
            vars: Mutex::new(vars),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.vars.lock().unwrap().remove(key);
    }
}

impl EnvSource for SharedEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.lock().unwrap().var(key)
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: InMemoryPersonStore,
    pub connector: Arc<InMemoryConnector>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("Response body is not UTF-8")
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON body")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_env(mongo_env())
    }

    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self::with_env_source(Arc::new(env))
    }

    pub fn with_env_source(env: Arc<dyn EnvSource>) -> Self {
        let config = PersonConfig::from_env(CoreConfig::default(), env.as_ref())
            .expect("Failed to build test configuration");
        let store = InMemoryPersonStore::new();
        let connector = Arc::new(InMemoryConnector::new(store.clone()));
        let state = AppState::new(config, connector.clone(), env);

        TestApp {
            router: build_router(state.clone()),
            state,
            store,
            connector,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_personer(&self) -> TestResponse {
        self.send(
            Request::builder()
                .uri("/personer")
                .header(CORRELATION_ID_HEADER, TEST_CORRELATION_ID)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_personer(&self, body: impl Into<Body>) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/personer")
                .header(CORRELATION_ID_HEADER, TEST_CORRELATION_ID)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
    }
}
