#![allow(dead_code)]

use std::sync::Arc;

use medium_api::auth::{AppState, AppStateInner};
use medium_store::MemoryStore;

pub const SECRET: &str = "test-secret";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve a fresh in-memory app on an ephemeral port.
pub async fn spawn_app() -> TestServer {
    spawn_app_with_limit(medium_api::DEFAULT_BODY_LIMIT).await
}

pub async fn spawn_app_with_limit(body_limit: usize) -> TestServer {
    let state: AppState = Arc::new(AppStateInner {
        store: Arc::new(MemoryStore::new()),
        jwt_secret: SECRET.to_string(),
        token_ttl_secs: 3600,
    });
    let app = medium_api::router(state, body_limit);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    }
}
