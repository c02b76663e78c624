//! Shared harness for API integration tests.
//!
//! Each test gets its own server on an ephemeral port, backed by a fresh
//! in-memory store, so tests run in parallel without touching PostgreSQL.

#![allow(dead_code)]

use std::net::SocketAddr;

use noteful_api::{build_router, AppState};
use noteful_db::test_fixtures::{seed_folders, seed_notes};
use noteful_db::{Folder, MemoryStore, Note};

pub const TEST_TOKEN: &str = "test-api-token";

pub struct TestApp {
    pub base_url: String,
    pub store: MemoryStore,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Start a server over an empty store.
    pub async fn spawn() -> Self {
        let store = MemoryStore::new();
        let state = AppState::in_memory(&store, TEST_TOKEN);
        let app = build_router(state, &["http://localhost:3000".to_string()]);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            store,
            client: reqwest::Client::new(),
        }
    }

    /// Start a server with the standard fixture folders and notes loaded.
    pub async fn spawn_seeded() -> (Self, Vec<Folder>, Vec<Note>) {
        let app = Self::spawn().await;
        let folders = seed_folders(&app.store.folders()).await;
        let notes = seed_notes(&app.store.notes()).await;
        (app, folders, notes)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(TEST_TOKEN)
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(TEST_TOKEN)
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.patch(self.url(path)).bearer_auth(TEST_TOKEN)
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(TEST_TOKEN)
    }
}

/// Read a JSON body, panicking with the raw text if it does not parse.
pub async fn json_body(response: reqwest::Response) -> serde_json::Value {
    let text = response.text().await.expect("Failed to read body");
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Body is not JSON ({}): {}", e, text))
}

/// The `error.message` of an error body.
pub async fn error_message(response: reqwest::Response) -> String {
    let body = json_body(response).await;
    body["error"]["message"]
        .as_str()
        .unwrap_or_else(|| panic!("Missing error.message in {}", body))
        .to_string()
}
