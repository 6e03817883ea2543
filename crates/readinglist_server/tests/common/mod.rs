//! Shared harness: a live server on an ephemeral port over a temp database.

#![allow(dead_code)]

use readinglist_core::BookStore;
use readinglist_server::{app, AppState};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub db_path: PathBuf,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with("", "").await
    }

    pub async fn start_with(banner: &str, env: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("books.sqlite3");
        let store = BookStore::open(&db_path).unwrap();
        let router = app(AppState::new(store, banner, env));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            db_path,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        read(response).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        read(response).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .patch(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        read(response).await
    }

    /// Returns the status and the raw body text.
    pub async fn delete(&self, path: &str) -> (u16, String) {
        let response = self.client.delete(self.url(path)).send().await.unwrap();
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    pub async fn create(&self, title: &str, author: &str) -> Value {
        let (status, body) = self
            .post(
                "/books",
                serde_json::json!({"title": title, "author": author}),
            )
            .await;
        assert_eq!(status, 201, "unexpected create response: {body}");
        body
    }
}

async fn read(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap();
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    (status, body)
}
