//! HTTP surface for the reading list service.
//!
//! # Responsibility
//! - Wire the injected [`BookStore`] and echoed settings into an axum router.
//! - Bind the listener and serve until shutdown.

pub mod config;
pub mod error;
mod routes;

use anyhow::Context;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch};
use axum::Router;
use log::{info, warn};
use readinglist_core::BookStore;
use std::sync::Arc;
use std::time::Instant;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared, immutable per-process state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    store: BookStore,
    banner: Arc<str>,
    env: Arc<str>,
}

impl AppState {
    pub fn new(store: BookStore, banner: impl Into<Arc<str>>, env: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            banner: banner.into(),
            env: env.into(),
        }
    }
}

/// Builds the full route table.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/config", get(routes::config))
        .route("/healthz", get(routes::healthz))
        .route("/books", get(routes::list_books).post(routes::create_book))
        .route(
            "/books/{id}",
            patch(routes::update_book).delete(routes::delete_book),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Opens the store, binds the listener and serves until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let store = BookStore::open(&config.db_path).with_context(|| {
        format!(
            "failed to open book database `{}`",
            config.db_path.display()
        )
    })?;
    let state = AppState::new(store, config.banner.as_str(), config.app_env.as_str());

    let listen = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .context("bind server listener failed")?;
    info!("event=server_start module=server status=ok listen={listen}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_stop module=server status=error error={err}");
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    info!(
        "event=http_request module=server method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
