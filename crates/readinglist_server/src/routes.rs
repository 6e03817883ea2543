//! HTTP handlers for the book catalog and meta endpoints.
//!
//! # Invariants
//! - Each store-backed handler acquires its own connection inside
//!   `spawn_blocking` and releases it before the response is built.
//! - Create input is validated before any connection is acquired.
//! - A missing or non-object JSON body is read as `{}`.
//! - Field values that are `null` or not strings are treated as absent.

use crate::error::ApiError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use readinglist_core::{
    prepare_new_book, Book, BookId, BookPatch, BookService, BookServiceResult, BookStore,
    NewBook, SqliteBookRepository,
};
use serde::Serialize;
use serde_json::{Map, Value};

const LANDING_PAGE: &str = include_str!("../static/index.html");

#[derive(Debug, Serialize)]
struct ConfigBody<'a> {
    banner: &'a str,
    env: &'a str,
}

pub(crate) async fn index() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

pub(crate) async fn healthz() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub(crate) async fn config(State(state): State<AppState>) -> impl IntoResponse {
    Json(ConfigBody {
        banner: &state.banner,
        env: &state.env,
    })
    .into_response()
}

pub(crate) async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = with_store(state.store, |service| service.list_books()).await?;
    Ok(Json(books))
}

pub(crate) async fn create_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let fields = json_object(&body);
    let input = NewBook {
        title: string_field(&fields, "title"),
        author: string_field(&fields, "author"),
        status: string_field(&fields, "status"),
    };

    let draft = prepare_new_book(input)?;

    let book = with_store(state.store, move |service| service.create_draft(&draft)).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&raw_id)?;
    let fields = json_object(&body);
    let patch = BookPatch {
        title: string_field(&fields, "title"),
        author: string_field(&fields, "author"),
        status: string_field(&fields, "status"),
    };

    let book = with_store(state.store, move |service| service.update_book(id, &patch)).await?;
    Ok(Json(book))
}

pub(crate) async fn delete_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_book_id(&raw_id)?;
    with_store(state.store, move |service| service.delete_book(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn with_store<T, F>(store: BookStore, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&BookService<SqliteBookRepository<'_>>) -> BookServiceResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || store.with_service(work))
        .await
        .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?;
    Ok(result?)
}

/// Only unsigned decimal ids address a book; anything else cannot exist.
fn parse_book_id(raw: &str) -> Result<BookId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ApiError::NotFound);
    }
    raw.parse().map_err(|_| ApiError::NotFound)
}

fn json_object(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}
