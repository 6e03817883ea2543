//! Core domain logic for the reading list service.
//! This crate is the single source of truth for book invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{
    Book, BookDraft, BookId, BookPatch, BookValidationError, NewBook, DEFAULT_STATUS,
};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::book_service::{
    prepare_new_book, BookService, BookServiceError, BookServiceResult,
};
pub use store::BookStore;

