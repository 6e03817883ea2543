//! Book catalog use-case service.
//!
//! # Responsibility
//! - Provide the list/create/update/delete entry points for callers.
//! - Validate create input and resolve the `status` default before any
//!   connection is opened.
//! - Translate repository `NotFound` into a service-level error.
//!
//! # Invariants
//! - A failed validation never reaches the repository.
//! - Service layer remains storage-agnostic.

use crate::db::DbError;
use crate::model::book::{Book, BookDraft, BookId, BookPatch, BookValidationError, NewBook};
use crate::repo::book_repo::{BookRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type BookServiceResult<T> = Result<T, BookServiceError>;

/// Service error for book use-cases.
#[derive(Debug)]
pub enum BookServiceError {
    /// Create input is missing a required field.
    Validation(BookValidationError),
    /// Target book does not exist.
    NotFound(BookId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for BookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<BookValidationError> for BookServiceError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for BookServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for BookServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Validates create input and resolves its `status` default.
///
/// Needs no storage, so callers can reject bad input before acquiring a
/// connection.
pub fn prepare_new_book(input: NewBook) -> BookServiceResult<BookDraft> {
    input.into_draft().map_err(|err| {
        warn!("event=book_create module=service status=rejected reason={err:?}");
        BookServiceError::Validation(err)
    })
}

/// Use-case service wrapper for book CRUD operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all books in insertion order.
    pub fn list_books(&self) -> BookServiceResult<Vec<Book>> {
        Ok(self.repo.list_books()?)
    }

    /// Gets one book by id.
    pub fn get_book(&self, id: BookId) -> BookServiceResult<Option<Book>> {
        Ok(self.repo.get_book(id)?)
    }

    /// Creates a book from caller input.
    ///
    /// # Contract
    /// - `title` and `author` must be present and non-empty.
    /// - Missing `status` is stored as `unread`.
    /// - Returns the stored book including its assigned id.
    pub fn create_book(&self, input: NewBook) -> BookServiceResult<Book> {
        let draft = prepare_new_book(input)?;
        self.create_draft(&draft)
    }

    /// Persists an already validated draft.
    pub fn create_draft(&self, draft: &BookDraft) -> BookServiceResult<Book> {
        let started_at = Instant::now();
        let book = self.repo.create_book(draft)?;
        info!(
            "event=book_create module=service status=ok book_id={} duration_ms={}",
            book.id,
            started_at.elapsed().as_millis()
        );
        Ok(book)
    }

    /// Applies a partial update and returns the full updated book.
    ///
    /// An empty patch leaves the row untouched and still returns it.
    pub fn update_book(&self, id: BookId, patch: &BookPatch) -> BookServiceResult<Book> {
        let started_at = Instant::now();
        let book = self.repo.update_book(id, patch)?;
        info!(
            "event=book_update module=service status=ok book_id={} noop={} duration_ms={}",
            book.id,
            patch.is_empty(),
            started_at.elapsed().as_millis()
        );
        Ok(book)
    }

    /// Permanently deletes a book.
    pub fn delete_book(&self, id: BookId) -> BookServiceResult<()> {
        self.repo.delete_book(id)?;
        info!("event=book_delete module=service status=ok book_id={id}");
        Ok(())
    }
}
