//! Injected handle to the book database.
//!
//! # Responsibility
//! - Bootstrap the schema once at startup.
//! - Hand out one fresh connection per unit of work and close it afterwards.
//!
//! # Invariants
//! - The handle owns no connection; cloning it is cheap and shares nothing
//!   mutable.
//! - Every connection returned by `acquire` has migrations applied.

use crate::db::{open_db, DbResult};
use crate::repo::book_repo::SqliteBookRepository;
use crate::service::book_service::{BookService, BookServiceResult};
use log::info;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BookStore {
    path: Arc<PathBuf>,
}

impl BookStore {
    /// Opens (creating if needed) the database file and applies migrations.
    pub fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        drop(open_db(&path)?);
        info!(
            "event=store_ready module=store status=ok path={}",
            path.display()
        );
        Ok(Self {
            path: Arc::new(path),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a new connection scoped to the caller.
    pub fn acquire(&self) -> DbResult<Connection> {
        open_db(self.path.as_path())
    }

    /// Runs `work` against a service bound to a freshly acquired connection.
    ///
    /// The connection is closed when this returns, on success and on error.
    pub fn with_service<T>(
        &self,
        work: impl FnOnce(&BookService<SqliteBookRepository<'_>>) -> BookServiceResult<T>,
    ) -> BookServiceResult<T> {
        let conn = self.acquire()?;
        let repo = SqliteBookRepository::try_new(&conn)?;
        let service = BookService::new(repo);
        work(&service)
    }
}
