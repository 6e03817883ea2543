//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every write is one SQL statement; create and update read the row back
//!   through `RETURNING`.
//! - List order is `id ASC`, i.e. insertion order.
//! - Update and delete on an unknown id return `RepoError::NotFound`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::book::{Book, BookDraft, BookId, BookPatch};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOKS_TABLE: &str = "books";
const BOOK_COLUMNS: [&str; 4] = ["id", "title", "author", "status"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No book row exists for the id.
    NotFound(BookId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "book repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "book repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "book repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for book CRUD operations.
pub trait BookRepository {
    /// Inserts a validated draft and returns the stored row with its new id.
    fn create_book(&self, draft: &BookDraft) -> RepoResult<Book>;
    /// Gets one book by id.
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Lists every book in insertion order.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Overwrites the fields present in `patch` and returns the updated row.
    fn update_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book>;
    /// Permanently removes one book.
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository borrowing one connection.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_book_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, draft: &BookDraft) -> RepoResult<Book> {
        let book = self.conn.query_row(
            "INSERT INTO books (title, author, status)
             VALUES (?1, ?2, ?3)
             RETURNING id, title, author, status;",
            params![
                draft.title.as_str(),
                draft.author.as_str(),
                draft.status.as_str()
            ],
            parse_book_row,
        )?;
        Ok(book)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                "SELECT id, title, author, status FROM books WHERE id = ?1;",
                [id],
                parse_book_row,
            )
            .optional()?;
        Ok(book)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, author, status FROM books ORDER BY id ASC;")?;
        let books = stmt
            .query_map([], parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }

    fn update_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        // COALESCE keeps the stored value for every absent field, so an
        // empty patch still returns the current row.
        let updated = self
            .conn
            .query_row(
                "UPDATE books
                 SET
                    title = COALESCE(?2, title),
                    author = COALESCE(?3, author),
                    status = COALESCE(?4, status)
                 WHERE id = ?1
                 RETURNING id, title, author, status;",
                params![
                    id,
                    patch.title.as_deref(),
                    patch.author.as_deref(),
                    patch.status.as_deref(),
                ],
                parse_book_row,
            )
            .optional()?;

        updated.ok_or(RepoError::NotFound(id))
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        status: row.get("status")?,
    })
}

fn ensure_book_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, BOOKS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(BOOKS_TABLE));
    }

    for column in BOOK_COLUMNS {
        if !table_has_column(conn, BOOKS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: BOOKS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
