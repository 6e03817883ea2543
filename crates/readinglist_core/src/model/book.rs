//! Book domain model.
//!
//! # Responsibility
//! - Define the persisted `Book` record and its create/update inputs.
//! - Apply required-field validation and the `status` default before
//!   anything reaches storage.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another book.
//! - `title` and `author` are non-empty at creation.
//! - `status` is free-form text; `unread`, `reading` and `finished` are
//!   conventions, not an enforced set.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned book identifier.
pub type BookId = i64;

/// Status given to books created without one.
pub const DEFAULT_STATUS: &str = "unread";

/// Persisted book record, serialized as `{id, title, author, status}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub status: String,
}

/// Create input as received from callers.
///
/// Missing fields are `None`; nothing is validated until [`NewBook::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the status that will be persisted for this input.
    pub fn resolved_status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }

    /// Checks required-field presence. Empty strings count as missing.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if is_blank(self.title.as_deref()) {
            return Err(BookValidationError::MissingTitle);
        }
        if is_blank(self.author.as_deref()) {
            return Err(BookValidationError::MissingAuthor);
        }
        Ok(())
    }

    /// Validates the input and resolves the `status` default.
    pub fn into_draft(self) -> Result<BookDraft, BookValidationError> {
        self.validate()?;
        let status = self.resolved_status().to_string();
        match (self.title, self.author) {
            (Some(title), Some(author)) => Ok(BookDraft {
                title,
                author,
                status,
            }),
            (None, _) => Err(BookValidationError::MissingTitle),
            (_, None) => Err(BookValidationError::MissingAuthor),
        }
    }
}

/// Validated create payload with every column resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub status: String,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl BookPatch {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Returns whether applying this patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.status.is_none()
    }
}

/// Required-field failure on book creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookValidationError {
    MissingTitle,
    MissingAuthor,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "book title is required"),
            Self::MissingAuthor => write!(f, "book author is required"),
        }
    }
}

impl Error for BookValidationError {}

fn is_blank(value: Option<&str>) -> bool {
    value.unwrap_or_default().is_empty()
}
