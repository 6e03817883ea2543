//! Domain model for the reading list catalog.
//!
//! # Invariants
//! - A `Book` is identified by a store-assigned integer `BookId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod book;
