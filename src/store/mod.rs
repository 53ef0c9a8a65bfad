//! Datastore subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → Arc<dyn BookStore> (router state)
//!     → mongo.rs (MongoDB collection, driver-owned pool)
//!       or memory.rs (process-local map)
//! ```
//!
//! # Design Decisions
//! - One store call per request; no transactions, retries or caching
//! - The handle is created once at startup and injected, never global
//! - Update and delete report how many records matched and leave the
//!   interpretation to the caller

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use crate::books::{Book, BookFields, BookId};

pub use memory::InMemoryBookStore;
pub use mongo::MongoBookStore;

/// Errors surfaced by a [`BookStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The datastore could not be reached or rejected the operation.
    #[error("datastore error: {0}")]
    Backend(String),

    /// A stored record does not have the shape of a book.
    #[error("failed to decode stored book: {0}")]
    Decode(String),

    #[error("book {0} already exists")]
    DuplicateId(BookId),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for the book collection.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Round-trip to the datastore without touching data.
    async fn ping(&self) -> StoreResult<()>;

    /// Persist a new book under its pre-assigned id.
    async fn create(&self, book: &Book) -> StoreResult<()>;

    /// All books, in whatever order the datastore yields them.
    async fn list(&self) -> StoreResult<Vec<Book>>;

    async fn get(&self, id: BookId) -> StoreResult<Option<Book>>;

    /// Overwrite the field set of a book. Returns the number of matched records.
    async fn update(&self, id: BookId, fields: &BookFields) -> StoreResult<u64>;

    /// Returns the number of deleted records.
    async fn delete(&self, id: BookId) -> StoreResult<u64>;
}
