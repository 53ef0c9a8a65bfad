//! In-process book store.
//!
//! Backs `datastore.backend = "memory"` and stands in for MongoDB in tests.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::books::{Book, BookFields, BookId};
use crate::store::{BookStore, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: DashMap<BookId, BookFields>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create(&self, book: &Book) -> StoreResult<()> {
        match self.books.entry(book.id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(book.id)),
            Entry::Vacant(slot) => {
                slot.insert(book.fields.clone());
                Ok(())
            }
        }
    }

    async fn list(&self) -> StoreResult<Vec<Book>> {
        Ok(self
            .books
            .iter()
            .map(|entry| Book::new(*entry.key(), entry.value().clone()))
            .collect())
    }

    async fn get(&self, id: BookId) -> StoreResult<Option<Book>> {
        Ok(self
            .books
            .get(&id)
            .map(|fields| Book::new(id, fields.clone())))
    }

    async fn update(&self, id: BookId, fields: &BookFields) -> StoreResult<u64> {
        match self.books.get_mut(&id) {
            Some(mut stored) => {
                *stored = fields.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: BookId) -> StoreResult<u64> {
        Ok(self.books.remove(&id).map_or(0, |_| 1))
    }
}
