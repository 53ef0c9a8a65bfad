//! MongoDB-backed book store.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Deserializer, Serialize};

use crate::books::{Book, BookFields, BookId};
use crate::config::DatastoreConfig;
use crate::store::{BookStore, StoreError, StoreResult};

/// Stored shape of a book: `_id` is a native ObjectId rather than hex text.
///
/// Records written by other tools may lack a field or hold `null`; both read
/// back as the zero value. A field of the wrong type is still a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    price: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&Book> for BookDocument {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.as_object_id(),
            title: book.fields.title.clone(),
            author: book.fields.author.clone(),
            price: book.fields.price,
        }
    }
}

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Book::new(
            doc.id.into(),
            BookFields {
                title: doc.title,
                author: doc.author,
                price: doc.price,
            },
        )
    }
}

/// Book store over a single MongoDB collection.
///
/// Cloning is cheap; the driver shares one connection pool between clones.
#[derive(Clone)]
pub struct MongoBookStore {
    database: Database,
    books: Collection<BookDocument>,
}

impl MongoBookStore {
    /// Connect to the configured deployment and verify it answers a `ping`.
    pub async fn connect(config: &DatastoreConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);
        let store = Self {
            books: database.collection(&config.collection),
            database,
        };
        store.ping().await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB"
        );
        Ok(store)
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn ping(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn create(&self, book: &Book) -> StoreResult<()> {
        self.books.insert_one(BookDocument::from(book)).await?;
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Book>> {
        // Raw documents, so a malformed record surfaces as Decode, not Backend.
        let mut cursor = self
            .books
            .clone_with_type::<Document>()
            .find(doc! {})
            .await?;

        let mut books = Vec::new();
        while let Some(raw) = cursor.try_next().await? {
            let decoded: BookDocument =
                bson::from_document(raw).map_err(|e| StoreError::Decode(e.to_string()))?;
            books.push(decoded.into());
        }
        Ok(books)
    }

    async fn get(&self, id: BookId) -> StoreResult<Option<Book>> {
        let found = self
            .books
            .find_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(found.map(Book::from))
    }

    async fn update(&self, id: BookId, fields: &BookFields) -> StoreResult<u64> {
        let result = self
            .books
            .update_one(
                doc! { "_id": id.as_object_id() },
                doc! {
                    "$set": {
                        "title": fields.title.as_str(),
                        "author": fields.author.as_str(),
                        "price": fields.price,
                    }
                },
            )
            .await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: BookId) -> StoreResult<u64> {
        let result = self
            .books
            .delete_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(result.deleted_count)
    }
}
