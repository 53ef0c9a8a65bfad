//! Book route handlers.
//!
//! Each handler parses its input, makes exactly one store call and shapes
//! the response. Update and delete succeed even when nothing matched.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::books::error::ApiError;
use crate::books::model::{Book, BookFields, BookId};
use crate::http::server::AppState;
use crate::store::StoreError;

/// `{"message": ...}` body used for confirmations and errors alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub id: BookId,
}

fn parse_id(raw: &str) -> Result<BookId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// Decode a book body whatever its `Content-Type`.
fn parse_body(payload: Result<Bytes, BytesRejection>) -> Result<BookFields, ApiError> {
    let bytes = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable book body");
        ApiError::InvalidInput
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "Malformed book body");
        ApiError::InvalidInput
    })
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let fields = parse_body(payload)?;
    let book = Book::new(BookId::new(), fields);

    state
        .store
        .create(&book)
        .await
        .map_err(|e| ApiError::store("Error creating book", e))?;

    tracing::info!(book_id = %book.id, "Book created");
    Ok((StatusCode::CREATED, Json(Created { id: book.id })))
}

pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.store.list().await.map_err(|e| match e {
        StoreError::Decode(_) => ApiError::store("Error decoding book", e),
        _ => ApiError::store("Error fetching books", e),
    })?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_id(&raw_id)?;
    match state.store.get(id).await {
        Ok(Some(book)) => Ok(Json(book)),
        Ok(None) => Err(ApiError::NotFound),
        Err(e) => Err(ApiError::store("Error fetching book", e)),
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&raw_id)?;
    let fields = parse_body(payload)?;

    let matched = state
        .store
        .update(id, &fields)
        .await
        .map_err(|e| ApiError::store("Error updating book", e))?;

    tracing::debug!(book_id = %id, matched, "Book update applied");
    Ok(Json(Message::new("Book updated")))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&raw_id)?;

    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(|e| ApiError::store("Error deleting book", e))?;

    tracing::debug!(book_id = %id, deleted, "Book delete applied");
    Ok(Json(Message::new("Book deleted")))
}
