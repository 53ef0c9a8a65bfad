//! Book records and their HTTP handlers.
//!
//! # Routes
//! ```text
//! POST   /books        → create_book  → 201 {id}
//! GET    /books        → list_books   → 200 [Book]
//! GET    /books/{id}   → get_book     → 200 Book | 404
//! PUT    /books/{id}   → update_book  → 200 {message}
//! DELETE /books/{id}   → delete_book  → 200 {message}
//! ```

pub mod error;
pub mod handlers;
pub mod model;

pub use error::ApiError;
pub use handlers::{Created, Message};
pub use model::{Book, BookFields, BookId, InvalidBookId};
