//! Book Service Library
//!
//! HTTP CRUD over a single MongoDB collection of books.

pub mod books;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{BookStore, InMemoryBookStore, MongoBookStore};
