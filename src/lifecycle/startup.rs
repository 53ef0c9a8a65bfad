//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the configured book store
//! - Verify MongoDB answers before any traffic is accepted
//!
//! # Design Decisions
//! - Fail fast: a datastore that cannot be reached at startup is fatal
//! - No reconnect loop; the driver's own pool handles later outages

use std::sync::Arc;

use crate::config::{DatastoreConfig, StoreBackend};
use crate::store::{BookStore, InMemoryBookStore, MongoBookStore, StoreResult};

/// Open the store selected by `config.backend`.
pub async fn open_store(config: &DatastoreConfig) -> StoreResult<Arc<dyn BookStore>> {
    match config.backend {
        StoreBackend::Mongodb => {
            tracing::info!(database = %config.database, "Connecting to MongoDB");
            let store = MongoBookStore::connect(config).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory book store; data is lost on exit");
            Ok(Arc::new(InMemoryBookStore::new()))
        }
    }
}
