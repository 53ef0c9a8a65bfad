//! Configuration validation.
//!
//! Serde handles the syntactic checks; this module covers what serde cannot:
//! addresses that must parse, names that must be valid HTTP tokens, and
//! combinations browsers reject. Validation is a pure function that reports
//! every problem it finds, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{ServiceConfig, StoreBackend};
use crate::http::middleware::cors_layer;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("listener.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("datastore.uri must use the mongodb:// or mongodb+srv:// scheme")]
    UnsupportedUriScheme,

    #[error("cors: {0}")]
    Cors(String),
}

/// Check a configuration, collecting every error.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let datastore = &config.datastore;
    if datastore.backend == StoreBackend::Mongodb {
        if datastore.uri.is_empty() {
            errors.push(ValidationError::Empty("datastore.uri"));
        } else if !(datastore.uri.starts_with("mongodb://")
            || datastore.uri.starts_with("mongodb+srv://"))
        {
            errors.push(ValidationError::UnsupportedUriScheme);
        }
        if datastore.database.is_empty() {
            errors.push(ValidationError::Empty("datastore.database"));
        }
        if datastore.collection.is_empty() {
            errors.push(ValidationError::Empty("datastore.collection"));
        }
    }

    if let Err(e) = cors_layer(&config.cors) {
        errors.push(ValidationError::Cors(e.to_string()));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
