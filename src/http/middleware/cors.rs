//! Cross-origin policy.
//! Builds the `CorsLayer` applied to every response from [`CorsConfig`].

use axum::http::{
    header::{InvalidHeaderName, InvalidHeaderValue},
    method::InvalidMethod,
    request::Parts,
    HeaderName, HeaderValue, Method,
};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

#[derive(Debug, Error)]
pub enum CorsError {
    #[error("invalid allowed origin: {0}")]
    Origin(#[from] InvalidHeaderValue),

    #[error("invalid allowed method: {0}")]
    Method(#[from] InvalidMethod),

    #[error("invalid allowed header: {0}")]
    Header(#[from] InvalidHeaderName),

    #[error("a wildcard origin cannot be combined with credentials")]
    WildcardWithCredentials,
}

/// Translate the configured policy into a tower-http layer.
///
/// Also the single check behind `validate_config`'s cors errors, so a
/// policy tower-http would refuse never reaches `CorsLayer`.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, CorsError> {
    let origin = if config.allowed_origin == "*" {
        if config.allow_credentials {
            return Err(CorsError::WildcardWithCredentials);
        }
        AllowOrigin::any()
    } else {
        // Foreign origins get no Access-Control-Allow-Origin header at all.
        let allowed = HeaderValue::from_str(&config.allowed_origin)?;
        AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| *origin == allowed)
    };

    let methods = config
        .allowed_methods
        .iter()
        .map(|m| Method::from_bytes(m.as_bytes()))
        .collect::<Result<Vec<_>, _>>()?;

    let headers = config
        .allowed_headers
        .iter()
        .map(|h| HeaderName::from_bytes(h.as_bytes()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.allow_credentials))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_builds() {
        assert!(cors_layer(&CorsConfig::default()).is_ok());
    }

    #[test]
    fn wildcard_with_credentials_rejected() {
        let config = CorsConfig {
            allowed_origin: "*".into(),
            ..CorsConfig::default()
        };
        assert!(matches!(
            cors_layer(&config),
            Err(CorsError::WildcardWithCredentials)
        ));
    }

    #[test]
    fn bad_header_name_rejected() {
        let mut config = CorsConfig::default();
        config.allowed_headers.push("x bad".into());
        assert!(matches!(cors_layer(&config), Err(CorsError::Header(_))));
    }
}
