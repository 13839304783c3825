//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! collected rather than stopping at the first one.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a [`ProxyConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url `{0}` is not a valid URL")]
    BaseUrl(String),

    #[error("upstream.base_url `{0}` must use http or https")]
    BaseUrlScheme(String),

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("proxy.mount_prefix `{0}` must start with `/` and must not end with `/`")]
    MountPrefix(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if let Some(base_url) = &config.upstream.base_url {
        match Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(_) => errors.push(ValidationError::BaseUrlScheme(base_url.clone())),
            Err(_) => errors.push(ValidationError::BaseUrl(base_url.clone())),
        }
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let prefix = &config.proxy.mount_prefix;
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::MountPrefix(prefix.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
