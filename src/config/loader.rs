//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    let config: ProxyConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Command-line and environment values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub upstream_base_url: Option<String>,
}

impl Overrides {
    /// Apply the overrides, then re-validate the result.
    pub fn apply(self, mut config: ProxyConfig) -> Result<ProxyConfig, ConfigError> {
        if let Some(bind_address) = self.bind_address {
            config.listener.bind_address = bind_address;
        }
        if let Some(base_url) = self.upstream_base_url.filter(|u| !u.is_empty()) {
            config.upstream.base_url = Some(base_url);
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [upstream]
            base_url = "https://dummyjson.com"
            timeout_secs = 3

            [proxy]
            mount_prefix = "/bff"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.proxy.mount_prefix, "/bff");
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_config("[upstream]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validation_message_lists_every_error() {
        let err = parse_config(
            r#"
            [upstream]
            base_url = "ftp://files.example"
            timeout_secs = 0
            "#,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("invalid configuration: "));
        assert!(message.contains("ftp://files.example"));
        assert!(message.contains("; "));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = parse_config("[upstream\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = ProxyConfig::default();
        config.upstream.base_url = Some("https://from-file.example".into());

        let config = Overrides {
            bind_address: Some("127.0.0.1:8000".into()),
            upstream_base_url: Some("https://from-env.example".into()),
        }
        .apply(config)
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8000");
        assert_eq!(config.upstream.base_url.as_deref(), Some("https://from-env.example"));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let config = Overrides {
            bind_address: None,
            upstream_base_url: Some(String::new()),
        }
        .apply(ProxyConfig::default())
        .unwrap();

        assert!(config.upstream.base_url.is_none());
    }
}
