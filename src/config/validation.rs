//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check URLs actually parse and use a supported scheme
//! - Validate value ranges (timeouts > 0, header names non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CheckoutConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::CheckoutConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A URL field did not parse or used an unsupported scheme.
    #[error("{field}: invalid URL `{value}`: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A timeout was configured as zero.
    #[error("{field}: timeout must be greater than zero")]
    ZeroTimeout { field: &'static str },

    /// A required string field was empty.
    #[error("{field}: must not be empty")]
    Empty { field: &'static str },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &CheckoutConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("api.base_url", &config.api.base_url, &mut errors);
    check_url("webhook.url", &config.webhook.url, &mut errors);

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.connect_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        });
    }

    if config.webhook.signature_header.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "webhook.signature_header",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme `{}`", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::CheckoutConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&CheckoutConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = CheckoutConfig::default();
        config.api.base_url = "not a url".to_string();
        config.timeouts.connect_secs = 0;
        config.timeouts.request_secs = 0;
        config.webhook.signature_header = " ".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut config = CheckoutConfig::default();
        config.webhook.url = "ftp://example.com/webhook".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("unsupported scheme"));
    }
}
