//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (buffer and chunk sizes non-zero)
//! - Check bind addresses parse and file names are plain names
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SiteConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BadBindAddress(String),

    #[error("TLS {0} path is empty")]
    EmptyTlsPath(&'static str),

    #[error("{0} must be a plain file name, got {1:?}")]
    NotAPlainName(&'static str, String),

    #[error("{0} must be greater than zero")]
    ZeroSize(&'static str),
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_addr(&config.listener.bind_address, &mut errors);
    if let Some(tls) = &config.listener.tls {
        check_addr(&tls.bind_address, &mut errors);
        if tls.cert_path.is_empty() {
            errors.push(ValidationError::EmptyTlsPath("certificate"));
        }
        if tls.key_path.is_empty() {
            errors.push(ValidationError::EmptyTlsPath("key"));
        }
    }

    check_plain_name("rule_file_name", &config.content.rule_file_name, &mut errors);
    check_plain_name(
        "template_file_name",
        &config.content.template_file_name,
        &mut errors,
    );

    if config.content.max_buffer_bytes == 0 {
        errors.push(ValidationError::ZeroSize("max_buffer_bytes"));
    }
    if config.content.chunk_bytes == 0 {
        errors.push(ValidationError::ZeroSize("chunk_bytes"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_addr(addr: &str, errors: &mut Vec<ValidationError>) {
    if addr.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(addr.to_string()));
    }
}

fn check_plain_name(field: &'static str, name: &str, errors: &mut Vec<ValidationError>) {
    if name.is_empty() || name.contains('/') {
        errors.push(ValidationError::NotAPlainName(field, name.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TlsConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SiteConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_bind_address() {
        let mut config = SiteConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::BadBindAddress(_)));
    }

    #[test]
    fn test_tls_paths_required() {
        let mut config = SiteConfig::default();
        config.listener.tls = Some(TlsConfig {
            bind_address: "0.0.0.0:8443".to_string(),
            cert_path: String::new(),
            key_path: String::new(),
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SiteConfig::default();
        config.content.rule_file_name = "a/b".to_string();
        config.content.max_buffer_bytes = 0;
        config.content.chunk_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
