//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the content server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// The served site: root directory and naming.
    pub site: SiteSection,

    /// Listener configuration (bind addresses, TLS).
    pub listener: ListenerConfig,

    /// Content delivery settings.
    pub content: ContentConfig,
}

/// Site identity and location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSection {
    /// Directory tree to serve. Canonicalized at startup.
    pub root: PathBuf,

    /// Site display name, available to page titles as `{site}`.
    pub name: String,

    /// Title format for pages; `{page}` and `{site}` are substituted.
    pub name_format: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            name: String::new(),
            name_format: "{page}".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Plaintext bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS listener, served alongside the plaintext one.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Encrypted bind address (e.g., "0.0.0.0:8443").
    #[serde(default = "default_tls_bind")]
    pub bind_address: String,

    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

fn default_tls_bind() -> String {
    "0.0.0.0:8443".to_string()
}

/// Content delivery settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Per-directory rule file name.
    pub rule_file_name: String,

    /// Per-directory template file name.
    pub template_file_name: String,

    /// Largest raw file buffered whole in memory; anything bigger streams.
    pub max_buffer_bytes: u64,

    /// Chunk size for streamed delivery.
    pub chunk_bytes: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            rule_file_name: ".rules".to_string(),
            template_file_name: ".tmpl".to_string(),
            max_buffer_bytes: 4 * 1024 * 1024,
            chunk_bytes: 64 * 1024,
        }
    }
}
