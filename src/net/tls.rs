//! TLS material loading for the encrypted listener.

use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

/// Load the rustls configuration for the TLS accept loop.
///
/// Both files must exist up front; a missing certificate or key is a
/// startup configuration error, not something to discover on the first
/// handshake.
pub async fn load_tls_config(
    cert_path: &Path,
    key_path: &Path,
) -> Result<RustlsConfig, std::io::Error> {
    require_file(cert_path, "certificate").await?;
    require_file(key_path, "private key").await?;

    RustlsConfig::from_pem_file(cert_path, key_path).await
}

async fn require_file(path: &Path, what: &str) -> Result<(), std::io::Error> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("TLS {what} is not a regular file: {}", path.display()),
        )),
        Err(_) => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("TLS {what} not found: {}", path.display()),
        )),
    }
}
