//! Shared utilities for integration testing.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use content_server::config::SiteConfig;
use content_server::HttpServer;

/// An on-disk site fixture plus the config pointing at it.
pub struct Site {
    // Held for its Drop; the tree disappears with the test.
    _dir: tempfile::TempDir,
    pub config: SiteConfig,
}

/// Build a site tree from `(relative path, contents)` pairs.
pub fn site(files: &[(&str, &str)]) -> Site {
    let dir = tempfile::tempdir().unwrap();
    for (path, contents) in files {
        let abs = dir.path().join(path);
        if let Some(parent) = abs.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(abs, contents).unwrap();
    }

    let mut config = SiteConfig::default();
    config.site.root = dir.path().canonicalize().unwrap();
    Site { _dir: dir, config }
}

/// Write an executable script into the site tree.
#[cfg(unix)]
pub fn write_script(site: &Site, rel: &str, contents: &str) {
    use std::os::unix::fs::PermissionsExt;

    let abs = site.config.site.root.join(rel);
    std::fs::write(&abs, contents).unwrap();
    let mut perms = std::fs::metadata(&abs).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&abs, perms).unwrap();
}

/// Assemble the production router for a config.
pub fn router(config: SiteConfig) -> Router {
    HttpServer::new(config).router()
}

/// Drive one GET through the router without a socket.
pub async fn get(router: &Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    (parts.status, parts.headers, bytes)
}
