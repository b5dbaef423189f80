//! Per-request content pipeline.
//!
//! # Responsibilities
//! - Normalize and validate the request path
//! - Redirect directory requests to their index entry
//! - Resolve the rule cascade and short-circuit hidden paths
//! - Produce content (interpreter dispatch or raw read)
//! - Deliver templated, buffered, or streamed
//!
//! # Design Decisions
//! - Everything is recomputed per request straight off the filesystem; the
//!   pipeline holds no cross-request state
//! - A missing entry retries with a `.md` suffix before giving up
//! - Raw files above the buffer budget stream in fixed-size chunks; such
//!   files skip templating so peak memory stays bounded by the budget

use std::net::SocketAddr;
use std::path::Path;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::response::Response;
use tokio_util::io::ReaderStream;

use crate::http::response;
use crate::http::server::AppState;
use crate::interp::QueryParams;
use crate::locate;
use crate::paths;
use crate::rules::{self, RuleCascade};
use crate::template::{self, TemplateData};

/// Fallback handler: every request path is content.
pub async fn serve_content(State(state): State<AppState>, req: Request<Body>) -> Response {
    let raw_path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());
    let remote = remote.as_deref().unwrap_or("-");

    let Some(rel) = paths::normalize(&raw_path) else {
        tracing::info!(remote, path = %raw_path, "rejected request path");
        return response::not_found(&raw_path);
    };

    // The machinery files themselves are never served.
    let (_, last) = paths::split_trailing(&rel, '/');
    if last == state.config.content.rule_file_name
        || last == state.config.content.template_file_name
    {
        tracing::info!(remote, path = %raw_path, "machinery file requested");
        return response::not_found(&raw_path);
    }

    let root = &state.config.site.root;
    let (rel, abs, meta) = match resolve_entry(root, rel).await {
        Some(found) => found,
        None => {
            tracing::info!(remote, path = %raw_path, "no such entry");
            return response::not_found(&raw_path);
        }
    };

    if meta.is_dir() {
        let Some(index) = locate::find_directory_index(&abs).await else {
            tracing::info!(remote, path = %raw_path, "directory has no index entry");
            return response::not_found(&raw_path);
        };
        let base = raw_path.trim_end_matches('/');
        let location = match &query {
            Some(q) => format!("{base}/{index}?{q}"),
            None => format!("{base}/{index}"),
        };
        return response::see_other(location);
    }

    let cascade = rules::resolve_cascade(root, &rel, &state.config.content.rule_file_name).await;
    if cascade.hidden {
        tracing::info!(remote, path = %raw_path, "hidden path requested");
        return response::not_found(&raw_path);
    }

    // Produce the content bytes.
    if !cascade.interpreter.is_empty() {
        let params = parse_query(query.as_deref());
        match state.interpreter.run(&cascade.interpreter, &abs, &params).await {
            Ok(bytes) => deliver(&state, &cascade, &abs, &raw_path, bytes).await,
            Err(err) => {
                tracing::error!(remote, path = %raw_path, error = %err, "interpreter failed");
                response::exec_error()
            }
        }
    } else if meta.len() > state.config.content.max_buffer_bytes {
        if cascade.templated {
            tracing::warn!(
                path = %raw_path,
                size = meta.len(),
                "file exceeds buffer budget, streaming untemplated"
            );
        }
        stream_file(&abs, meta.len(), state.config.content.chunk_bytes, &raw_path).await
    } else {
        match tokio::fs::read(&abs).await {
            Ok(bytes) => deliver(&state, &cascade, &abs, &raw_path, bytes).await,
            Err(err) => {
                tracing::info!(remote, path = %raw_path, error = %err, "cannot read entry");
                response::not_found(&raw_path)
            }
        }
    }
}

/// Stat the named entry, retrying with a `.md` suffix when absent.
async fn resolve_entry(
    root: &Path,
    rel: String,
) -> Option<(String, std::path::PathBuf, std::fs::Metadata)> {
    let abs = root.join(&rel);
    if let Ok(meta) = tokio::fs::metadata(&abs).await {
        return Some((rel, abs, meta));
    }
    if rel.is_empty() || rel.ends_with(".md") {
        return None;
    }
    let rel = format!("{rel}.md");
    let abs = root.join(&rel);
    let meta = tokio::fs::metadata(&abs).await.ok()?;
    Some((rel, abs, meta))
}

/// Deliver produced bytes, through the template when the cascade says so.
async fn deliver(
    state: &AppState,
    cascade: &RuleCascade,
    abs: &Path,
    raw_path: &str,
    bytes: Vec<u8>,
) -> Response {
    if cascade.templated {
        let file_name = abs
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = TemplateData {
            name: template::page_name(
                &file_name,
                &state.config.site.name,
                &state.config.site.name_format,
            ),
            link: raw_path.to_string(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        };
        let dir = abs.parent().unwrap_or(&state.config.site.root);
        if let Some(rendered) = template::render_page(
            state.engine.as_ref(),
            &state.config.site.root,
            dir,
            &state.config.content.template_file_name,
            &data,
        )
        .await
        {
            return response::ok_bytes(rendered);
        }
        // No template, or a broken one: fall through to the raw content.
    }
    response::ok_bytes(bytes)
}

/// Stream a raw file in fixed-size chunks with a declared length.
async fn stream_file(abs: &Path, len: u64, chunk_bytes: usize, raw_path: &str) -> Response {
    match tokio::fs::File::open(abs).await {
        Ok(file) => {
            let stream = ReaderStream::with_capacity(file, chunk_bytes);
            response::ok_stream(len, Body::from_stream(stream))
        }
        Err(err) => {
            tracing::info!(path = %raw_path, error = %err, "cannot open entry for streaming");
            response::not_found(raw_path)
        }
    }
}

/// Decode the query string into ordered key/value pairs.
fn parse_query(query: Option<&str>) -> QueryParams {
    match query {
        Some(q) => url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect(),
        None => Vec::new(),
    }
}
