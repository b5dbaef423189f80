//! Response construction helpers.
//!
//! # Responsibilities
//! - Build the small set of response shapes the pipeline emits
//! - HTML-escape request paths before echoing them to the client
//!
//! # Design Decisions
//! - Error bodies stay generic; detail goes to the server log only
//! - No content type is declared for page bodies; what the template or
//!   interpreter produced is the handler's business

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Escape a string for embedding in an HTML error body.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// 404 with a short body echoing the escaped request path.
pub fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        format!("404 page not found: {}\n", html_escape(path)),
    )
        .into_response()
}

/// Generic 500 for interpreter failures; detail is logged server-side.
pub fn exec_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        "500 error producing content\n",
    )
        .into_response()
}

/// Redirect to the canonical location of a directory's index entry.
pub fn see_other(location: String) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)], ()).into_response()
}

/// 200 with a fully buffered body.
pub fn ok_bytes(bytes: Vec<u8>) -> Response {
    (StatusCode::OK, bytes).into_response()
}

/// 200 streaming `body` with a declared length.
pub fn ok_stream(len: u64, body: Body) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_LENGTH, len.to_string())],
        body,
    )
        .into_response()
}
