//! Template location and rendering subsystem.
//!
//! # Data Flow
//! ```text
//! Produced content + page metadata
//!     → locate nearest ancestor template file (locate.rs climb)
//!     → engine.rs (render template source with TemplateData)
//!     → Return: rendered bytes, or None (caller serves content unrendered)
//! ```
//!
//! # Design Decisions
//! - "No template anywhere up the tree" is a normal outcome, not an error
//! - A template that exists but cannot be read or rendered is logged as a
//!   warning and treated the same as no template; a broken template must
//!   never take a page down
//! - The substitution syntax is owned by the RenderEngine implementation;
//!   everything else only sees the {name, link, content} contract

pub mod engine;

use std::path::Path;

use thiserror::Error;

use crate::locate::find_ancestor_file;

pub use engine::PlaceholderEngine;

/// Page metadata handed to the render engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateData {
    /// Human-facing page title.
    pub name: String,
    /// The request path as hyperlinks should present it.
    pub link: String,
    /// The produced page body.
    pub content: String,
}

/// Template rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unterminated placeholder at offset {0}")]
    Unterminated(usize),
    #[error("unknown placeholder {{{{{0}}}}}")]
    UnknownKey(String),
}

/// External capability: turn template source plus data into final bytes.
pub trait RenderEngine: Send + Sync {
    fn render(&self, source: &str, data: &TemplateData) -> Result<Vec<u8>, RenderError>;
}

/// Render `data` through the nearest ancestor template of `file_dir`.
///
/// Returns `None` when no template governs the directory or when the
/// template cannot be read or rendered; the caller falls back to the
/// unrendered content.
pub async fn render_page(
    engine: &dyn RenderEngine,
    root: &Path,
    file_dir: &Path,
    template_file_name: &str,
    data: &TemplateData,
) -> Option<Vec<u8>> {
    let template_path = find_ancestor_file(file_dir, root, template_file_name).await?;

    let source = match tokio::fs::read_to_string(&template_path).await {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(template = %template_path.display(), error = %err, "cannot read template");
            return None;
        }
    };

    match engine.render(&source, data) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            tracing::warn!(template = %template_path.display(), error = %err, "template render failed");
            None
        }
    }
}

/// Derive the human-facing page title for a file name.
///
/// Strips the `.md` suffix, then applies `name_format`, substituting
/// `{page}` with the stripped name and `{site}` with the site display name.
pub fn page_name(file_name: &str, site_name: &str, name_format: &str) -> String {
    let page = file_name.strip_suffix(".md").unwrap_or(file_name);
    if name_format.is_empty() {
        return page.to_string();
    }
    name_format.replace("{page}", page).replace("{site}", site_name)
}
