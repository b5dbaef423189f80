//! Built-in placeholder render engine.
//!
//! Substitutes `{{name}}`, `{{link}}` and `{{content}}` into the template
//! source. Anything else between double braces, and an opening brace pair
//! with no closing one, is a syntax error.

use super::{RenderError, RenderEngine, TemplateData};

/// Minimal `{{key}}` substitution engine.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderEngine;

impl RenderEngine for PlaceholderEngine {
    fn render(&self, source: &str, data: &TemplateData) -> Result<Vec<u8>, RenderError> {
        let mut out = String::with_capacity(source.len() + data.content.len());
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or(RenderError::Unterminated(offset + open))?;
            let key = after[..close].trim();
            match key {
                "name" => out.push_str(&data.name),
                "link" => out.push_str(&data.link),
                "content" => out.push_str(&data.content),
                other => return Err(RenderError::UnknownKey(other.to_string())),
            }
            offset += open + 2 + close + 2;
            rest = &after[close + 2..];
        }
        out.push_str(rest);
        Ok(out.into_bytes())
    }
}
