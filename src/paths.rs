//! Pure path string operations.
//!
//! # Responsibilities
//! - Split a path into (directory prefix, trailing segment)
//! - Normalize an inbound request path into a safe site-relative path
//!
//! # Design Decisions
//! - `split_trailing` with no separator present returns `("", path)`: the
//!   whole input is the trailing segment and the prefix is the site root
//! - Normalization rejects any `..` segment outright rather than resolving
//!   it, so a request can never name an entry above the site root
//! - No filesystem access here; everything is string manipulation

use percent_encoding::percent_decode_str;

/// Split `path` at the last occurrence of `sep`.
///
/// Returns the text before and after the separator. The separator itself is
/// dropped. When `sep` does not occur, returns `("", path)`.
pub fn split_trailing<'a>(path: &'a str, sep: char) -> (&'a str, &'a str) {
    match path.rfind(sep) {
        Some(i) => (&path[..i], &path[i + sep.len_utf8()..]),
        None => ("", path),
    }
}

/// Normalize a raw request path into a site-relative path.
///
/// Percent-decodes, splits on `/`, drops empty and `.` segments, and joins
/// the rest with `/`. Returns `None` when the path cannot be made safe:
/// invalid UTF-8 after decoding, an embedded NUL, or any `..` segment.
///
/// The root request (`/`) normalizes to the empty string.
pub fn normalize(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let mut segments = Vec::new();
    for seg in decoded.split('/') {
        match seg {
            "" | "." => continue,
            ".." => return None,
            s => segments.push(s),
        }
    }
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trailing_basic() {
        assert_eq!(split_trailing("docs/guide/intro.md", '/'), ("docs/guide", "intro.md"));
        assert_eq!(split_trailing("intro.md", '/'), ("", "intro.md"));
        assert_eq!(split_trailing("", '/'), ("", ""));
    }

    #[test]
    fn test_split_trailing_suffix() {
        assert_eq!(split_trailing("archive.tar.gz", '.'), ("archive.tar", "gz"));
        assert_eq!(split_trailing("Makefile", '.'), ("", "Makefile"));
    }

    #[test]
    fn test_normalize_plain() {
        assert_eq!(normalize("/docs/intro.md").as_deref(), Some("docs/intro.md"));
        assert_eq!(normalize("/").as_deref(), Some(""));
        assert_eq!(normalize("//docs///intro.md").as_deref(), Some("docs/intro.md"));
    }

    #[test]
    fn test_normalize_dot_segments() {
        assert_eq!(normalize("/docs/./intro.md").as_deref(), Some("docs/intro.md"));
        assert_eq!(normalize("/docs/../secret"), None);
        assert_eq!(normalize("/.."), None);
    }

    #[test]
    fn test_normalize_percent_decoding() {
        assert_eq!(normalize("/docs/a%20b.md").as_deref(), Some("docs/a b.md"));
        // An encoded traversal is still a traversal after decoding.
        assert_eq!(normalize("/%2e%2e/secret"), None);
        assert_eq!(normalize("/a%00b"), None);
    }
}
