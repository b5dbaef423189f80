//! Cascaded rule resolution.
//!
//! Walks every directory level from the site root down to a file's parent,
//! consulting that level's rule file for the path segment being crossed, and
//! folds the verdicts into a single result for the request.

use std::path::Path;

use super::parser::{parse_rule_file, Verdict};

/// Accumulated verdict for a request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleCascade {
    /// The path (or one of its ancestors) is invisible.
    pub hidden: bool,
    /// Deliver through the page template.
    pub templated: bool,
    /// Interpreter argv; empty means serve the file's own bytes.
    pub interpreter: Vec<String>,
}

/// Resolve the effective rule cascade for a site-relative path.
///
/// At each directory level from the root down, the first line of that
/// level's rule file matching the segment at that level is applied:
///
/// - `hidden` sets the hidden flag and stops the walk entirely; nothing at
///   a deeper level can unhide a path
/// - `templated` sets the templated flag (there is no way to unset it) and,
///   when the rule carries argv, replaces the interpreter
/// - a pass-through rule replaces the interpreter only
///
/// A missing or unreadable rule file, and a file with no matching line,
/// leave the cascade unchanged at that level.
pub async fn resolve_cascade(root: &Path, rel_path: &str, rule_file_name: &str) -> RuleCascade {
    let mut cascade = RuleCascade::default();
    if rel_path.is_empty() {
        return cascade;
    }

    let mut dir = root.to_path_buf();
    for segment in rel_path.split('/') {
        let rule_path = dir.join(rule_file_name);
        match tokio::fs::read_to_string(&rule_path).await {
            Ok(source) => {
                if let Some(line) = parse_rule_file(&source)
                    .into_iter()
                    .find(|line| line.matches(segment))
                {
                    match line.verdict {
                        Verdict::Hidden => {
                            cascade.hidden = true;
                            return cascade;
                        }
                        Verdict::Templated => {
                            cascade.templated = true;
                            if !line.interpreter.is_empty() {
                                cascade.interpreter = line.interpreter;
                            }
                        }
                        Verdict::PassThrough => {
                            cascade.interpreter = line.interpreter;
                        }
                    }
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                // Unreadable rule file counts as "no rules at this level".
                tracing::warn!(path = %rule_path.display(), error = %err, "cannot read rule file");
            }
        }
        dir.push(segment);
    }
    cascade
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    async fn site(files: &[(&str, &str)]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        for (path, contents) in files {
            let abs = dir.path().join(path);
            if let Some(parent) = abs.parent() {
                tokio::fs::create_dir_all(parent).await.unwrap();
            }
            tokio::fs::write(abs, contents).await.unwrap();
        }
        let root = dir.path().to_path_buf();
        (dir, root)
    }

    #[tokio::test]
    async fn test_empty_site_resolves_default() {
        let (_site, root) = site(&[("page.md", "")]).await;
        let cascade = resolve_cascade(&root, "page.md", ".rules").await;
        assert_eq!(cascade, RuleCascade::default());
    }

    #[tokio::test]
    async fn test_hidden_is_monotonic() {
        // A deeper rule file tries to mark the same subtree templated; the
        // hidden verdict at the root must win and stop the walk.
        let (_site, root) = site(&[
            (".rules", "private hidden\n"),
            ("private/.rules", ".+ templated\n"),
            ("private/notes.md", "x"),
        ])
        .await;

        let cascade = resolve_cascade(&root, "private/notes.md", ".rules").await;
        assert!(cascade.hidden);
        assert!(!cascade.templated);

        let deeper = resolve_cascade(&root, "private/sub/deep.md", ".rules").await;
        assert!(deeper.hidden);
    }

    #[tokio::test]
    async fn test_shallow_flag_and_deep_interpreter_compose() {
        let (_site, root) = site(&[
            (".rules", "docs templated\n"),
            ("docs/.rules", ".+\\.sh /bin/sh\n"),
            ("docs/run.sh", "echo hi"),
        ])
        .await;

        let cascade = resolve_cascade(&root, "docs/run.sh", ".rules").await;
        assert!(cascade.templated);
        assert_eq!(cascade.interpreter, vec!["/bin/sh"]);
    }

    #[tokio::test]
    async fn test_deeper_interpreter_overrides_shallower() {
        let (_site, root) = site(&[
            (".rules", ".+ templated /usr/bin/markdown\n"),
            ("docs/.rules", ".+\\.md /usr/local/bin/lowdown\n"),
        ])
        .await;

        let cascade = resolve_cascade(&root, "docs/page.md", ".rules").await;
        assert!(cascade.templated);
        assert_eq!(cascade.interpreter, vec!["/usr/local/bin/lowdown"]);
    }

    #[tokio::test]
    async fn test_first_match_wins_within_file() {
        let (_site, root) = site(&[(
            ".rules",
            ".+\\.md templated /first\n.+\\.md templated /second\n",
        )])
        .await;

        let cascade = resolve_cascade(&root, "page.md", ".rules").await;
        assert_eq!(cascade.interpreter, vec!["/first"]);
    }

    #[tokio::test]
    async fn test_no_matching_line_carries_forward() {
        let (_site, root) = site(&[
            (".rules", "docs templated\n"),
            ("docs/.rules", "nothing-matches-this hidden\n"),
        ])
        .await;

        let cascade = resolve_cascade(&root, "docs/page.md", ".rules").await;
        assert!(cascade.templated);
        assert!(!cascade.hidden);
        assert!(cascade.interpreter.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_lines_do_not_abort() {
        let (_site, root) = site(&[(
            ".rules",
            "lonely-token\n([bad-regex hidden\npage\\.md templated\n",
        )])
        .await;

        let cascade = resolve_cascade(&root, "page.md", ".rules").await;
        assert!(cascade.templated);
    }

    #[tokio::test]
    async fn test_unreadable_rule_file_is_ignored() {
        // A directory with the rule file's name cannot be read as a file;
        // the cascade must continue with whatever was accumulated.
        let (_site, root) = site(&[(".rules", "docs templated\n"), ("docs/page.md", "x")]).await;
        tokio::fs::create_dir_all(root.join("docs/.rules"))
            .await
            .unwrap();

        let cascade = resolve_cascade(&root, "docs/page.md", ".rules").await;
        assert!(cascade.templated);
    }

    #[tokio::test]
    async fn test_segment_granularity() {
        // The pattern is tested against one segment per level, never the
        // joined path.
        let (_site, root) = site(&[(".rules", "docs/page\\.md hidden\n")]).await;

        let cascade = resolve_cascade(&root, "docs/page.md", ".rules").await;
        assert!(!cascade.hidden);
    }
}
