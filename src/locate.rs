//! Ancestor search and directory index resolution.
//!
//! # Responsibilities
//! - Find the nearest ancestor directory carrying a sought file name
//! - Resolve a directory request to its index entry
//!
//! # Design Decisions
//! - Ancestor search starts at the deepest directory and climbs toward the
//!   site root; the first hit wins, so deeper files shadow shallower ones
//! - The search never climbs above the site root
//! - Index resolution takes the first `index*` entry in whatever order the
//!   filesystem enumerates; entries are deliberately not sorted
//! - Unreadable directories are treated as "nothing found", never an error

use std::path::{Path, PathBuf};

/// Find the nearest file called `name` in `start_dir` or any of its
/// ancestors up to and including `root`.
///
/// Returns the deepest match, or `None` when the root is reached without
/// one. `start_dir` must lie inside `root` for the climb to terminate there;
/// a `start_dir` outside `root` simply climbs to the filesystem root.
pub async fn find_ancestor_file(start_dir: &Path, root: &Path, name: &str) -> Option<PathBuf> {
    let mut dir = start_dir;
    loop {
        let candidate = dir.join(name);
        if let Ok(meta) = tokio::fs::metadata(&candidate).await {
            if meta.is_file() {
                return Some(candidate);
            }
        }
        if dir == root {
            return None;
        }
        dir = dir.parent()?;
    }
}

/// Find the index entry of a directory.
///
/// Returns the name of the first directory entry that starts with `index`,
/// in filesystem enumeration order. An unreadable directory yields `None`.
pub async fn find_directory_index(dir: &Path) -> Option<String> {
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with("index") {
            return Some(name.to_string());
        }
    }
    None
}
