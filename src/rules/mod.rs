//! Per-directory rule subsystem.
//!
//! # Data Flow
//! ```text
//! Request path (site-relative)
//!     → cascade.rs (walk rule files root → leaf)
//!     → parser.rs (parse each rule file, first matching line per level)
//!     → Return: RuleCascade { hidden, templated, interpreter }
//!
//! Per directory level:
//!     read <dir>/<rule file>    (absent or unreadable = no rules here)
//!     → match current path segment against lines in file order
//!     → apply first match, carry result down to the next level
//! ```
//!
//! # Design Decisions
//! - Rule files are re-read from disk on every request; no cache, no
//!   staleness, at the cost of one read per ancestor directory
//! - `hidden` is monotonic: once set at any level the walk stops
//! - First match wins within a file; deeper levels override shallower ones
//! - Patterns are anchored regular expressions matched against the single
//!   path segment at that directory level, not the whole path

pub mod cascade;
pub mod parser;

pub use cascade::{resolve_cascade, RuleCascade};
pub use parser::{parse_rule_file, RuleLine, Verdict};
