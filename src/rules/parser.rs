//! Rule file parsing.
//!
//! One rule per logical line: `<pattern> <verdict> [interpreter-argv...]`.
//!
//! - `<pattern>` is a regular expression, anchored so it must match the
//!   entire path segment it is tested against
//! - `<verdict>` is `hidden`, `templated`, or absent: any tokens after the
//!   pattern that are not a verdict keyword are the interpreter argv of a
//!   pass-through rule
//! - `#` starts a comment line; blank lines are skipped
//! - a `\` at the end of a physical line continues the logical line
//!
//! Malformed lines (a lone pattern, or a pattern that fails to compile) are
//! logged and skipped; parsing never fails.

use regex::Regex;

/// What a matched rule says about the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The segment and everything below it is invisible.
    Hidden,
    /// Content under the segment is rendered through the page template.
    Templated,
    /// No flag change; the rule may still carry an interpreter.
    PassThrough,
}

/// One parsed, matchable rule line.
#[derive(Debug, Clone)]
pub struct RuleLine {
    pattern: Regex,
    pub verdict: Verdict,
    pub interpreter: Vec<String>,
}

impl RuleLine {
    /// Test the rule against a single path segment.
    ///
    /// The pattern must cover the whole segment: the rule `doc` does not
    /// match the segment `docs`.
    pub fn matches(&self, segment: &str) -> bool {
        self.pattern.is_match(segment)
    }
}

/// Parse the contents of a rule file into its usable lines.
///
/// Comment and blank lines are dropped, escaped newlines are joined, and
/// malformed lines are logged and skipped. The returned order is file order.
pub fn parse_rule_file(source: &str) -> Vec<RuleLine> {
    logical_lines(source)
        .into_iter()
        .filter_map(|(lineno, line)| parse_line(&line, lineno))
        .collect()
}

/// Join physical lines ending in `\` into logical lines.
///
/// Returns `(line number of first physical line, logical line)` pairs.
fn logical_lines(source: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (i, raw) in source.lines().enumerate() {
        let (start, mut acc) = match pending.take() {
            Some((start, acc)) => (start, acc),
            None => (i + 1, String::new()),
        };
        if let Some(stripped) = raw.strip_suffix('\\') {
            acc.push_str(stripped);
            pending = Some((start, acc));
        } else {
            acc.push_str(raw);
            out.push((start, acc));
        }
    }
    // A trailing backslash on the last line has nothing to join with.
    if let Some(rest) = pending {
        out.push(rest);
    }
    out
}

fn parse_line(line: &str, lineno: usize) -> Option<RuleLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let pattern = tokens.next()?;
    let rest: Vec<&str> = tokens.collect();

    if rest.is_empty() {
        tracing::warn!(line = lineno, "rule line has no verdict, skipping");
        return None;
    }

    let (verdict, interpreter) = match rest[0] {
        "hidden" => (Verdict::Hidden, Vec::new()),
        "templated" => (
            Verdict::Templated,
            rest[1..].iter().map(|s| s.to_string()).collect(),
        ),
        _ => (
            Verdict::PassThrough,
            rest.iter().map(|s| s.to_string()).collect(),
        ),
    };

    let anchored = format!("^(?:{pattern})$");
    let pattern = match Regex::new(&anchored) {
        Ok(re) => re,
        Err(err) => {
            tracing::warn!(line = lineno, error = %err, "bad rule pattern, skipping");
            return None;
        }
    };

    Some(RuleLine {
        pattern,
        verdict,
        interpreter,
    })
}
