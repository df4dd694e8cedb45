//! Section content blocks under a heading.
//!
//! Distinguishes a heading with real content from an empty or placeholder
//! heading, which is how the meta-mode exit rule judges section completeness.

use once_cell::sync::Lazy;
use regex::Regex;

use super::label::heading_loose;

/// Minimum body characters for a section to count as complete.
pub const MIN_SECTION_CHARS: usize = 50;

/// A line shorter than this (trimmed) is not a meaningful content line.
pub const MEANINGFUL_LINE_MIN_CHARS: usize = 10;

/// Lines that terminate a section body: markdown headings, letter-enumerated
/// headings, or a standalone bold heading line.
static SECTION_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:#{1,6}\s+.+|[A-Z][.)]\s+.+|(?:\*\*|__)[^:]+(?:\*\*|__)\s*:?\s*$)")
        .expect("section boundary regex is valid")
});

/// A matched section: heading plus captured body measurements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    /// Zero-based line index of the heading.
    pub heading_line: usize,
    /// Characters of body text (trimmed lines, newline-joined).
    pub body_chars: usize,
    /// Body lines whose trimmed length exceeds [`MEANINGFUL_LINE_MIN_CHARS`].
    pub meaningful_lines: usize,
}

impl BlockMatch {
    /// Returns true if the body meets both thresholds.
    pub fn meets(&self, min_chars: usize, min_meaningful_lines: usize) -> bool {
        self.body_chars > min_chars && self.meaningful_lines >= min_meaningful_lines
    }

    /// Default completeness: >50 body chars and at least one meaningful line.
    pub fn is_complete(&self) -> bool {
        self.meets(MIN_SECTION_CHARS, 1)
    }
}

/// Locates `heading` and measures the text until the next heading of
/// equal-or-higher level (or end of input).
///
/// Same-line content after the heading counts toward the body, and so do
/// lower-level subheadings inside the section. Returns `None` when the
/// heading is absent entirely.
pub fn content_block(text: &str, heading: &str) -> Option<BlockMatch> {
    let found = heading_loose(text, heading)?;
    let lines: Vec<&str> = text.lines().collect();
    let own_level = markdown_level(lines[found.line_index]);

    let mut body: Vec<&str> = Vec::new();
    if !found.content.trim().is_empty() {
        body.push(found.content.trim());
    }
    for line in lines.iter().skip(found.line_index + 1) {
        if SECTION_BOUNDARY_RE.is_match(line) && markdown_level(line) <= own_level {
            break;
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            body.push(trimmed);
        }
    }

    let body_chars = if body.is_empty() {
        0
    } else {
        body.iter().map(|l| l.len()).sum::<usize>() + body.len() - 1
    };
    let meaningful_lines = body
        .iter()
        .filter(|l| l.len() > MEANINGFUL_LINE_MIN_CHARS)
        .count();

    Some(BlockMatch {
        heading_line: found.line_index,
        body_chars,
        meaningful_lines,
    })
}

/// Heading depth: the count of `#` markers. Letter-enumerated and bold
/// headings carry no markers and rank as level zero, above any `#` depth.
fn markdown_level(line: &str) -> usize {
    line.trim_start().chars().take_while(|c| *c == '#').count()
}
