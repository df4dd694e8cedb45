//! Heading and labeled-field matching.

use regex::Regex;

/// A matched label or heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatch {
    /// Text following the label on the same line, if any.
    pub content: String,
    /// Zero-based line index of the matched line.
    pub line_index: usize,
}

impl LabelMatch {
    /// Returns true if the label carries non-empty same-line content.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Finds a `Name:` label or heading anywhere in the text.
///
/// Matching is case-insensitive and tolerant of markdown decoration before
/// the name (heading markers, blockquotes, emphasis), an optional `A.`-style
/// enumerator, bold markers around the name, and `:`/`-` separators. Straight
/// and curly apostrophes in the name are interchangeable, and hyphens match
/// a hyphen, a space, or nothing (so "Micro-Sprint" also matches
/// "Micro Sprint" and "MicroSprint").
///
/// Returns the first occurrence; later duplicates are ignored.
pub fn heading_or_label(text: &str, name: &str) -> Option<LabelMatch> {
    find_label(text, name, true)
}

/// Like [`heading_or_label`], but the `:`/`-` separator is optional.
///
/// Used for section headings such as `### A. Framework Performance Analysis`
/// that carry no trailing colon.
pub(crate) fn heading_loose(text: &str, name: &str) -> Option<LabelMatch> {
    find_label(text, name, false)
}

fn find_label(text: &str, name: &str, require_separator: bool) -> Option<LabelMatch> {
    let re = label_regex(name, require_separator);
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    let content = caps
        .get(1)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    let line_index = text[..whole.start()].matches('\n').count();
    Some(LabelMatch {
        content,
        line_index,
    })
}

/// Builds the line-anchored regex for a label name.
pub(crate) fn label_regex(name: &str, require_separator: bool) -> Regex {
    let separator = if require_separator {
        r"[:\-\x{2013}\x{2014}]"
    } else {
        r"[:\-\x{2013}\x{2014}]?"
    };
    let pattern = format!(
        r"(?mi)^\s*(?:[#>*_`~-]+\s*)*(?:[A-Za-z][.)]\s*)?(?:\*\*|__)?\s*{name}\s*(?:\*\*|__)?\s*{separator}\s*(?:\*\*|__)?[ \t]*(.*)$",
        name = name_pattern(name),
        separator = separator,
    );
    // The pattern is assembled from escaped fragments, so it always compiles.
    Regex::new(&pattern).unwrap_or_else(|_| Regex::new("$^").unwrap())
}

/// Converts a human label name into a tolerant regex fragment.
///
/// Word gaps stay on one line; a name split across lines is not a label.
fn name_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() * 2);
    for ch in name.trim().chars() {
        match ch {
            ' ' => pattern.push_str(r"[ \t]+"),
            '\'' | '\u{2019}' => pattern.push_str("['\u{2019}]"),
            '-' => pattern.push_str(r"[- \t]?"),
            c => pattern.push_str(&regex::escape(&c.to_string())),
        }
    }
    pattern
}
