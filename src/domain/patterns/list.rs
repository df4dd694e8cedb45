//! Bullet and numbered list matching.

use once_cell::sync::Lazy;
use regex::Regex;

use super::label::heading_or_label;

/// Lines counting as list items: bullet glyphs or `N.`/`N)` numbering.
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*\x{2022}\x{2023}\x{2014}\x{2013}]|\d{1,3}[.)])\s+(\S.*)$")
        .expect("list item regex is valid")
});

/// A contiguous block of list items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlock {
    /// Item text with the bullet/number stripped, in order of appearance.
    pub items: Vec<String>,
}

impl ListBlock {
    /// Number of items found.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the block has at least `min_items` items.
    pub fn meets(&self, min_items: usize) -> bool {
        self.items.len() >= min_items
    }
}

/// Returns true if the line reads as a bullet or numbered list item.
pub fn is_list_item(line: &str) -> bool {
    LIST_ITEM_RE.is_match(line)
}

/// Collects every list-item line in the text, in order.
pub fn list_items(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            LIST_ITEM_RE
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .collect()
}

/// Finds the first contiguous run of list items anywhere in the text.
///
/// The run may follow an intro line; it ends at the first non-item line.
pub fn first_list_block(text: &str) -> Option<ListBlock> {
    let mut items = Vec::new();
    for line in text.lines() {
        if is_list_item(line) {
            if let Some(c) = LIST_ITEM_RE.captures(line).and_then(|c| c.get(1)) {
                items.push(c.as_str().trim().to_string());
            }
        } else if !items.is_empty() {
            break;
        }
    }
    if items.is_empty() {
        None
    } else {
        Some(ListBlock { items })
    }
}

/// Finds the list block anchored after a `Label:` line.
///
/// Returns `None` when the label itself is missing. When found, the block
/// spans the lines after the label up to the first blank line (leading blank
/// lines are skipped); non-item lines inside the block are ignored rather
/// than truncating the count, matching how real AI output interleaves notes
/// with items.
pub fn list_after_label(text: &str, label: &str) -> Option<ListBlock> {
    let anchor = heading_or_label(text, label)?;
    let lines: Vec<&str> = text.lines().collect();
    let mut items = Vec::new();
    let mut started = false;

    for line in lines.iter().skip(anchor.line_index + 1) {
        let blank = line.trim().is_empty();
        if blank {
            if started {
                break;
            }
            continue;
        }
        started = true;
        if let Some(c) = LIST_ITEM_RE.captures(line).and_then(|c| c.get(1)) {
            items.push(c.as_str().trim().to_string());
        }
    }

    Some(ListBlock { items })
}
