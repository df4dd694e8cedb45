//! Pattern library - reusable matchers over free-form AI response text.
//!
//! Every matcher is a pure, deterministic text scan: no I/O, no state, and
//! no failure mode for "weird but parseable" input. Matching is tolerant of
//! markdown decoration (headings, emphasis, quoting) and case-insensitive
//! on label names.

mod block;
mod group;
mod label;
mod list;

pub use block::{content_block, BlockMatch, MEANINGFUL_LINE_MIN_CHARS, MIN_SECTION_CHARS};
pub use group::{labeled_group, FieldSpec, GroupMatch};
pub use label::{heading_or_label, LabelMatch};
pub use list::{first_list_block, is_list_item, list_after_label, list_items, ListBlock};
