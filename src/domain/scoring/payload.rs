//! Recovery of the judge's JSON payload from a free-form reply.
//!
//! Judge models rarely honor "Return ONLY json" perfectly: the payload
//! arrives bare, fenced in a markdown code block, or buried in prose.
//! Extraction tries each shape in order and reports which one matched.

use serde_json::Value;

/// How the JSON object was recovered from the raw reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMethod {
    /// The whole reply parsed as a JSON object.
    Direct,
    /// The object sat inside a ``` code fence.
    CodeFence,
    /// The object was cut out of surrounding prose by brace matching.
    BalancedBraces,
}

/// Extracts the first JSON object from a judge reply, if any.
pub fn extract_object(raw: &str) -> Option<(Value, ParseMethod)> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_object() {
            return Some((value, ParseMethod::Direct));
        }
    }

    if let Some(inner) = from_code_fence(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(&inner) {
            if value.is_object() {
                return Some((value, ParseMethod::CodeFence));
            }
        }
    }

    if let Some(candidate) = balanced_object(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            if value.is_object() {
                return Some((value, ParseMethod::BalancedBraces));
            }
        }
    }

    None
}

/// The content of the first ``` fence, with or without a `json` label.
fn from_code_fence(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];
    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let inner_start = start + pattern.len();
            if let Some(end) = s[inner_start..].find("```") {
                return Some(s[inner_start..inner_start + end].trim().to_string());
            }
        }
    }
    None
}

/// The first brace-balanced `{...}` span, tracked outside string literals.
fn balanced_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
