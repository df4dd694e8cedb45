//! Repeated labeled-record matching (e.g. Pattern N / Evidence / Confidence).

use regex::Regex;

use super::label::label_regex;

/// A required field inside a labeled record.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec<'a> {
    /// Field label, matched as a labeled line with content.
    pub name: &'a str,
    /// When set, the field value must start with one of these (case-insensitive).
    pub allowed_values: Option<&'a [&'a str]>,
}

impl<'a> FieldSpec<'a> {
    /// A field accepting any non-empty value.
    pub fn any(name: &'a str) -> Self {
        Self {
            name,
            allowed_values: None,
        }
    }

    /// A field whose value must start with one of the given options.
    pub fn one_of(name: &'a str, allowed: &'a [&'a str]) -> Self {
        Self {
            name,
            allowed_values: Some(allowed),
        }
    }
}

/// Result of scanning for labeled records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatch {
    /// Number of anchor lines found (`Pattern 1:`, `Pattern 2:`, ...).
    pub anchors: usize,
    /// Number of anchors whose required fields were all present in-window.
    pub complete: usize,
}

impl GroupMatch {
    /// Returns true if at least `min_records` complete records were found.
    pub fn meets(&self, min_records: usize) -> bool {
        self.complete >= min_records
    }
}

/// Counts complete labeled records in the text.
///
/// A record starts at a numbered anchor line (`{anchor} N:`) and is complete
/// when every field in `fields` appears as a labeled line with content within
/// `window` lines below the anchor (and before the next anchor). Field order
/// within the window does not matter.
pub fn labeled_group(text: &str, anchor: &str, fields: &[FieldSpec<'_>], window: usize) -> GroupMatch {
    let anchor_re = numbered_anchor_regex(anchor);
    let field_res: Vec<(Regex, Option<&[&str]>)> = fields
        .iter()
        .map(|f| (label_regex(f.name, true), f.allowed_values))
        .collect();

    let lines: Vec<&str> = text.lines().collect();
    let anchor_lines: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| anchor_re.is_match(line))
        .map(|(i, _)| i)
        .collect();

    let mut complete = 0;
    for (idx, &start) in anchor_lines.iter().enumerate() {
        let hard_stop = anchor_lines
            .get(idx + 1)
            .copied()
            .unwrap_or(lines.len())
            .min(start + window + 1);

        let record_complete = field_res.iter().all(|(re, allowed)| {
            lines[start + 1..hard_stop]
                .iter()
                .any(|line| field_line_matches(re, *allowed, line))
        });
        if record_complete {
            complete += 1;
        }
    }

    GroupMatch {
        anchors: anchor_lines.len(),
        complete,
    }
}

fn field_line_matches(re: &Regex, allowed: Option<&[&str]>, line: &str) -> bool {
    let Some(caps) = re.captures(line) else {
        return false;
    };
    let value = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if value.is_empty() {
        return false;
    }
    match allowed {
        None => true,
        Some(options) => options
            .iter()
            .any(|opt| value.to_ascii_lowercase().starts_with(&opt.to_ascii_lowercase())),
    }
}

// The anchor must name its record: a bare `Pattern 1:` does not count.
fn numbered_anchor_regex(anchor: &str) -> Regex {
    let pattern = format!(
        r"(?i)^\s*(?:[#>*_`~-]+\s*)*(?:\*\*|__)?\s*{}\s*\d+\s*(?:\*\*|__)?\s*[:\-\x{{2013}}\x{{2014}}]\s*(?:\*\*|__)?[ \t]*(\S.*)$",
        regex::escape(anchor),
    );
    Regex::new(&pattern).unwrap_or_else(|_| Regex::new("$^").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIDENCE: &[&str] = &["High", "Medium", "Low"];

    fn pattern_fields() -> Vec<FieldSpec<'static>> {
        vec![FieldSpec::any("Evidence"), FieldSpec::one_of("Confidence", CONFIDENCE)]
    }

    #[test]
    fn counts_two_complete_records() {
        let text = "Pattern 1: tool hopping\nEvidence: three abandoned repos\nConfidence: High\n\n\
                    Pattern 2: night energy\nEvidence: commits after 11pm\nConfidence: Medium";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 6);
        assert_eq!(m.anchors, 2);
        assert_eq!(m.complete, 2);
        assert!(m.meets(2));
    }

    #[test]
    fn record_missing_a_field_is_incomplete() {
        let text = "Pattern 1: tool hopping\nEvidence: three abandoned repos\nConfidence: High\n\n\
                    Pattern 2: night energy\nEvidence: commits after 11pm";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 6);
        assert_eq!(m.anchors, 2);
        assert_eq!(m.complete, 1);
        assert!(!m.meets(2));
    }

    #[test]
    fn constrained_value_must_match() {
        let text = "Pattern 1: tool hopping\nEvidence: repos\nConfidence: absolutely";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 6);
        assert_eq!(m.complete, 0);
    }

    #[test]
    fn constrained_value_is_case_insensitive_prefix() {
        let text = "Pattern 1: tool hopping\nEvidence: repos\nConfidence: high (gut feel)";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 6);
        assert_eq!(m.complete, 1);
    }

    #[test]
    fn fields_beyond_window_do_not_count() {
        let text = "Pattern 1: drift\nEvidence: logs\nfiller\nfiller\nfiller\nfiller\nfiller\nConfidence: High";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 3);
        assert_eq!(m.complete, 0);
    }

    #[test]
    fn fields_after_next_anchor_belong_to_that_record() {
        let text = "Pattern 1: drift\nEvidence: logs\nPattern 2: focus\nConfidence: High\nEvidence: notes";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 6);
        // Record 1 has no Confidence before Pattern 2; record 2 has both.
        assert_eq!(m.anchors, 2);
        assert_eq!(m.complete, 1);
    }

    #[test]
    fn bold_decorated_records_match() {
        let text = "**Pattern 1:** tool hopping\n**Evidence:** repos\n**Confidence:** Low";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 6);
        assert_eq!(m.complete, 1);
    }

    #[test]
    fn nameless_anchor_is_not_a_record() {
        let text = "Pattern 1:\nEvidence: logs\nConfidence: High";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 6);
        assert_eq!(m.anchors, 0);
        assert_eq!(m.complete, 0);
    }

    #[test]
    fn unnumbered_anchor_is_not_a_record() {
        let text = "Pattern: general drift\nEvidence: logs\nConfidence: High";
        let m = labeled_group(text, "Pattern", &pattern_fields(), 6);
        assert_eq!(m.anchors, 0);
        assert_eq!(m.complete, 0);
    }
}
