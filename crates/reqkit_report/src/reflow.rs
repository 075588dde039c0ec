//! Free-text cleanup and word-count reflow.

use serde_json::Value;

use crate::conf::{C_COL_JUSTIFICATION, C_COL_JUSTIFICATION_RAW};
use crate::spec::SpecRecordTable;

/// Drop a leading `label - sublabel:` prefix.
///
/// Applies only when a hyphen occurs before the last colon; the remainder
/// is trimmed. Other text is returned as is.
pub fn strip_label_prefix(text: &str) -> String {
    match text.rfind(':') {
        Some(n_pos) if text[..n_pos].contains('-') => text[n_pos + 1..].trim().to_string(),
        _ => text.to_string(),
    }
}

/// Re-wrap text into lines of at most `n_words_max` words.
///
/// Text with no more words than the limit is returned unchanged, so the
/// transform is idempotent.
pub fn reflow_words(text: &str, n_words_max: usize) -> String {
    let l_words: Vec<&str> = text.split_whitespace().collect();
    if n_words_max == 0 || l_words.len() <= n_words_max {
        return text.to_string();
    }
    l_words
        .chunks(n_words_max)
        .map(|l_line| l_line.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip the label prefix then reflow; non-text values pass through.
pub fn reflow_justification(value: &Value, n_words_max: usize) -> Value {
    match value {
        Value::String(text) => Value::String(reflow_words(&strip_label_prefix(text), n_words_max)),
        other => other.clone(),
    }
}

/// Normalize the justification column name and reflow its values in place.
///
/// Returns whether the table carries a justification column.
pub fn apply_justification_reflow(table: &mut SpecRecordTable, n_words_max: usize) -> bool {
    if !table.has_column(C_COL_JUSTIFICATION) {
        table.rename_column(C_COL_JUSTIFICATION_RAW, C_COL_JUSTIFICATION);
    }
    if !table.has_column(C_COL_JUSTIFICATION) {
        return false;
    }
    for record in &mut table.records {
        if let Some(value) = record.get_mut(C_COL_JUSTIFICATION) {
            *value = reflow_justification(value, n_words_max);
        }
    }
    true
}
