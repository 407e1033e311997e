// ============================================================================
// Log Sanitization
// ============================================================================
//
// Promotional copy and marker ids come from upstream generation and are never
// logged raw. Document bodies go through `preview_for_log` and marker ids
// through `sanitize_ids_for_log` first: newlines, ANSI escapes and control
// characters are stripped and the value is truncated on a character boundary.
//
// ============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length (chars) for a logged id list
const MAX_LOG_LENGTH: usize = 200;

/// Maximum length (chars) for a logged content preview
const MAX_PREVIEW_LENGTH: usize = 80;

static ANSI_ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").unwrap());

fn clean(input: &str) -> String {
    let no_ansi = ANSI_ESCAPE_REGEX.replace_all(input, "");

    no_ansi
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

fn truncate_chars(value: String, max: usize) -> String {
    if value.chars().count() > max {
        let truncated: String = value.chars().take(max).collect();
        format!("{}...", truncated)
    } else {
        value
    }
}

/// Short single-line preview of a document body.
///
/// ```
/// use mlr_citations::utils::log_sanitizer::preview_for_log;
///
/// assert_eq!(preview_for_log("Effective\nINFO: forged"), "Effective INFO: forged");
/// assert_eq!(preview_for_log("test\x1b[31mred\x1b[0m"), "testred");
/// ```
pub fn preview_for_log(content: &str) -> String {
    let collapsed = clean(content)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(collapsed, MAX_PREVIEW_LENGTH)
}

/// Sanitize a list of identifiers into one comma-separated log value.
pub fn sanitize_ids_for_log<S: AsRef<str>>(ids: &[S]) -> String {
    let joined = ids.iter().map(|id| clean(id.as_ref())).collect::<Vec<_>>().join(",");
    truncate_chars(joined, MAX_LOG_LENGTH)
}
