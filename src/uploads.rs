//! Filename handling for uploaded and generated files.

use unicode_normalization::UnicodeNormalization;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pptx"];

/// Reduce a user-supplied filename to a safe single path component.
///
/// NFKD-normalizes and drops non-ASCII, turns path separators and whitespace
/// runs into `_`, removes anything outside `[A-Za-z0-9_.-]`, and trims
/// leading/trailing `.` and `_`. May return an empty string.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Extension check, case-insensitive, on the name as uploaded.
pub fn allowed_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Name of the report generated from a (sanitized) upload name.
pub fn report_file_name(upload_name: &str) -> String {
    format!("Final_Report_{}.docx", secure_filename(upload_name))
}
