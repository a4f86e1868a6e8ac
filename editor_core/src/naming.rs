//! File-name helpers used when naming, validating and backing up documents.

use crate::error::{EditorError, Result};
use chrono::{DateTime, Local};

/// Characters that are rejected in file names.
const INVALID_CHARS: [char; 9] = ['<', '>', ':', '"', '|', '?', '*', '\\', '/'];

/// Returns the lowercased text after the last `.`, or an empty string.
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Returns the text before the last `.`, or the whole name if there is none.
pub fn file_stem(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name)
}

/// Maps a file extension to a MIME type. Unknown extensions are plain text.
pub fn mime_type(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "txt" => "text/plain",
        "kt" => "text/x-kotlin",
        "java" => "text/x-java-source",
        "xml" => "text/xml",
        "json" => "application/json",
        "md" => "text/markdown",
        "html" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "py" => "text/x-python",
        "cpp" => "text/x-c++src",
        "c" => "text/x-csrc",
        "h" => "text/x-chdr",
        "hpp" => "text/x-c++hdr",
        "sql" => "text/x-sql",
        "sh" => "text/x-sh",
        "yml" | "yaml" => "text/x-yaml",
        _ => "text/plain",
    }
}

/// Returns true if the name contains none of the reserved characters.
pub fn is_valid_file_name(file_name: &str) -> bool {
    !file_name.chars().any(|c| INVALID_CHARS.contains(&c))
}

/// Checks a file name, reporting the offending name on failure.
pub fn validate_file_name(file_name: &str) -> Result<()> {
    if is_valid_file_name(file_name) {
        Ok(())
    } else {
        Err(EditorError::InvalidFileName(file_name.to_string()))
    }
}

/// Replaces every reserved character with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Builds a timestamped backup name, e.g. `notes_backup_20240131_094500.txt`.
pub fn backup_file_name(original_name: &str, at: DateTime<Local>) -> String {
    format!(
        "{}_backup_{}.{}",
        file_stem(original_name),
        at.format("%Y%m%d_%H%M%S"),
        file_extension(original_name)
    )
}

/// Formats a timestamp for display, e.g. `Jan 31, 2024 09:45`.
pub fn format_date_time(at: DateTime<Local>) -> String {
    at.format("%b %d, %Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 31, 9, 45, 0).unwrap()
    }

    #[test]
    fn test_extension_and_stem() {
        assert_eq!(file_extension("notes.TXT"), "txt");
        assert_eq!(file_stem("notes.TXT"), "notes");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_stem("README"), "README");
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("md"), "text/markdown");
        assert_eq!(mime_type("JSON"), "application/json");
        assert_eq!(mime_type("yaml"), "text/x-yaml");
        assert_eq!(mime_type("bin"), "text/plain");
        assert_eq!(mime_type(""), "text/plain");
    }

    #[test]
    fn test_validation() {
        assert!(is_valid_file_name("draft 2.txt"));
        assert!(!is_valid_file_name("a/b.txt"));
        assert!(validate_file_name("ok.md").is_ok());
        assert!(matches!(
            validate_file_name("what?.md"),
            Err(EditorError::InvalidFileName(name)) if name == "what?.md"
        ));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_file_name("a<b>:c\"d|e?f*g\\h/i"), "a_b__c_d_e_f_g_h_i");
        assert_eq!(sanitize_file_name("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_backup_name() {
        assert_eq!(
            backup_file_name("notes.txt", sample_time()),
            "notes_backup_20240131_094500.txt"
        );
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time(sample_time()), "Jan 31, 2024 09:45");
    }
}
