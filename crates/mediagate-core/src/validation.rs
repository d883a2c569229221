//! Filename validation and sanitization.

use crate::AppError;

/// Sanitize a user-supplied filename to prevent path traversal and invalid
/// characters. Directory components are stripped, traversal sequences are
/// rejected, and anything outside a safe character set is replaced with `_`.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    // Normalize path separators before taking the final component so that
    // backslash-separated traversal is caught on every platform.
    let normalized = filename.replace('\\', "/");
    let filename_only = normalized.rsplit('/').next().unwrap_or(&normalized);

    if filename_only.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(|c| c == '_' || c == '.').is_empty() {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}
