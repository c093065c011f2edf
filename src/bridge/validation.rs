//! Input checks shared by every file operation the UI can reach.

use std::path::Path;

use serde::de::IgnoredAny;

use crate::types::errors::FileAccessError;

/// Extension (without the dot) every mind map document must carry.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Rejects missing or empty paths.
pub fn require_path(path: Option<&str>) -> Result<&str, FileAccessError> {
    match path {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(FileAccessError::InvalidPath),
    }
}

/// Case-insensitive `.json` check. A bare dotfile like `.json` has no extension.
pub fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        .unwrap_or(false)
}

/// Full path check: non-empty and carrying the document extension.
pub fn validate_path(path: &str) -> Result<&Path, FileAccessError> {
    let path = Path::new(require_path(Some(path))?);
    if !has_document_extension(path) {
        return Err(FileAccessError::UnsupportedExtension(path.to_path_buf()));
    }
    Ok(path)
}

/// Syntactic JSON check. The document's schema is never inspected.
pub fn validate_json(data: &str) -> Result<(), FileAccessError> {
    serde_json::from_str::<IgnoredAny>(data)
        .map(|_| ())
        .map_err(|e| FileAccessError::InvalidJson(e.to_string()))
}
