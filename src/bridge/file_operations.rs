//! File operations exposed to the UI surface.
//!
//! Every operation validates its input before touching the disk, so a
//! rejected write never leaves a partial file behind. Failures are logged
//! here and handed back to the caller; `file_exists` never fails.

use std::path::{Path, PathBuf};

use crate::bridge::validation::{require_path, validate_json, validate_path};
use crate::types::errors::FileAccessError;

#[derive(Debug, Clone, Default)]
pub struct FileOperations {
    base_dir: Option<PathBuf>,
}

impl FileOperations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative paths are resolved against `base_dir` instead of the
    /// process working directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Reads a mind map document and returns its exact text.
    pub async fn read_file(&self, path: &str) -> Result<String, FileAccessError> {
        let result = self.read_checked(path).await;
        if let Err(e) = &result {
            tracing::error!(path, error = %e, "File read error");
        }
        result
    }

    async fn read_checked(&self, path: &str) -> Result<String, FileAccessError> {
        let full = self.resolve(validate_path(path)?);
        let data = tokio::fs::read_to_string(&full)
            .await
            .map_err(|source| FileAccessError::Io { path: full, source })?;
        validate_json(&data)?;
        Ok(data)
    }

    /// Writes a mind map document after all checks passed.
    pub async fn write_file(&self, path: &str, data: &str) -> Result<bool, FileAccessError> {
        let result = self.write_checked(path, data).await;
        if let Err(e) = &result {
            tracing::error!(path, error = %e, "File write error");
        }
        result
    }

    /// Variant taking an untyped payload, as received over the bridge.
    ///
    /// Checks run in order: path present, payload is a string, extension,
    /// JSON syntax.
    pub async fn write_value(
        &self,
        path: Option<&str>,
        data: &serde_json::Value,
    ) -> Result<bool, FileAccessError> {
        let checked = require_path(path).and_then(|p| {
            data.as_str()
                .map(|d| (p, d))
                .ok_or(FileAccessError::InvalidData)
        });
        match checked {
            Ok((p, d)) => self.write_file(p, d).await,
            Err(e) => {
                tracing::error!(path = path.unwrap_or_default(), error = %e, "File write error");
                Err(e)
            }
        }
    }

    async fn write_checked(&self, path: &str, data: &str) -> Result<bool, FileAccessError> {
        let full = self.resolve(validate_path(path)?);
        validate_json(data)?;
        tokio::fs::write(&full, data)
            .await
            .map_err(|source| FileAccessError::Io { path: full.clone(), source })?;
        tracing::debug!(path = %full.display(), bytes = data.len(), "Document written");
        Ok(true)
    }

    /// Reports whether anything exists at `path`. Errors resolve to `false`.
    pub async fn file_exists(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let full = self.resolve(Path::new(path));
        tokio::fs::try_exists(&full).await.unwrap_or(false)
    }
}
