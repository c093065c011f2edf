use std::path::PathBuf;

use thiserror::Error;

// === FileAccessError ===

/// Errors raised by the file operations exposed to the UI.
#[derive(Debug, Error)]
pub enum FileAccessError {
    /// The path was missing, empty, or not a string.
    #[error("Invalid file path")]
    InvalidPath,
    /// The payload to write was not a string.
    #[error("Data must be a string")]
    InvalidData,
    /// The path does not carry a `.json` extension.
    #[error("Only JSON files are allowed: {}", .0.display())]
    UnsupportedExtension(PathBuf),
    /// The content is not syntactically valid JSON.
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    /// The underlying read or write failed.
    #[error("File I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// === DialogError ===

/// Errors related to native file dialogs.
#[derive(Debug, Error)]
pub enum DialogError {
    /// No dialog implementation is available on this platform surface.
    #[error("Dialog unavailable: {0}")]
    Unavailable(String),
    /// The dialog could not be shown.
    #[error("Dialog failed: {0}")]
    Failed(String),
}

// === WindowError ===

/// Errors related to the top-level window and its UI surface.
#[derive(Debug, Error)]
pub enum WindowError {
    /// Creating the window or its webview failed.
    #[error("Window creation failed: {0}")]
    Creation(String),
    /// Delivering a script or message into the UI surface failed.
    #[error("UI script error: {0}")]
    Script(String),
    /// No window is currently open.
    #[error("No window is open")]
    NoWindow,
}

// === MenuError ===

/// Errors related to building or dispatching the application menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The native menu could not be built or installed.
    #[error("Menu build failed: {0}")]
    Build(String),
    /// A menu event referenced an item id that is not in the template.
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),
}

// === ConfigError ===

/// Errors related to loading or saving the application config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for `AppConfig`.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// === BridgeError ===

/// Errors surfaced to the UI through a bridge reply.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    File(#[from] FileAccessError),
    /// The request could not be decoded.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    /// Too many requests in the current window.
    #[error("Rate limit exceeded")]
    RateLimited,
}
