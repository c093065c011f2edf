//! Serving the rendering-side UI to the webview.
//!
//! Files come from the configured UI directory over the `mindmap://`
//! protocol. Requests that try to leave that directory are refused. When the
//! directory has no `index.html`, a bundled placeholder page is served so the
//! bridge can still be exercised.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

pub const PROTOCOL: &str = "mindmap";
pub const ENTRY_URL: &str = "mindmap://localhost/index.html";
pub const BRIDGE_JS: &str = include_str!("../../resources/ui/bridge.js");

const PLACEHOLDER_HTML: &str = include_str!("../../resources/ui/index.html");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub mime: &'static str,
    pub body: Cow<'static, [u8]>,
}

pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// Maps a request path to a file under `root`.
///
/// Only plain relative components are accepted; `..`, roots and prefixes
/// are refused.
pub fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let relative = if trimmed.is_empty() { "index.html" } else { trimmed };

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

/// Loads the asset for `request_path`, or `None` when it cannot be served.
pub fn load(root: &Path, request_path: &str) -> Option<Asset> {
    let path = resolve_path(root, request_path)?;
    match std::fs::read(&path) {
        Ok(bytes) => Some(Asset {
            mime: mime_for(&path),
            body: Cow::Owned(bytes),
        }),
        Err(_) if path.file_name().map(|n| n == "index.html").unwrap_or(false) => {
            tracing::warn!(path = %path.display(), "UI entry not found, serving placeholder");
            Some(Asset {
                mime: "text/html; charset=utf-8",
                body: Cow::Borrowed(PLACEHOLDER_HTML.as_bytes()),
            })
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Asset not found");
            None
        }
    }
}
