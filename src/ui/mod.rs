//! Desktop UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The mind map itself is rendered by HTML/JS inside the WebView. Native menus
//! come from `muda`, file dialogs from `rfd`.

pub mod desktop;
pub mod webview_app;
