// Mind map platform abstraction
// The window host talks to the GUI toolkit only through these traits, so the
// lifecycle and menu logic can run against the desktop toolkit or headless.

pub mod headless;

use std::path::PathBuf;

use crate::config::WindowConfig;
use crate::types::dialog::{DialogOptions, OpenDialogResult, SaveDialogResult};
use crate::types::errors::{DialogError, MenuError, WindowError};
use crate::types::menu::MenuTemplate;
use crate::types::message::UiMessage;

/// The UI surface living inside the top-level window.
pub trait UiSurface {
    /// Delivers a message into the UI. Fire-and-forget from the caller's view.
    fn post(&self, message: &UiMessage) -> Result<(), WindowError>;
    fn show(&self);
    fn open_dev_tools(&self);
}

/// Capabilities the window host needs from the GUI toolkit.
pub trait PlatformServices {
    type Window: UiSurface;

    fn create_window(&self, config: &WindowConfig) -> Result<Self::Window, WindowError>;
    fn show_menu(&self, template: &MenuTemplate, window: &Self::Window) -> Result<(), MenuError>;
    fn show_open_dialog(
        &self,
        options: &DialogOptions,
        parent: Option<&Self::Window>,
    ) -> Result<OpenDialogResult, DialogError>;
    fn show_save_dialog(
        &self,
        options: &DialogOptions,
        parent: Option<&Self::Window>,
    ) -> Result<SaveDialogResult, DialogError>;
}

/// Whether closing the last window should end the process.
///
/// macOS keeps the application alive until explicitly quit.
pub fn quits_when_all_windows_closed() -> bool {
    !cfg!(target_os = "macos")
}

/// Returns the platform-specific configuration directory for the app.
///
/// `$MINDMAP_CONFIG_DIR` overrides the default location.
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MINDMAP_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mindmap")
}
