// Headless platform: no native window, menu or dialogs.
// Messages posted to the UI surface are written as JSON lines to a shared
// sink, which is how the stdio bridge server talks to its peer.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::config::WindowConfig;
use crate::platform::{PlatformServices, UiSurface};
use crate::types::dialog::{DialogOptions, OpenDialogResult, SaveDialogResult};
use crate::types::errors::{DialogError, MenuError, WindowError};
use crate::types::menu::MenuTemplate;
use crate::types::message::UiMessage;

pub type Sink = Arc<Mutex<dyn Write + Send>>;

pub struct HeadlessWindow {
    title: String,
    sink: Sink,
}

impl HeadlessWindow {
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl UiSurface for HeadlessWindow {
    fn post(&self, message: &UiMessage) -> Result<(), WindowError> {
        let line =
            serde_json::to_string(message).map_err(|e| WindowError::Script(e.to_string()))?;
        let mut out = self
            .sink
            .lock()
            .map_err(|e| WindowError::Script(e.to_string()))?;
        writeln!(out, "{}", line).map_err(|e| WindowError::Script(e.to_string()))?;
        out.flush().map_err(|e| WindowError::Script(e.to_string()))
    }

    fn show(&self) {
        tracing::debug!(title = %self.title, "Headless window shown");
    }

    fn open_dev_tools(&self) {
        tracing::debug!("Developer tools are not available headless");
    }
}

pub struct HeadlessPlatform {
    sink: Sink,
}

impl HeadlessPlatform {
    pub fn new(sink: Sink) -> Self {
        Self { sink }
    }

    pub fn stdout() -> Self {
        Self::new(Arc::new(Mutex::new(std::io::stdout())))
    }
}

impl PlatformServices for HeadlessPlatform {
    type Window = HeadlessWindow;

    fn create_window(&self, config: &WindowConfig) -> Result<HeadlessWindow, WindowError> {
        Ok(HeadlessWindow {
            title: config.title.clone(),
            sink: self.sink.clone(),
        })
    }

    fn show_menu(&self, template: &MenuTemplate, _window: &HeadlessWindow) -> Result<(), MenuError> {
        tracing::debug!(items = template.items().count(), "Menu not rendered headless");
        Ok(())
    }

    fn show_open_dialog(
        &self,
        _options: &DialogOptions,
        _parent: Option<&HeadlessWindow>,
    ) -> Result<OpenDialogResult, DialogError> {
        Err(DialogError::Unavailable("no native dialogs in headless mode".to_string()))
    }

    fn show_save_dialog(
        &self,
        _options: &DialogOptions,
        _parent: Option<&HeadlessWindow>,
    ) -> Result<SaveDialogResult, DialogError> {
        Err(DialogError::Unavailable("no native dialogs in headless mode".to_string()))
    }
}
