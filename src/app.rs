//! App Core for the mind map shell.
//!
//! Owns the window handle, the menu and the config, and implements the
//! window lifecycle plus everything the host answers on the event-loop
//! thread: menu activations and dialog/version/log requests from the UI.
//! The GUI toolkit is reached only through the [`PlatformServices`] passed
//! into each call.

use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::managers::menu_manager::{MenuManager, MenuManagerTrait, Resolved};
use crate::managers::window_manager::WindowManager;
use crate::platform::{self, PlatformServices, UiSurface};
use crate::bridge::protocol::HostRequest;
use crate::types::dialog::{DialogOptions, OpenDialogResult, SaveDialogResult};
use crate::types::errors::{MenuError, WindowError};
use crate::types::menu::{Accelerator, MenuAction, MenuCommand};
use crate::types::message::UiMessage;

/// Result of a menu activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The command was posted to the window.
    Sent(MenuCommand),
    /// No window was open to receive the command.
    Dropped(MenuCommand),
    /// The open dialog was canceled or failed; nothing was sent.
    Canceled,
    /// The user chose Exit.
    Quit,
}

pub struct App<W> {
    config: AppConfig,
    windows: WindowManager<W>,
    menu: MenuManager,
    shown: bool,
}

impl<W: UiSurface> App<W> {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            windows: WindowManager::new(),
            menu: MenuManager::default(),
            shown: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn menu(&self) -> &MenuManager {
        &self.menu
    }

    pub fn window(&self) -> Option<&W> {
        self.windows.current()
    }

    pub fn windows(&self) -> &WindowManager<W> {
        &self.windows
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Startup sequence: create the window, then install the menu.
    pub fn startup<P>(&mut self, platform: &P) -> Result<(), WindowError>
    where
        P: PlatformServices<Window = W>,
    {
        tracing::info!(version = Self::version(), dev = self.config.dev_tools, "Starting mind map shell");
        self.open_window(platform).map(|_| ())
    }

    /// Platform re-activation (dock icon click): re-create the window if none is live.
    pub fn activate<P>(&mut self, platform: &P) -> Result<bool, WindowError>
    where
        P: PlatformServices<Window = W>,
    {
        if self.windows.is_open() {
            return Ok(false);
        }
        tracing::info!("Re-activated without a window, creating one");
        self.open_window(platform)
    }

    fn open_window<P>(&mut self, platform: &P) -> Result<bool, WindowError>
    where
        P: PlatformServices<Window = W>,
    {
        let window_config = &self.config.window;
        let created = self
            .windows
            .open_with(|| platform.create_window(window_config))?;
        if created {
            self.shown = false;
            if let Some(window) = self.windows.current() {
                if let Err(e) = platform.show_menu(self.menu.template(), window) {
                    tracing::error!(error = %e, "Failed to install application menu");
                }
            }
        }
        Ok(created)
    }

    /// First finished page load: show the window and, with `--dev`, the dev tools.
    pub fn ready_to_show(&mut self) {
        if self.shown {
            return;
        }
        if let Some(window) = self.windows.current() {
            window.show();
            if self.config.dev_tools {
                window.open_dev_tools();
            }
            self.shown = true;
        }
    }

    pub fn window_closed(&mut self) {
        self.windows.on_closed();
        self.shown = false;
    }

    /// Whether the process should exit now that the window is gone.
    pub fn should_quit(&self) -> bool {
        !self.windows.is_open() && platform::quits_when_all_windows_closed()
    }

    /// Posts a message to the live window.
    pub fn deliver(&self, message: &UiMessage) -> Result<(), WindowError> {
        let window = self.windows.current().ok_or(WindowError::NoWindow)?;
        window.post(message)
    }

    /// Native menu activation by item id.
    pub fn handle_menu_item<P>(&mut self, platform: &P, id: &str) -> Result<MenuOutcome, MenuError>
    where
        P: PlatformServices<Window = W>,
    {
        let action = self.menu.action_for_id(id)?;
        Ok(self.dispatch_action(platform, action))
    }

    /// Keyboard accelerator activation. `None` when nothing is bound to it.
    pub fn handle_accelerator<P>(&mut self, platform: &P, accelerator: &Accelerator) -> Option<MenuOutcome>
    where
        P: PlatformServices<Window = W>,
    {
        let action = self.menu.action_for_accelerator(accelerator)?;
        Some(self.dispatch_action(platform, action))
    }

    fn dispatch_action<P>(&self, platform: &P, action: MenuAction) -> MenuOutcome
    where
        P: PlatformServices<Window = W>,
    {
        tracing::debug!(?action, "Menu action");
        match MenuManager::resolve(action) {
            Resolved::Send(command) => self.send_command(command),
            Resolved::Quit => MenuOutcome::Quit,
            Resolved::PickFileThenOpen => {
                let options = DialogOptions::menu_open();
                match platform.show_open_dialog(&options, self.windows.current()) {
                    Ok(result) if !result.canceled => match result.file_paths.into_iter().next() {
                        Some(path) => self.send_command(MenuCommand::Open(path)),
                        None => MenuOutcome::Canceled,
                    },
                    Ok(_) => MenuOutcome::Canceled,
                    Err(e) => {
                        tracing::error!(error = %e, "Open dialog error");
                        MenuOutcome::Canceled
                    }
                }
            }
        }
    }

    fn send_command(&self, command: MenuCommand) -> MenuOutcome {
        match self.deliver(&UiMessage::from(&command)) {
            Ok(()) => MenuOutcome::Sent(command),
            Err(e) => {
                tracing::warn!(channel = command.channel(), error = %e, "Menu command not delivered");
                MenuOutcome::Dropped(command)
            }
        }
    }

    /// Answers a host request from the UI. `None` for fire-and-forget requests.
    ///
    /// Dialog failures are logged and reported as a canceled result carrying
    /// the error text.
    pub fn handle_host_request<P>(&mut self, platform: &P, request: HostRequest) -> Option<Value>
    where
        P: PlatformServices<Window = W>,
    {
        match request {
            HostRequest::ShowSaveDialog => {
                let options = DialogOptions::save_mind_map();
                let result = platform
                    .show_save_dialog(&options, self.windows.current())
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "Save dialog error");
                        SaveDialogResult::failed(e)
                    });
                Some(json!(result))
            }
            HostRequest::ShowOpenDialog => {
                let options = DialogOptions::open_mind_map();
                let result = platform
                    .show_open_dialog(&options, self.windows.current())
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "Open dialog error");
                        OpenDialogResult::failed(e)
                    });
                Some(json!(result))
            }
            HostRequest::GetAppVersion => Some(json!(Self::version())),
            HostRequest::LogError(message) => {
                tracing::error!(message = %message, "Renderer error");
                None
            }
        }
    }
}
