//! Unit tests for the window lifecycle, menu dispatch and host requests,
//! run against a recording platform.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use serde_json::json;

use mindmap::app::{App, MenuOutcome};
use mindmap::bridge::protocol::HostRequest;
use mindmap::config::{AppConfig, CliArgs, WindowConfig};
use mindmap::platform::{self, PlatformServices, UiSurface};
use mindmap::types::dialog::{DialogOptions, OpenDialogResult, SaveDialogResult};
use mindmap::types::errors::{DialogError, MenuError, WindowError};
use mindmap::types::menu::{Accelerator, Key, MenuCommand, MenuTemplate};
use mindmap::types::message::UiMessage;

#[derive(Default)]
struct Log {
    posted: RefCell<Vec<UiMessage>>,
    shown: Cell<u32>,
    dev_tools: Cell<u32>,
}

struct FakeWindow {
    serial: u32,
    log: Rc<Log>,
}

impl UiSurface for FakeWindow {
    fn post(&self, message: &UiMessage) -> Result<(), WindowError> {
        self.log.posted.borrow_mut().push(message.clone());
        Ok(())
    }

    fn show(&self) {
        self.log.shown.set(self.log.shown.get() + 1);
    }

    fn open_dev_tools(&self) {
        self.log.dev_tools.set(self.log.dev_tools.get() + 1);
    }
}

#[derive(Default)]
struct FakePlatform {
    log: Rc<Log>,
    windows_created: Cell<u32>,
    menus_installed: Cell<u32>,
    fail_window: Cell<bool>,
    fail_menu: Cell<bool>,
    open_answer: RefCell<Option<Result<OpenDialogResult, String>>>,
    save_answer: RefCell<Option<Result<SaveDialogResult, String>>>,
    last_options: RefCell<Option<DialogOptions>>,
    last_title: RefCell<Option<String>>,
}

impl FakePlatform {
    fn answer_open(&self, answer: Result<OpenDialogResult, String>) {
        *self.open_answer.borrow_mut() = Some(answer);
    }

    fn answer_save(&self, answer: Result<SaveDialogResult, String>) {
        *self.save_answer.borrow_mut() = Some(answer);
    }

    fn posted(&self) -> Vec<UiMessage> {
        self.log.posted.borrow().clone()
    }
}

impl PlatformServices for FakePlatform {
    type Window = FakeWindow;

    fn create_window(&self, config: &WindowConfig) -> Result<FakeWindow, WindowError> {
        if self.fail_window.get() {
            return Err(WindowError::Creation("no display".to_string()));
        }
        self.windows_created.set(self.windows_created.get() + 1);
        *self.last_title.borrow_mut() = Some(config.title.clone());
        Ok(FakeWindow {
            serial: self.windows_created.get(),
            log: self.log.clone(),
        })
    }

    fn show_menu(&self, template: &MenuTemplate, _window: &FakeWindow) -> Result<(), MenuError> {
        if self.fail_menu.get() {
            return Err(MenuError::Build("menu bar unavailable".to_string()));
        }
        assert_eq!(template.submenus.len(), 3);
        self.menus_installed.set(self.menus_installed.get() + 1);
        Ok(())
    }

    fn show_open_dialog(
        &self,
        options: &DialogOptions,
        _parent: Option<&FakeWindow>,
    ) -> Result<OpenDialogResult, DialogError> {
        *self.last_options.borrow_mut() = Some(options.clone());
        match self.open_answer.borrow().clone() {
            Some(Ok(result)) => Ok(result),
            Some(Err(e)) => Err(DialogError::Failed(e)),
            None => Ok(OpenDialogResult::canceled()),
        }
    }

    fn show_save_dialog(
        &self,
        options: &DialogOptions,
        _parent: Option<&FakeWindow>,
    ) -> Result<SaveDialogResult, DialogError> {
        *self.last_options.borrow_mut() = Some(options.clone());
        match self.save_answer.borrow().clone() {
            Some(Ok(result)) => Ok(result),
            Some(Err(e)) => Err(DialogError::Failed(e)),
            None => Ok(SaveDialogResult::canceled()),
        }
    }
}

fn started(config: AppConfig) -> (App<FakeWindow>, FakePlatform) {
    let platform = FakePlatform::default();
    let mut app = App::new(config);
    app.startup(&platform).unwrap();
    (app, platform)
}

fn menu_message(channel: &str, payload: Option<&str>) -> UiMessage {
    UiMessage::Menu {
        channel: channel.to_string(),
        payload: payload.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Window lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_startup_creates_one_window_and_menu() {
    let (app, platform) = started(AppConfig::default());
    assert!(app.window().is_some());
    assert_eq!(platform.windows_created.get(), 1);
    assert_eq!(platform.menus_installed.get(), 1);
    assert_eq!(platform.last_title.borrow().as_deref(), Some("Mind Map"));
}

#[test]
fn test_startup_window_failure_propagates() {
    let platform = FakePlatform::default();
    platform.fail_window.set(true);
    let mut app: App<FakeWindow> = App::new(AppConfig::default());
    assert!(matches!(app.startup(&platform), Err(WindowError::Creation(_))));
    assert!(app.window().is_none());
}

#[test]
fn test_menu_failure_does_not_block_window() {
    let platform = FakePlatform::default();
    platform.fail_menu.set(true);
    let mut app: App<FakeWindow> = App::new(AppConfig::default());
    app.startup(&platform).unwrap();
    assert!(app.window().is_some());
}

#[test]
fn test_activate_with_live_window_is_noop() {
    let (mut app, platform) = started(AppConfig::default());
    assert!(!app.activate(&platform).unwrap());
    assert_eq!(platform.windows_created.get(), 1);
}

#[test]
fn test_activate_after_close_recreates_window() {
    let (mut app, platform) = started(AppConfig::default());
    app.window_closed();
    assert!(app.window().is_none());

    assert!(app.activate(&platform).unwrap());
    assert_eq!(platform.windows_created.get(), 2);
    assert_eq!(app.window().map(|w| w.serial), Some(2));
    assert_eq!(app.windows().created_count(), 2);
}

#[test]
fn test_at_most_one_window_across_activations() {
    let (mut app, platform) = started(AppConfig::default());
    for _ in 0..5 {
        app.activate(&platform).unwrap();
    }
    app.window_closed();
    app.activate(&platform).unwrap();
    app.activate(&platform).unwrap();
    assert_eq!(platform.windows_created.get(), 2);
}

#[test]
fn test_should_quit_follows_platform_policy() {
    let (mut app, _platform) = started(AppConfig::default());
    assert!(!app.should_quit());
    app.window_closed();
    assert_eq!(app.should_quit(), platform::quits_when_all_windows_closed());
}

#[test]
fn test_ready_to_show_shows_once() {
    let (mut app, platform) = started(AppConfig::default());
    app.ready_to_show();
    app.ready_to_show();
    assert_eq!(platform.log.shown.get(), 1);
    assert_eq!(platform.log.dev_tools.get(), 0);
}

#[test]
fn test_dev_flag_opens_dev_tools() {
    let config = AppConfig::default().with_cli(&CliArgs::parse(["--dev"]));
    let (mut app, platform) = started(config);
    app.ready_to_show();
    assert_eq!(platform.log.dev_tools.get(), 1);
}

#[test]
fn test_recreated_window_is_shown_again() {
    let (mut app, platform) = started(AppConfig::default());
    app.ready_to_show();
    app.window_closed();
    app.activate(&platform).unwrap();
    app.ready_to_show();
    assert_eq!(platform.log.shown.get(), 2);
}

#[test]
fn test_deliver_without_window() {
    let (mut app, _platform) = started(AppConfig::default());
    app.window_closed();
    let result = app.deliver(&menu_message("menu-new", None));
    assert!(matches!(result, Err(WindowError::NoWindow)));
}

// ---------------------------------------------------------------------------
// Menu dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_menu_item_forwards_command() {
    let (mut app, platform) = started(AppConfig::default());
    let outcome = app.handle_menu_item(&platform, "edit.undo").unwrap();
    assert_eq!(outcome, MenuOutcome::Sent(MenuCommand::Undo));
    assert_eq!(platform.posted(), vec![menu_message("menu-undo", None)]);
}

#[test]
fn test_unknown_menu_item_is_error() {
    let (mut app, platform) = started(AppConfig::default());
    assert!(app.handle_menu_item(&platform, "file.print").is_err());
    assert!(platform.posted().is_empty());
}

#[test]
fn test_exit_item_quits() {
    let (mut app, platform) = started(AppConfig::default());
    assert_eq!(app.handle_menu_item(&platform, "file.exit").unwrap(), MenuOutcome::Quit);
}

#[test]
fn test_menu_open_sends_first_picked_path() {
    let (mut app, platform) = started(AppConfig::default());
    platform.answer_open(Ok(OpenDialogResult {
        canceled: false,
        file_paths: vec![PathBuf::from("/maps/a.json"), PathBuf::from("/maps/b.json")],
        error: None,
    }));

    let outcome = app.handle_menu_item(&platform, "file.open").unwrap();
    assert_eq!(outcome, MenuOutcome::Sent(MenuCommand::Open(PathBuf::from("/maps/a.json"))));
    assert_eq!(platform.posted(), vec![menu_message("menu-open", Some("/maps/a.json"))]);
    assert_eq!(*platform.last_options.borrow(), Some(DialogOptions::menu_open()));
}

#[test]
fn test_menu_open_canceled_sends_nothing() {
    let (mut app, platform) = started(AppConfig::default());
    let outcome = app.handle_menu_item(&platform, "file.open").unwrap();
    assert_eq!(outcome, MenuOutcome::Canceled);
    assert!(platform.posted().is_empty());
}

#[test]
fn test_menu_open_dialog_error_sends_nothing() {
    let (mut app, platform) = started(AppConfig::default());
    platform.answer_open(Err("portal crashed".to_string()));
    let outcome = app.handle_menu_item(&platform, "file.open").unwrap();
    assert_eq!(outcome, MenuOutcome::Canceled);
    assert!(platform.posted().is_empty());
}

#[test]
fn test_accelerator_dispatch() {
    let (mut app, platform) = started(AppConfig::default());
    let outcome = app.handle_accelerator(&platform, &Accelerator::cmd_or_ctrl(Key::Digit0));
    assert_eq!(outcome, Some(MenuOutcome::Sent(MenuCommand::ZoomReset)));
    assert_eq!(app.handle_accelerator(&platform, &Accelerator::bare(Key::N)), None);
}

#[test]
fn test_menu_command_dropped_without_window() {
    let (mut app, platform) = started(AppConfig::default());
    app.window_closed();
    let outcome = app.handle_menu_item(&platform, "file.save").unwrap();
    assert_eq!(outcome, MenuOutcome::Dropped(MenuCommand::Save));
}

// ---------------------------------------------------------------------------
// Host requests
// ---------------------------------------------------------------------------

#[test]
fn test_save_dialog_result_passes_through() {
    let (mut app, platform) = started(AppConfig::default());
    platform.answer_save(Ok(SaveDialogResult::picked(PathBuf::from("/maps/new.json"))));

    let value = app.handle_host_request(&platform, HostRequest::ShowSaveDialog);
    assert_eq!(value, Some(json!({"canceled": false, "filePath": "/maps/new.json"})));

    let options = platform.last_options.borrow().clone().unwrap();
    assert_eq!(options.title.as_deref(), Some("Save Mind Map"));
    assert_eq!(options.default_path, Some(PathBuf::from("mindmap.json")));
    assert!(options.create_directory);
}

#[test]
fn test_save_dialog_error_becomes_canceled() {
    let (mut app, platform) = started(AppConfig::default());
    platform.answer_save(Err("no portal".to_string()));

    let value = app.handle_host_request(&platform, HostRequest::ShowSaveDialog);
    assert_eq!(
        value,
        Some(json!({"canceled": true, "error": "Dialog failed: no portal"}))
    );
}

#[test]
fn test_open_dialog_canceled_result() {
    let (mut app, platform) = started(AppConfig::default());
    let value = app.handle_host_request(&platform, HostRequest::ShowOpenDialog);
    assert_eq!(value, Some(json!({"canceled": true, "filePaths": []})));
    assert_eq!(*platform.last_options.borrow(), Some(DialogOptions::open_mind_map()));
}

#[test]
fn test_open_dialog_error_becomes_canceled() {
    let (mut app, platform) = started(AppConfig::default());
    platform.answer_open(Err("denied".to_string()));
    let value = app.handle_host_request(&platform, HostRequest::ShowOpenDialog).unwrap();
    assert_eq!(value["canceled"], json!(true));
    assert_eq!(value["filePaths"], json!([]));
    assert_eq!(value["error"], json!("Dialog failed: denied"));
}

#[test]
fn test_get_app_version() {
    let (mut app, platform) = started(AppConfig::default());
    let value = app.handle_host_request(&platform, HostRequest::GetAppVersion);
    assert_eq!(value, Some(json!(env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_log_error_has_no_reply() {
    let (mut app, platform) = started(AppConfig::default());
    let value = app.handle_host_request(&platform, HostRequest::LogError("boom".to_string()));
    assert_eq!(value, None);
    assert!(platform.posted().is_empty());
}
