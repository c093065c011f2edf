//! Desktop implementation of [`PlatformServices`] on `tao` + `wry` + `muda` + `rfd`.
//!
//! - The window is created hidden and shown on the first finished page load.
//! - The UI is served over the `mindmap://` custom protocol from `ui_dir`.
//! - `bridge.js` is injected into every page; IPC arrives via `window.ipc`.
//! - File requests run on the tokio runtime, everything else is forwarded to
//!   the event loop as a [`UserEvent`].

use std::borrow::Cow;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use muda::accelerator::{Accelerator as NativeAccelerator, Code, Modifiers};
use muda::{Menu, MenuItem, PredefinedMenuItem, Submenu};
use tao::dpi::LogicalSize;
use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder};
use wry::http::header::CONTENT_TYPE;
use wry::http::Response;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::bridge::protocol::{BridgeRequest, HostRequest, Invoke};
use crate::bridge::Bridge;
use crate::config::WindowConfig;
use crate::platform::{PlatformServices, UiSurface};
use crate::services::assets::{self, BRIDGE_JS, PROTOCOL};
use crate::types::dialog::{DialogOptions, OpenDialogResult, SaveDialogResult};
use crate::types::errors::{DialogError, MenuError, WindowError};
use crate::types::menu::{Accelerator, Key, MenuEntry, MenuTemplate, Modifier};
use crate::types::message::{BridgeReply, UiMessage};

#[derive(Debug)]
pub enum UserEvent {
    /// A native menu item (or its accelerator) was activated.
    MenuItem(String),
    /// A request the host answers on the event-loop thread.
    Host {
        id: Option<u64>,
        request: HostRequest,
    },
    /// A finished file request, to be posted back into the UI.
    Reply(BridgeReply),
    /// The page finished loading.
    ReadyToShow,
}

/// Custom-protocol URLs are served as `http://<scheme>.localhost` on Windows.
pub fn entry_url() -> String {
    if cfg!(target_os = "windows") {
        format!("http://{}.localhost/index.html", PROTOCOL)
    } else {
        assets::ENTRY_URL.to_string()
    }
}

fn is_internal_url(url: &str) -> bool {
    url.starts_with(&format!("{}://", PROTOCOL))
        || url.starts_with(&format!("http://{}.localhost", PROTOCOL))
}

pub struct DesktopWindow {
    // Declared first so the webview is dropped before its window.
    webview: WebView,
    window: Window,
}

impl DesktopWindow {
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl UiSurface for DesktopWindow {
    fn post(&self, message: &UiMessage) -> Result<(), WindowError> {
        let json =
            serde_json::to_string(message).map_err(|e| WindowError::Script(e.to_string()))?;
        let script = format!(
            "if(window.__mindmap_receive)window.__mindmap_receive({})",
            json
        );
        self.webview
            .evaluate_script(&script)
            .map_err(|e| WindowError::Script(e.to_string()))
    }

    fn show(&self) {
        self.window.set_visible(true);
        self.window.set_focus();
    }

    fn open_dev_tools(&self) {
        self.webview.open_devtools();
    }
}

/// State shared by every window the platform creates.
pub struct DesktopContext {
    proxy: EventLoopProxy<UserEvent>,
    runtime: tokio::runtime::Handle,
    bridge: Arc<Bridge>,
    ui_dir: PathBuf,
    dev_tools: bool,
    // The native menu must outlive the window it is attached to.
    menu: RefCell<Option<Menu>>,
}

impl DesktopContext {
    pub fn new(
        proxy: EventLoopProxy<UserEvent>,
        runtime: tokio::runtime::Handle,
        bridge: Arc<Bridge>,
        ui_dir: PathBuf,
        dev_tools: bool,
    ) -> Self {
        Self {
            proxy,
            runtime,
            bridge,
            ui_dir,
            dev_tools,
            menu: RefCell::new(None),
        }
    }
}

/// Short-lived view over the event loop target, built per event.
pub struct DesktopPlatform<'a> {
    target: &'a EventLoopWindowTarget<UserEvent>,
    ctx: &'a DesktopContext,
}

impl<'a> DesktopPlatform<'a> {
    pub fn new(target: &'a EventLoopWindowTarget<UserEvent>, ctx: &'a DesktopContext) -> Self {
        Self { target, ctx }
    }
}

fn serve_asset(root: &Path, request_path: &str) -> Response<Cow<'static, [u8]>> {
    let response = match assets::load(root, request_path) {
        Some(asset) => Response::builder()
            .header(CONTENT_TYPE, asset.mime)
            .body(asset.body),
        None => Response::builder()
            .status(404)
            .header(CONTENT_TYPE, "text/plain")
            .body(Cow::Borrowed(&b"not found"[..])),
    };
    response.unwrap_or_else(|_| Response::new(Cow::Borrowed(&[][..])))
}

/// Routes one IPC message from the page.
fn route_ipc(
    body: &str,
    proxy: &EventLoopProxy<UserEvent>,
    runtime: &tokio::runtime::Handle,
    bridge: &Arc<Bridge>,
) {
    tracing::trace!(body = %body.chars().take(200).collect::<String>(), "IPC");
    match Invoke::parse(body) {
        Ok(Invoke {
            id,
            request: BridgeRequest::File(request),
        }) => {
            let id = id.unwrap_or_default();
            let bridge = bridge.clone();
            let proxy = proxy.clone();
            runtime.spawn(async move {
                let reply = bridge.handle_file_request(id, request).await;
                let _ = proxy.send_event(UserEvent::Reply(reply));
            });
        }
        Ok(Invoke {
            id,
            request: BridgeRequest::Host(request),
        }) => {
            let _ = proxy.send_event(UserEvent::Host { id, request });
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected bridge message");
            let id = serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("id").and_then(|id| id.as_u64()));
            if let Some(id) = id {
                let _ = proxy.send_event(UserEvent::Reply(BridgeReply::failure(id, e)));
            }
        }
    }
}

fn native_accelerator(accelerator: &Accelerator) -> NativeAccelerator {
    let modifiers = accelerator.modifier.map(|m| match m {
        Modifier::CmdOrCtrl if cfg!(target_os = "macos") => Modifiers::SUPER,
        Modifier::CmdOrCtrl => Modifiers::CONTROL,
    });
    let code = match accelerator.key {
        Key::N => Code::KeyN,
        Key::O => Code::KeyO,
        Key::S => Code::KeyS,
        Key::Z => Code::KeyZ,
        Key::Y => Code::KeyY,
        Key::Delete => Code::Delete,
        Key::Plus => Code::Equal,
        Key::Minus => Code::Minus,
        Key::Digit0 => Code::Digit0,
    };
    NativeAccelerator::new(modifiers, code)
}

fn build_native_menu(template: &MenuTemplate) -> Result<Menu, MenuError> {
    let build = |e: muda::Error| MenuError::Build(e.to_string());
    let menu = Menu::new();

    #[cfg(target_os = "macos")]
    {
        let app_menu = Submenu::new("Mind Map", true);
        app_menu
            .append_items(&[
                &PredefinedMenuItem::about(None, None),
                &PredefinedMenuItem::separator(),
                &PredefinedMenuItem::quit(None),
            ])
            .map_err(build)?;
        menu.append(&app_menu).map_err(build)?;
    }

    for submenu in &template.submenus {
        let native = Submenu::new(&submenu.label, true);
        for entry in &submenu.entries {
            match entry {
                MenuEntry::Item(item) => {
                    let native_item = MenuItem::with_id(
                        item.action.id(),
                        &item.label,
                        true,
                        item.accelerator.as_ref().map(native_accelerator),
                    );
                    native.append(&native_item).map_err(build)?;
                }
                MenuEntry::Separator => {
                    native
                        .append(&PredefinedMenuItem::separator())
                        .map_err(build)?;
                }
            }
        }
        menu.append(&native).map_err(build)?;
    }
    Ok(menu)
}

fn file_dialog(options: &DialogOptions, parent: Option<&DesktopWindow>) -> rfd::FileDialog {
    let mut dialog = rfd::FileDialog::new();
    if let Some(title) = &options.title {
        dialog = dialog.set_title(title.as_str());
    }
    for filter in &options.filters {
        dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
    }
    if let Some(default) = &options.default_path {
        dialog = dialog.set_file_name(default.to_string_lossy());
    }
    dialog = dialog.set_can_create_directories(options.create_directory);
    if let Some(parent) = parent {
        dialog = dialog.set_parent(&parent.window);
    }
    dialog
}

impl<'a> PlatformServices for DesktopPlatform<'a> {
    type Window = DesktopWindow;

    fn create_window(&self, config: &WindowConfig) -> Result<DesktopWindow, WindowError> {
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_min_inner_size(LogicalSize::new(config.min_width, config.min_height))
            .with_visible(false)
            .build(self.target)
            .map_err(|e| WindowError::Creation(e.to_string()))?;

        let ui_dir = self.ctx.ui_dir.clone();
        let ipc_proxy = self.ctx.proxy.clone();
        let load_proxy = self.ctx.proxy.clone();
        let runtime = self.ctx.runtime.clone();
        let bridge = self.ctx.bridge.clone();

        let builder = WebViewBuilder::new()
            .with_custom_protocol(PROTOCOL.into(), move |_wv_id, request| {
                serve_asset(&ui_dir, request.uri().path())
            })
            .with_initialization_script(BRIDGE_JS)
            .with_url(entry_url())
            .with_ipc_handler(move |msg: wry::http::Request<String>| {
                route_ipc(msg.body(), &ipc_proxy, &runtime, &bridge);
            })
            .with_on_page_load_handler(move |event, _url| {
                if let PageLoadEvent::Finished = event {
                    let _ = load_proxy.send_event(UserEvent::ReadyToShow);
                }
            })
            .with_navigation_handler(|url| {
                let allowed = is_internal_url(&url);
                if !allowed {
                    tracing::warn!(url = %url, "Blocked navigation away from the UI");
                }
                allowed
            })
            .with_devtools(self.ctx.dev_tools);

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = window
                .default_vbox()
                .ok_or_else(|| WindowError::Creation("missing GTK vbox".to_string()))?;
            builder
                .build_gtk(vbox)
                .map_err(|e| WindowError::Creation(e.to_string()))?
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder
            .build(&window)
            .map_err(|e| WindowError::Creation(e.to_string()))?;

        tracing::info!(title = %config.title, "Window created");
        Ok(DesktopWindow { webview, window })
    }

    fn show_menu(&self, template: &MenuTemplate, window: &DesktopWindow) -> Result<(), MenuError> {
        let menu = build_native_menu(template)?;

        #[cfg(target_os = "linux")]
        {
            use tao::platform::unix::WindowExtUnix;
            menu.init_for_gtk_window(window.window.gtk_window(), window.window.default_vbox())
                .map_err(|e| MenuError::Build(e.to_string()))?;
        }

        #[cfg(target_os = "windows")]
        {
            use tao::platform::windows::WindowExtWindows;
            unsafe { menu.init_for_hwnd(window.window.hwnd() as _) }
                .map_err(|e| MenuError::Build(e.to_string()))?;
        }

        #[cfg(target_os = "macos")]
        {
            let _ = window;
            menu.init_for_nsapp();
        }

        *self.ctx.menu.borrow_mut() = Some(menu);
        Ok(())
    }

    fn show_open_dialog(
        &self,
        options: &DialogOptions,
        parent: Option<&DesktopWindow>,
    ) -> Result<OpenDialogResult, DialogError> {
        Ok(match file_dialog(options, parent).pick_file() {
            Some(path) => OpenDialogResult::picked(path),
            None => OpenDialogResult::canceled(),
        })
    }

    fn show_save_dialog(
        &self,
        options: &DialogOptions,
        parent: Option<&DesktopWindow>,
    ) -> Result<SaveDialogResult, DialogError> {
        Ok(match file_dialog(options, parent).save_file() {
            Some(path) => SaveDialogResult::picked(path),
            None => SaveDialogResult::canceled(),
        })
    }
}
