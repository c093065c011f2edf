//! Event loop of the desktop shell.
//!
//! Architecture:
//! - One `tao` event loop owns the [`App`] and therefore the only window.
//! - Native menu activations arrive from `muda` and are re-posted as
//!   [`UserEvent::MenuItem`] so they are handled on the loop thread.
//! - File requests from the page complete on a tokio runtime and come back
//!   as [`UserEvent::Reply`]; dialog/version/log requests are handled here.

use std::sync::{Arc, Mutex};

use muda::MenuEvent;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};

use crate::app::{App, MenuOutcome};
use crate::bridge::file_operations::FileOperations;
use crate::bridge::Bridge;
use crate::config::AppConfig;
use crate::types::message::{BridgeReply, UiMessage};
use crate::ui::desktop::{DesktopContext, DesktopPlatform, DesktopWindow, UserEvent};

fn forward_menu_events(proxy: EventLoopProxy<UserEvent>) {
    let proxy = Mutex::new(proxy);
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        if let Ok(proxy) = proxy.lock() {
            let _ = proxy.send_event(UserEvent::MenuItem(event.id.0.clone()));
        }
    }));
}

fn deliver_reply(app: &App<DesktopWindow>, reply: BridgeReply) {
    let id = reply.id;
    if let Err(e) = app.deliver(&UiMessage::Reply(reply)) {
        tracing::warn!(id, error = %e, "Reply not delivered");
    }
}

// ─── Main entry point ───

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let files = match &config.documents_dir {
        Some(dir) => FileOperations::with_base_dir(dir),
        None => FileOperations::new(),
    };

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();
    forward_menu_events(proxy.clone());

    let ctx = DesktopContext::new(
        proxy,
        runtime.handle().clone(),
        Arc::new(Bridge::new(files)),
        config.ui_dir.clone(),
        config.dev_tools,
    );

    let mut app: App<DesktopWindow> = App::new(config);
    app.startup(&DesktopPlatform::new(&event_loop, &ctx))?;

    event_loop.run(move |event, target, control_flow| {
        let _keep_alive = &runtime;
        *control_flow = ControlFlow::Wait;
        let platform = DesktopPlatform::new(target, &ctx);

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                app.window_closed();
                if app.should_quit() {
                    tracing::info!("Last window closed, exiting");
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::Reopen { .. } => {
                if let Err(e) = app.activate(&platform) {
                    tracing::error!(error = %e, "Failed to re-create window");
                }
            }

            Event::UserEvent(UserEvent::MenuItem(id)) => match app.handle_menu_item(&platform, &id) {
                Ok(MenuOutcome::Quit) => {
                    tracing::info!("Exit chosen from menu");
                    *control_flow = ControlFlow::Exit;
                }
                Ok(outcome) => tracing::debug!(?outcome, "Menu handled"),
                Err(e) => tracing::warn!(error = %e, "Menu event ignored"),
            },

            Event::UserEvent(UserEvent::Host { id, request }) => {
                if let Some(value) = app.handle_host_request(&platform, request) {
                    if let Some(id) = id {
                        deliver_reply(&app, BridgeReply::success(id, value));
                    }
                }
            }

            Event::UserEvent(UserEvent::Reply(reply)) => deliver_reply(&app, reply),

            Event::UserEvent(UserEvent::ReadyToShow) => app.ready_to_show(),

            _ => {}
        }
    });
}
