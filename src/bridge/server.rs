//! Line-oriented bridge server driving the bridge with the headless platform.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "cmd":"read-file", "path":"/maps/a.json"}
//! Response: {"kind":"reply","id":1,"ok":true,"result":"..."}
//!           {"kind":"reply","id":1,"ok":false,"error":"..."}
//!
//! Undecodable lines are answered with `"id": null` unless an id can still be
//! read from them. Every line written goes to the same sink, so replies and
//! menu messages never interleave mid-line.

use std::time::Instant;

use serde_json::{json, Value};

use crate::app::App;
use crate::bridge::file_operations::FileOperations;
use crate::bridge::protocol::{BridgeRequest, Invoke};
use crate::bridge::Bridge;
use crate::config::AppConfig;
use crate::platform::headless::{HeadlessPlatform, HeadlessWindow, Sink};
use crate::types::errors::{BridgeError, WindowError};
use crate::types::message::{BridgeReply, UiMessage};

pub const MAX_REQUESTS_PER_SECOND: u32 = 200;

/// Simple rate limiter: max requests per second.
pub struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    pub fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    pub fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

pub struct BridgeServer {
    app: App<HeadlessWindow>,
    platform: HeadlessPlatform,
    bridge: Bridge,
    sink: Sink,
    rate_limiter: RateLimiter,
}

impl BridgeServer {
    /// Opens the headless window and prepares the bridge. Nothing is written yet.
    pub fn new(config: AppConfig, sink: Sink) -> Result<Self, WindowError> {
        let files = match &config.documents_dir {
            Some(dir) => FileOperations::with_base_dir(dir),
            None => FileOperations::new(),
        };
        let platform = HeadlessPlatform::new(sink.clone());
        let mut app = App::new(config);
        app.startup(&platform)?;
        Ok(Self {
            app,
            platform,
            bridge: Bridge::new(files),
            sink,
            rate_limiter: RateLimiter::new(MAX_REQUESTS_PER_SECOND),
        })
    }

    pub fn app(&self) -> &App<HeadlessWindow> {
        &self.app
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Signals readiness with the crate version.
    pub fn announce_ready(&self) {
        self.write_line(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    }

    /// Handles one input line. Blank lines are ignored.
    pub async fn handle_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        let invoke = match Invoke::parse(line) {
            Ok(invoke) => invoke,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected bridge message");
                let id = serde_json::from_str::<Value>(line)
                    .ok()
                    .and_then(|v| v.get("id").and_then(|id| id.as_u64()));
                self.reply(id, Err(e));
                return;
            }
        };

        if !self.rate_limiter.check() {
            tracing::warn!(id = ?invoke.id, "Rate limit exceeded");
            self.reply(invoke.id, Err(BridgeError::RateLimited));
            return;
        }

        match invoke.request {
            BridgeRequest::File(request) => {
                let id = invoke.id.unwrap_or_default();
                let reply = self.bridge.handle_file_request(id, request).await;
                self.deliver(UiMessage::Reply(reply));
            }
            BridgeRequest::Host(request) => {
                if let Some(value) = self.app.handle_host_request(&self.platform, request) {
                    self.reply(invoke.id, Ok(value));
                }
            }
        }
    }

    /// Input closed: drop the window.
    pub fn shutdown(mut self) {
        tracing::info!("stdin closed, shutting down");
        self.app.window_closed();
    }

    fn reply(&self, id: Option<u64>, result: Result<Value, BridgeError>) {
        match (id, result) {
            (Some(id), Ok(value)) => self.deliver(UiMessage::Reply(BridgeReply::success(id, value))),
            (Some(id), Err(e)) => self.deliver(UiMessage::Reply(BridgeReply::failure(id, e))),
            (None, Err(e)) => self.write_line(
                &json!({"kind": "reply", "id": null, "ok": false, "error": e.to_string()}),
            ),
            (None, Ok(_)) => {}
        }
    }

    fn deliver(&self, message: UiMessage) {
        if let Err(e) = self.app.deliver(&message) {
            tracing::error!(error = %e, "Failed to write reply");
        }
    }

    fn write_line(&self, value: &Value) {
        if let Ok(mut out) = self.sink.lock() {
            let _ = writeln!(out, "{}", value);
            let _ = out.flush();
        }
    }
}
