//! Unit tests for the line-oriented bridge server.
//!
//! Covers the ready event, the per-second rate limit and the replies to
//! undecodable lines.

use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tempfile::TempDir;

use mindmap::bridge::server::{BridgeServer, RateLimiter, MAX_REQUESTS_PER_SECOND};
use mindmap::config::AppConfig;
use mindmap::platform::headless::Sink;

/// Captures everything the server writes.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn lines(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

fn server_with(config: AppConfig) -> (BridgeServer, Capture) {
    let capture = Capture::default();
    let sink: Sink = Arc::new(Mutex::new(capture.clone()));
    (BridgeServer::new(config, sink).unwrap(), capture)
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

#[test]
fn test_ready_event_carries_version() {
    let (server, capture) = server_with(AppConfig::default());
    assert!(capture.lines().is_empty());

    server.announce_ready();
    assert_eq!(
        capture.lines(),
        vec![json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})]
    );
}

#[test]
fn test_server_opens_headless_window() {
    let (server, _capture) = server_with(AppConfig::default());
    assert_eq!(server.app().window().map(|w| w.title()), Some("Mind Map"));
}

#[test]
fn test_documents_dir_becomes_base_dir() {
    let mut config = AppConfig::default();
    config.documents_dir = Some("/maps".into());
    let (server, _capture) = server_with(config);
    assert_eq!(
        server.bridge().files().base_dir(),
        Some(std::path::Path::new("/maps"))
    );
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_file_request_round_trip() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.json"), "[1]").unwrap();
    let mut config = AppConfig::default();
    config.documents_dir = Some(dir.path().to_path_buf());
    let (mut server, capture) = server_with(config);

    server.handle_line(r#"{"id":1,"cmd":"read-file","path":"a.json"}"#).await;
    server.handle_line(r#"{"id":2,"cmd":"file-exists","path":"b.json"}"#).await;

    assert_eq!(
        capture.lines(),
        vec![
            json!({"kind": "reply", "id": 1, "ok": true, "result": "[1]"}),
            json!({"kind": "reply", "id": 2, "ok": true, "result": false}),
        ]
    );
}

#[tokio::test]
async fn test_headless_dialog_is_canceled_with_error() {
    let (mut server, capture) = server_with(AppConfig::default());
    server.handle_line(r#"{"id":3,"cmd":"show-save-dialog"}"#).await;

    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], json!(3));
    assert_eq!(lines[0]["ok"], json!(true));
    assert_eq!(lines[0]["result"]["canceled"], json!(true));
    assert!(lines[0]["result"]["error"].is_string());
}

#[tokio::test]
async fn test_log_error_and_blank_lines_write_nothing() {
    let (mut server, capture) = server_with(AppConfig::default());
    server.handle_line("").await;
    server.handle_line("   ").await;
    server.handle_line(r#"{"cmd":"log-error","message":"boom"}"#).await;
    assert!(capture.lines().is_empty());
}

// ---------------------------------------------------------------------------
// Undecodable lines
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_bad_request_with_readable_id_is_answered_with_that_id() {
    let (mut server, capture) = server_with(AppConfig::default());
    server.handle_line(r#"{"id":7,"cmd":"delete-everything"}"#).await;

    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["kind"], json!("reply"));
    assert_eq!(lines[0]["id"], json!(7));
    assert_eq!(lines[0]["ok"], json!(false));
    assert_eq!(
        lines[0]["error"],
        json!("Malformed request: unknown cmd: delete-everything")
    );
}

#[tokio::test]
async fn test_unparseable_line_is_answered_with_null_id() {
    let (mut server, capture) = server_with(AppConfig::default());
    server.handle_line("{not json").await;

    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], Value::Null);
    assert_eq!(lines[0]["ok"], json!(false));
    assert!(lines[0]["error"]
        .as_str()
        .unwrap()
        .starts_with("Malformed request: parse error: "));
}

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

#[test]
fn test_rate_limiter_allows_up_to_limit() {
    let mut limiter = RateLimiter::new(3);
    assert!(limiter.check());
    assert!(limiter.check());
    assert!(limiter.check());
    assert!(!limiter.check());
}

#[tokio::test]
async fn test_request_over_limit_is_refused() {
    let (mut server, capture) = server_with(AppConfig::default());
    let total = MAX_REQUESTS_PER_SECOND as u64 + 1;
    for id in 1..=total {
        server
            .handle_line(&format!(r#"{{"id":{},"cmd":"get-app-version"}}"#, id))
            .await;
    }

    let lines = capture.lines();
    assert_eq!(lines.len() as u64, total);
    assert!(lines[..MAX_REQUESTS_PER_SECOND as usize]
        .iter()
        .all(|line| line["ok"] == json!(true)));
    assert_eq!(
        lines[MAX_REQUESTS_PER_SECOND as usize],
        json!({"kind": "reply", "id": total, "ok": false, "error": "Rate limit exceeded"})
    );
}
