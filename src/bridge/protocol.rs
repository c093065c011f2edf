//! Decoding of invoke messages posted by the UI surface.
//!
//! Wire format: one JSON object per message,
//! `{"id": 7, "cmd": "read-file", "path": "/maps/a.json"}`.
//! `id` is required for anything that expects a reply; `log-error` is
//! fire-and-forget.

use serde_json::Value;

use crate::bridge::channels;
use crate::types::errors::BridgeError;

/// Operation that runs off the UI thread and touches the filesystem.
#[derive(Debug, Clone, PartialEq)]
pub enum FileRequest {
    Read { path: Option<String> },
    Write { path: Option<String>, data: Value },
    Exists { path: Option<String> },
}

/// Operation answered by the window host on the event-loop thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    ShowSaveDialog,
    ShowOpenDialog,
    GetAppVersion,
    LogError(String),
}

impl HostRequest {
    pub fn expects_reply(&self) -> bool {
        !matches!(self, HostRequest::LogError(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeRequest {
    File(FileRequest),
    Host(HostRequest),
}

/// A decoded message: the optional correlation id and the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoke {
    pub id: Option<u64>,
    pub request: BridgeRequest,
}

fn string_field(msg: &Value, key: &str) -> Option<String> {
    msg.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

impl Invoke {
    pub fn parse(message: &str) -> Result<Self, BridgeError> {
        let msg: Value = serde_json::from_str(message)
            .map_err(|e| BridgeError::MalformedRequest(format!("parse error: {}", e)))?;
        Self::from_value(&msg)
    }

    pub fn from_value(msg: &Value) -> Result<Self, BridgeError> {
        let cmd = msg
            .get("cmd")
            .and_then(|v| v.as_str())
            .ok_or_else(|| BridgeError::MalformedRequest("missing cmd".to_string()))?;
        let id = msg.get("id").and_then(|v| v.as_u64());

        let request = match cmd {
            channels::READ_FILE => BridgeRequest::File(FileRequest::Read {
                path: string_field(msg, "path"),
            }),
            channels::WRITE_FILE => BridgeRequest::File(FileRequest::Write {
                path: string_field(msg, "path"),
                data: msg.get("data").cloned().unwrap_or(Value::Null),
            }),
            channels::FILE_EXISTS => BridgeRequest::File(FileRequest::Exists {
                path: string_field(msg, "path"),
            }),
            channels::SHOW_SAVE_DIALOG => BridgeRequest::Host(HostRequest::ShowSaveDialog),
            channels::SHOW_OPEN_DIALOG => BridgeRequest::Host(HostRequest::ShowOpenDialog),
            channels::GET_APP_VERSION => BridgeRequest::Host(HostRequest::GetAppVersion),
            channels::LOG_ERROR => {
                let message = match msg.get("message") {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                BridgeRequest::Host(HostRequest::LogError(message))
            }
            other => {
                return Err(BridgeError::MalformedRequest(format!("unknown cmd: {}", other)))
            }
        };

        let needs_id = match &request {
            BridgeRequest::File(_) => true,
            BridgeRequest::Host(host) => host.expects_reply(),
        };
        if needs_id && id.is_none() {
            return Err(BridgeError::MalformedRequest(format!("missing id for {}", cmd)));
        }

        Ok(Self { id, request })
    }
}
