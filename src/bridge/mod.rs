//! Capability-restricted bridge between the untrusted UI and the host.
//!
//! The UI can reach exactly the operations decoded by [`protocol::Invoke`].
//! File operations are handled here; dialog, version and log requests are
//! answered by [`crate::app::App`] on the event-loop thread.

pub mod channels;
pub mod file_operations;
pub mod protocol;
pub mod server;
pub mod validation;

use serde_json::{json, Value};

use crate::bridge::file_operations::FileOperations;
use crate::bridge::protocol::FileRequest;
use crate::types::errors::BridgeError;
use crate::types::message::BridgeReply;

#[derive(Debug, Clone, Default)]
pub struct Bridge {
    files: FileOperations,
}

impl Bridge {
    pub fn new(files: FileOperations) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &FileOperations {
        &self.files
    }

    /// Runs a file request and turns every outcome into a reply.
    pub async fn handle_file_request(&self, id: u64, request: FileRequest) -> BridgeReply {
        match self.run_file_request(request).await {
            Ok(value) => BridgeReply::success(id, value),
            Err(e) => BridgeReply::failure(id, e),
        }
    }

    async fn run_file_request(&self, request: FileRequest) -> Result<Value, BridgeError> {
        match request {
            FileRequest::Read { path } => {
                let path = path.unwrap_or_default();
                let text = self.files.read_file(&path).await?;
                Ok(Value::String(text))
            }
            FileRequest::Write { path, data } => {
                let written = self.files.write_value(path.as_deref(), &data).await?;
                Ok(json!(written))
            }
            FileRequest::Exists { path } => {
                let exists = self.files.file_exists(path.as_deref().unwrap_or("")).await;
                Ok(json!(exists))
            }
        }
    }
}
