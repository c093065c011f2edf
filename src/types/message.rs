use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::menu::MenuCommand;

/// Answer to an invoke request coming from the UI surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeReply {
    pub id: u64,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeReply {
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: u64, error: impl ToString) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

/// Message posted from the privileged side into the UI surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UiMessage {
    /// A menu command on its named channel, with the optional argument.
    Menu {
        channel: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<String>,
    },
    /// Resolution of a pending invoke request.
    Reply(BridgeReply),
}

impl From<&MenuCommand> for UiMessage {
    fn from(command: &MenuCommand) -> Self {
        UiMessage::Menu {
            channel: command.channel().to_string(),
            payload: command.payload(),
        }
    }
}

impl From<BridgeReply> for UiMessage {
    fn from(reply: BridgeReply) -> Self {
        UiMessage::Reply(reply)
    }
}
