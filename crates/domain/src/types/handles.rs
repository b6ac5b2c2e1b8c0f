//! Identifiers for the remote resources a service is bound to

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Drive folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderHandle {
    /// Folder token from the drive URL.
    pub folder_token: String,
}

/// Bitable app.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseHandle {
    /// App token of the base.
    pub base_id: String,
}

/// Table inside a base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableHandle {
    /// App token of the containing base.
    pub base_id: String,
    /// Table id within the base.
    pub table_id: String,
}

impl TableHandle {
    /// Handle for `table_id` in `base_id`.
    pub fn new(base_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self { base_id: base_id.into(), table_id: table_id.into() }
    }
}

/// Kind of identifier a message receiver is addressed by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiveIdType {
    /// Group chat id (`oc_...`).
    #[default]
    ChatId,
    /// Per-app user id (`ou_...`).
    OpenId,
    /// Tenant user id.
    UserId,
    /// Cross-app user id (`on_...`).
    UnionId,
    /// User email address.
    Email,
}

impl_wire_enum_conversions!(ReceiveIdType {
    ChatId => "chat_id",
    OpenId => "open_id",
    UserId => "user_id",
    UnionId => "union_id",
    Email => "email",
});

/// Destination of a bot message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTarget {
    /// How `receive_id` is interpreted.
    pub receive_id_type: ReceiveIdType,
    /// Receiver identifier.
    pub receive_id: String,
}

impl ChatTarget {
    /// Target a group chat by id.
    pub fn chat(chat_id: impl Into<String>) -> Self {
        Self { receive_id_type: ReceiveIdType::ChatId, receive_id: chat_id.into() }
    }
}
