//! Database models.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Result;

/// A stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Chat {
    /// Client-chosen chat id.
    pub id: String,
    /// Message history as a JSON array.
    pub messages: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last write timestamp.
    pub updated_at: String,
}

impl Chat {
    /// Decode the stored message history.
    pub fn messages<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.messages)?)
    }
}

/// A chat listing entry, without the messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatSummary {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    /// Number of stored messages.
    pub message_count: i64,
}
