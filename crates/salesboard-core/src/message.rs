//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a session's chat log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique per message.
    pub id: Uuid,

    pub role: Role,

    pub text: String,

    /// When the message was appended.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with a fresh id.
    pub fn new(role: Role, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            created_at,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
