use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single message in a conversation transcript.
///
/// Only `role` and `content` are read; any other fields the chat service
/// stores alongside them (ids, timestamps) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: ConversationRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ConversationRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ConversationRole::Assistant,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ConversationRole::User
    }
}

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationRole {
    User,
    Assistant,
    System,
    /// Tool output, moderators, anything else the chat service records.
    #[serde(other)]
    Other,
}

/// Parse a stored transcript: a JSON array of `{role, content}` objects.
///
/// Entries that are not objects, or that lack a string `content`, are
/// skipped instead of failing the whole transcript.
pub fn parse_transcript(json: &str) -> Result<Vec<ConversationMessage>, CoreError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(CoreError::NotATranscript);
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ConversationMessage>(entry).ok())
        .collect())
}

/// Contents of the user-authored messages, in transcript order.
pub fn user_turns(messages: &[ConversationMessage]) -> Vec<&str> {
    messages
        .iter()
        .filter(|m| m.is_user())
        .map(|m| m.content.as_str())
        .collect()
}
