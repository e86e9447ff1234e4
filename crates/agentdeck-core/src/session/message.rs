//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Message typed by the user.
    User,
    /// Reply produced by an agent.
    Agent,
}

/// Metadata for a file shared into a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
}

/// A single entry in a session's message log.
///
/// Messages are immutable once appended; sessions are append-only logs
/// plus a mutable title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier (UUID format)
    pub id: String,
    pub sender: Sender,
    pub text: String,
    /// Present when the message carries a file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<FileMeta>,
    /// Marks an agent reply that failed to generate
    #[serde(default)]
    pub is_error: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a user-sent text message stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates an agent reply stamped now.
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Sender::Agent, text)
    }

    /// Creates an agent error notice stamped now.
    pub fn agent_error(text: impl Into<String>) -> Self {
        let mut message = Self::new(Sender::Agent, text);
        message.is_error = true;
        message
    }

    /// Attaches file metadata to this message.
    pub fn with_attachment(mut self, attachment: FileMeta) -> Self {
        self.attachment = Some(attachment);
        self
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            attachment: None,
            is_error: false,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_defaults() {
        let message = Message::user("hello");
        assert_eq!(message.sender, Sender::User);
        assert!(!message.is_error);
        assert!(message.attachment.is_none());
    }

    #[test]
    fn test_attachment_survives_serde() {
        let message = Message::user("report attached").with_attachment(FileMeta {
            file_name: "report.pdf".to_string(),
            file_size: 2048,
            file_type: "application/pdf".to_string(),
        });

        let json = serde_json::to_string(&message).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.attachment.unwrap().file_name, "report.pdf");
    }

    #[test]
    fn test_is_error_defaults_to_false_on_deserialize() {
        let json = r#"{
            "id": "m-1",
            "sender": "agent",
            "text": "hi",
            "timestamp": "2024-01-01T00:00:00Z"
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert!(!message.is_error);
    }
}
