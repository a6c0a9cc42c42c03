//! Chat session, message, and transcript types for Wellspring.
//!
//! A session is one browser conversation: an append-only transcript plus the
//! optional profile saved from the sidebar form. Sessions live in process
//! memory only and disappear when deleted or when the process exits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::profile::Profile;

/// Role of a message in a chat transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message within a chat session.
///
/// Messages are ordered by append position within a transcript; `created_at`
/// records wall-clock time for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        ChatMessage {
            id: Uuid::now_v7(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only ordered sequence of chat messages.
///
/// The only mutation is appending; entries are never removed or reordered.
/// Display order is append order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message, returning a reference to the stored entry.
    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage::user(content));
        self.messages.last().expect("just pushed")
    }

    /// Append an assistant message, returning a reference to the stored entry.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage::assistant(content));
        self.messages.last().expect("just pushed")
    }

    /// All messages in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A chat session: one browser conversation with its transcript and profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub transcript: Transcript,
}

impl ChatSession {
    /// Create a new session with an empty transcript.
    pub fn new() -> Self {
        ChatSession {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            profile: None,
            transcript: Transcript::new(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_transcript_preserves_append_order() {
        let mut transcript = Transcript::new();
        transcript.push_user("first");
        transcript.push_assistant("second");
        transcript.push_user("third");

        assert_eq!(transcript.len(), 3);
        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(transcript.last().unwrap().role, MessageRole::User);
    }

    #[test]
    fn test_transcript_serde_transparent() {
        let mut transcript = Transcript::new();
        transcript.push_user("hello");
        let json = serde_json::to_value(&transcript).unwrap();
        // Serializes as a bare array, not a wrapper object.
        assert!(json.is_array());
        assert_eq!(json[0]["role"], "user");
        assert_eq!(json[0]["content"], "hello");
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = ChatSession::new();
        assert!(session.transcript.is_empty());
        assert!(session.profile.is_none());
    }
}
