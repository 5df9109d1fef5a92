//! Conversation and message types for Taskdeck.
//!
//! A conversation is an ordered transcript of user/agent exchanges scoped
//! to one owning user. Messages are append-only: once stored they are never
//! mutated or deleted, and their sequence numbers reflect insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Which side of the exchange a message belongs to.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'agent'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    User,
    Agent,
}

impl fmt::Display for SenderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderRole::User => write!(f, "user"),
            SenderRole::Agent => write!(f, "agent"),
        }
    }
}

impl FromStr for SenderRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(SenderRole::User),
            "agent" => Ok(SenderRole::Agent),
            other => Err(format!("invalid sender role: '{other}'")),
        }
    }
}

/// A conversation thread between a user and the agent.
///
/// The title is set from the first user message and may be absent until
/// the first exchange completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    /// Owning user. Messages are visible only to this user.
    pub user_id: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new untitled conversation for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id: user_id.into(),
            title: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A single message within a conversation.
///
/// `sequence_number` strictly increases per conversation and establishes
/// transcript order; numbers are never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender: SenderRole,
    /// Non-empty message body.
    pub content: String,
    pub sequence_number: i64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_role_roundtrip() {
        for role in [SenderRole::User, SenderRole::Agent] {
            let parsed: SenderRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_sender_role_serde() {
        let json = serde_json::to_string(&SenderRole::Agent).unwrap();
        assert_eq!(json, "\"agent\"");
        let parsed: SenderRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SenderRole::Agent);
    }

    #[test]
    fn test_sender_role_parse_rejects_unknown() {
        assert!("assistant".parse::<SenderRole>().is_err());
    }

    #[test]
    fn test_new_conversation_is_untitled() {
        let conversation = Conversation::new("user-1");
        assert!(conversation.title.is_none());
        assert_eq!(conversation.user_id, "user-1");
    }

    #[test]
    fn test_chat_message_serialize() {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            conversation_id: Uuid::now_v7(),
            sender: SenderRole::User,
            content: "Add a task".to_string(),
            sequence_number: 0,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        assert!(json.contains("\"sequence_number\":0"));
    }
}
