//! ConversationRepository trait definition.
//!
//! Persistence operations for conversation threads and their ordered
//! message transcripts. Implementations live in taskdeck-infra
//! (e.g., `SqliteConversationRepository`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use taskdeck_types::chat::{ChatMessage, Conversation};
use taskdeck_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for conversation and message persistence.
///
/// Messages are append-only: there is no update or delete operation for
/// them, by design.
pub trait ConversationRepository: Send + Sync {
    /// Create a new conversation thread.
    fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation by id, visible only to its owning user.
    fn get_conversation(
        &self,
        conversation_id: &Uuid,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// Set the conversation title and bump its `updated_at`.
    fn update_title(
        &self,
        conversation_id: &Uuid,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a message. Sequence numbers are unique per conversation;
    /// inserting a duplicate is a `Conflict`.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get all messages for a conversation, ordered by sequence number.
    fn get_messages(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Get the number of messages in a conversation.
    fn get_message_count(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u32, RepositoryError>> + Send;
}
