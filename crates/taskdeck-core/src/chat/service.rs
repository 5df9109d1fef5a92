//! Conversation service over the repository port.
//!
//! ConversationService wraps a `ConversationRepository` with the small
//! amount of domain logic the orchestrator needs: constructing records,
//! resolving threads by owner, and appending transcript entries.

use chrono::Utc;
use taskdeck_types::chat::{ChatMessage, Conversation, SenderRole};
use taskdeck_types::error::RepositoryError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::repository::ConversationRepository;

/// Orchestrates conversation lifecycle and message persistence.
///
/// Generic over `ConversationRepository` so taskdeck-core never depends
/// on taskdeck-infra.
pub struct ConversationService<C: ConversationRepository> {
    repo: C,
}

impl<C: ConversationRepository> ConversationService<C> {
    /// Create a new service over the given repository.
    pub fn new(repo: C) -> Self {
        Self { repo }
    }

    /// Create a new untitled conversation for a user.
    pub async fn create_conversation(
        &self,
        user_id: &str,
    ) -> Result<Conversation, RepositoryError> {
        let conversation = Conversation::new(user_id);
        let created = self.repo.create_conversation(&conversation).await?;
        info!(conversation_id = %created.id, "Conversation created");
        Ok(created)
    }

    /// Get a conversation by id, scoped to its owning user.
    pub async fn get_conversation(
        &self,
        conversation_id: &Uuid,
        user_id: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.repo.get_conversation(conversation_id, user_id).await
    }

    /// Append a message to a conversation at the given sequence number.
    pub async fn append_message(
        &self,
        conversation_id: Uuid,
        sender: SenderRole,
        content: String,
        sequence_number: i64,
    ) -> Result<ChatMessage, RepositoryError> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            conversation_id,
            sender,
            content,
            sequence_number,
            timestamp: Utc::now(),
        };

        self.repo.save_message(&message).await?;
        Ok(message)
    }

    /// Get the full transcript for a conversation, ordered by sequence number.
    pub async fn get_messages(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.repo.get_messages(conversation_id).await
    }

    /// Set the conversation title (derived from the first user message).
    pub async fn update_title(
        &self,
        conversation_id: &Uuid,
        title: &str,
    ) -> Result<(), RepositoryError> {
        match self.repo.update_title(conversation_id, title).await {
            Ok(()) => {
                info!(conversation_id = %conversation_id, "Conversation title updated");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                warn!(conversation_id = %conversation_id, "Attempted to title a non-existent conversation");
                Err(RepositoryError::NotFound)
            }
            Err(e) => Err(e),
        }
    }
}
