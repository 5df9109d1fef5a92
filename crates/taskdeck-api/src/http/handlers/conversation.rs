//! Conversation history endpoint.
//!
//! GET /api/{user_id}/conversations/{conversation_id}
//!
//! Returns conversation metadata plus the full message transcript ordered
//! by sequence number.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::state::AppState;

/// One transcript entry as returned to the client.
#[derive(Debug, Serialize)]
pub struct MessageRecord {
    pub id: String,
    pub conversation_id: String,
    pub sender: String,
    pub content: String,
    pub sequence_number: i64,
    pub timestamp: String,
}

/// Response body for the conversation history endpoint.
#[derive(Debug, Serialize)]
pub struct ConversationHistoryResponse {
    pub conversation_id: String,
    pub title: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub messages: Vec<MessageRecord>,
}

/// GET /api/{user_id}/conversations/{conversation_id} -- full transcript.
pub async fn get_conversation_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((user_id, conversation_id)): Path<(String, String)>,
) -> Result<Json<ConversationHistoryResponse>, AppError> {
    // Users can only read their own conversations
    if auth.0 != user_id {
        return Err(AppError::Forbidden(
            "Access denied: You can only access your own conversations".to_string(),
        ));
    }

    let conversation_id = Uuid::parse_str(&conversation_id)
        .map_err(|_| AppError::Validation("Invalid conversation_id format".to_string()))?;

    let conversation = state
        .conversation_service
        .get_conversation(&conversation_id, &user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Conversation not found or access denied".to_string())
        })?;

    let messages = state
        .conversation_service
        .get_messages(&conversation.id)
        .await?;

    let messages = messages
        .iter()
        .map(|m| MessageRecord {
            id: m.id.to_string(),
            conversation_id: m.conversation_id.to_string(),
            sender: m.sender.to_string(),
            content: m.content.clone(),
            sequence_number: m.sequence_number,
            timestamp: m.timestamp.to_rfc3339(),
        })
        .collect();

    Ok(Json(ConversationHistoryResponse {
        conversation_id: conversation.id.to_string(),
        title: conversation.title,
        created_at: conversation.created_at.to_rfc3339(),
        updated_at: conversation.updated_at.to_rfc3339(),
        messages,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use taskdeck_infra::sqlite::pool::DatabasePool;

    async fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        let data_dir = dir.path().to_path_buf();
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();
        AppState::from_pool(pool, data_dir)
    }

    #[tokio::test]
    async fn history_rejects_identity_mismatch() {
        let state = test_state().await;

        let result = get_conversation_history(
            State(state),
            AuthUser("alice".to_string()),
            Path(("bob".to_string(), Uuid::now_v7().to_string())),
        )
        .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn history_rejects_malformed_id() {
        let state = test_state().await;

        let result = get_conversation_history(
            State(state),
            AuthUser("alice".to_string()),
            Path(("alice".to_string(), "not-a-uuid".to_string())),
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn history_rejects_unknown_conversation() {
        let state = test_state().await;

        let result = get_conversation_history(
            State(state),
            AuthUser("alice".to_string()),
            Path(("alice".to_string(), Uuid::now_v7().to_string())),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn history_returns_ordered_transcript() {
        let state = test_state().await;

        let first = state
            .orchestrator
            .process_message("alice", "show my tasks", None)
            .await
            .unwrap();
        state
            .orchestrator
            .process_message("alice", "list pending tasks", Some(first.conversation.id))
            .await
            .unwrap();

        let Json(history) = get_conversation_history(
            State(state),
            AuthUser("alice".to_string()),
            Path(("alice".to_string(), first.conversation.id.to_string())),
        )
        .await
        .unwrap();

        assert_eq!(history.title.as_deref(), Some("show my tasks"));
        assert_eq!(history.messages.len(), 4);
        let sequences: Vec<i64> = history.messages.iter().map(|m| m.sequence_number).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3]);
        assert_eq!(history.messages[0].sender, "user");
        assert_eq!(history.messages[1].sender, "agent");
    }

    #[tokio::test]
    async fn history_is_hidden_from_other_users() {
        let state = test_state().await;

        let turn = state
            .orchestrator
            .process_message("owner", "show my tasks", None)
            .await
            .unwrap();

        // Valid token for a different user whose path matches their own id:
        // the conversation simply isn't theirs.
        let result = get_conversation_history(
            State(state),
            AuthUser("intruder".to_string()),
            Path(("intruder".to_string(), turn.conversation.id.to_string())),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
