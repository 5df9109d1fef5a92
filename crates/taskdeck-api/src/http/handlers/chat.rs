//! Chat endpoint.
//!
//! POST /api/{user_id}/chat
//!
//! Runs one full chat turn: resolve-or-create the conversation, persist the
//! user message, classify and dispatch the intent, persist the agent reply,
//! and return both stored messages plus the tool-call records.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use taskdeck_types::agent::ToolCallRecord;
use taskdeck_types::chat::ChatMessage;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's natural-language message.
    pub message: String,
    /// Existing conversation to continue; if absent, a new one is created.
    pub conversation_id: Option<String>,
}

/// One stored message as returned to the client.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub id: String,
    pub content: String,
    pub sender: String,
    pub timestamp: String,
}

impl From<&ChatMessage> for MessageBody {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.to_string(),
            content: message.content.clone(),
            sender: message.sender.to_string(),
            timestamp: message.timestamp.to_rfc3339(),
        }
    }
}

/// Response body for the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub conversation_id: String,
    /// Id of the stored agent message.
    pub message_id: String,
    /// The agent's reply text.
    pub response: String,
    pub timestamp: String,
    pub tool_calls: Vec<ToolCallRecord>,
    pub user_message: MessageBody,
    pub agent_response: MessageBody,
}

/// POST /api/{user_id}/chat -- process one chat message.
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    // Users can only chat within their own namespace
    if auth.0 != user_id {
        return Err(AppError::Forbidden(
            "Access denied: You can only access your own conversations".to_string(),
        ));
    }

    if body.message.trim().is_empty() {
        return Err(AppError::Validation("Message content is required".to_string()));
    }

    let conversation_id = match body.conversation_id.as_deref() {
        Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| {
            AppError::Validation("Invalid conversation_id format".to_string())
        })?),
        None => None,
    };

    let turn = state
        .orchestrator
        .process_message(&user_id, &body.message, conversation_id)
        .await?;

    Ok(Json(ChatResponse {
        conversation_id: turn.conversation.id.to_string(),
        message_id: turn.agent_message.id.to_string(),
        response: turn.reply,
        timestamp: turn.agent_message.timestamp.to_rfc3339(),
        tool_calls: turn.tool_calls,
        user_message: MessageBody::from(&turn.user_message),
        agent_response: MessageBody::from(&turn.agent_message),
    }))
}
