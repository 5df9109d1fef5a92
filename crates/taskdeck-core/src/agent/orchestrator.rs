//! Chat orchestrator: one pass per incoming message.
//!
//! Sequences the full exchange -- resolve conversation, load transcript,
//! append the user message, classify, dispatch, append the agent reply,
//! title the thread on its first turn -- and returns both stored messages
//! plus the tool-call record for observability. Nothing is held across
//! requests; the durable store is the only state.

use serde_json::json;
use taskdeck_types::agent::{Intent, ToolCallRecord, ToolRequest};
use taskdeck_types::chat::{ChatMessage, Conversation, SenderRole};
use taskdeck_types::error::ChatError;
use tracing::info;
use uuid::Uuid;

use crate::agent::classifier::classify;
use crate::agent::dispatcher::ToolDispatcher;
use crate::agent::title::derive_title;
use crate::chat::repository::ConversationRepository;
use crate::chat::service::ConversationService;
use crate::task::repository::TaskRepository;

/// Everything produced by one processed chat turn.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub conversation: Conversation,
    pub user_message: ChatMessage,
    pub agent_message: ChatMessage,
    /// The agent's reply text (same content as `agent_message`).
    pub reply: String,
    /// Tool invocations performed for this turn; empty on clarification.
    pub tool_calls: Vec<ToolCallRecord>,
}

/// Sequences classify -> dispatch -> persist for each incoming message.
pub struct ChatOrchestrator<C: ConversationRepository, T: TaskRepository> {
    conversations: ConversationService<C>,
    dispatcher: ToolDispatcher<T>,
}

impl<C: ConversationRepository, T: TaskRepository> ChatOrchestrator<C, T> {
    /// Create a new orchestrator over the given service and dispatcher.
    pub fn new(conversations: ConversationService<C>, dispatcher: ToolDispatcher<T>) -> Self {
        Self {
            conversations,
            dispatcher,
        }
    }

    /// Process one chat message for a user.
    ///
    /// When `conversation_id` is given the thread must exist and belong to
    /// the user (`ChatError::ConversationNotFound` otherwise); when absent
    /// a new thread is created. The raw message text is stored verbatim.
    #[tracing::instrument(name = "process_message", skip(self, message), fields(user_id = %user_id))]
    pub async fn process_message(
        &self,
        user_id: &str,
        message: &str,
        conversation_id: Option<Uuid>,
    ) -> Result<ChatTurn, ChatError> {
        let mut conversation = match conversation_id {
            Some(id) => self
                .conversations
                .get_conversation(&id, user_id)
                .await?
                .ok_or(ChatError::ConversationNotFound)?,
            None => self.conversations.create_conversation(user_id).await?,
        };

        let transcript = self.conversations.get_messages(&conversation.id).await?;
        let next_sequence = transcript.len() as i64;

        let user_message = self
            .conversations
            .append_message(
                conversation.id,
                SenderRole::User,
                message.to_string(),
                next_sequence,
            )
            .await?;

        let (reply, tool_calls) = match classify(message) {
            Intent::Clarify(prompt) => (prompt, Vec::new()),
            Intent::Invoke(request) => {
                let outcome = self.dispatcher.dispatch(user_id, &request).await;
                let reply = if outcome.success {
                    outcome.message.clone()
                } else {
                    format!("Sorry, I couldn't perform that action: {}", outcome.message)
                };
                let record = ToolCallRecord {
                    tool_name: request.tool_name().to_string(),
                    params: request_params(user_id, &request),
                    result: outcome,
                };
                (reply, vec![record])
            }
        };

        let agent_message = self
            .conversations
            .append_message(
                conversation.id,
                SenderRole::Agent,
                reply.clone(),
                next_sequence + 1,
            )
            .await?;

        // First turn: name the thread after the opening message.
        if transcript.is_empty() {
            let title = derive_title(message);
            self.conversations
                .update_title(&conversation.id, &title)
                .await?;
            conversation.title = Some(title);
        }

        info!(
            conversation_id = %conversation.id,
            tool_calls = tool_calls.len(),
            "Chat turn processed"
        );

        Ok(ChatTurn {
            conversation,
            user_message,
            agent_message,
            reply,
            tool_calls,
        })
    }
}

/// Parameter record for a tool call, including the authorizing user id.
fn request_params(user_id: &str, request: &ToolRequest) -> serde_json::Value {
    match request {
        ToolRequest::AddTask { title, description } => json!({
            "user_id": user_id,
            "title": title,
            "description": description,
        }),
        ToolRequest::ListTasks { status } => json!({
            "user_id": user_id,
            "status": status.to_string(),
        }),
        ToolRequest::CompleteTask { task_id } => json!({
            "user_id": user_id,
            "task_id": task_id.to_string(),
        }),
        ToolRequest::DeleteTask { task_id } => json!({
            "user_id": user_id,
            "task_id": task_id.to_string(),
        }),
        ToolRequest::UpdateTask {
            task_id,
            title,
            description,
        } => json!({
            "user_id": user_id,
            "task_id": task_id.to_string(),
            "title": title,
            "description": description,
        }),
    }
}
