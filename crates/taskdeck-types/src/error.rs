use thiserror::Error;

/// Errors from repository operations (used by trait definitions in taskdeck-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from processing one chat turn.
///
/// Tool failures never surface here -- the dispatcher converts them into
/// `success: false` envelopes. This covers only conversation resolution
/// and transcript persistence.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("conversation not found")]
    ConversationNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_display() {
        assert_eq!(
            ChatError::ConversationNotFound.to_string(),
            "conversation not found"
        );
    }

    #[test]
    fn test_chat_error_from_repository() {
        let err: ChatError = RepositoryError::NotFound.into();
        assert!(matches!(err, ChatError::Repository(RepositoryError::NotFound)));
    }
}
