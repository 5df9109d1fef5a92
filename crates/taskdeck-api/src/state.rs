//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. The orchestrator and services are generic over repository traits,
//! but AppState pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use taskdeck_core::agent::dispatcher::ToolDispatcher;
use taskdeck_core::agent::orchestrator::ChatOrchestrator;
use taskdeck_core::chat::service::ConversationService;
use taskdeck_infra::config::resolve_data_dir;
use taskdeck_infra::sqlite::conversation::SqliteConversationRepository;
use taskdeck_infra::sqlite::pool::DatabasePool;
use taskdeck_infra::sqlite::task::SqliteTaskRepository;

/// Concrete type aliases for the generics pinned to infra implementations.
pub type ConcreteOrchestrator =
    ChatOrchestrator<SqliteConversationRepository, SqliteTaskRepository>;

pub type ConcreteConversationService = ConversationService<SqliteConversationRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub conversation_service: Arc<ConcreteConversationService>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("taskdeck.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        Ok(Self::from_pool(db_pool, data_dir))
    }

    /// Wire services over an existing pool (used by tests).
    pub fn from_pool(db_pool: DatabasePool, data_dir: PathBuf) -> Self {
        // Wire the orchestrator with its own service instances
        let dispatcher = ToolDispatcher::new(SqliteTaskRepository::new(db_pool.clone()));
        let orchestrator = ChatOrchestrator::new(
            ConversationService::new(SqliteConversationRepository::new(db_pool.clone())),
            dispatcher,
        );

        // Create a separate conversation service for the history endpoint
        // (the orchestrator owns one internally)
        let conversation_service =
            ConversationService::new(SqliteConversationRepository::new(db_pool.clone()));

        Self {
            orchestrator: Arc::new(orchestrator),
            conversation_service: Arc::new(conversation_service),
            data_dir,
            db_pool,
        }
    }
}
