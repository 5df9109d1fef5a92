//! TaskRepository trait definition.
//!
//! CRUD operations for task records, all scoped by the owning user.
//! Implementations live in taskdeck-infra (e.g., `SqliteTaskRepository`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use taskdeck_types::error::RepositoryError;
use taskdeck_types::task::{Task, TaskId};

/// Repository trait for task persistence.
///
/// Ownership scoping is part of the contract: lookups, updates, and
/// deletes only see rows whose `user_id` matches, so a task owned by
/// another user is indistinguishable from an absent one.
pub trait TaskRepository: Send + Sync {
    /// Insert a new task.
    fn create(
        &self,
        task: &Task,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;

    /// Get a task by id, visible only to its owning user.
    fn get_for_user(
        &self,
        task_id: &TaskId,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Task>, RepositoryError>> + Send;

    /// List all tasks owned by a user, newest first.
    fn list_for_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, RepositoryError>> + Send;

    /// Persist changes to an existing task. The row must belong to the
    /// task's `user_id`; otherwise `NotFound`.
    fn update(
        &self,
        task: &Task,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a task owned by the user; `NotFound` if absent or foreign.
    fn delete(
        &self,
        task_id: &TaskId,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
