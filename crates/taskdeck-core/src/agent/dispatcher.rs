//! Tool dispatcher: executes classified tool requests against the task store.
//!
//! Every operation is scoped by the requesting user's id and returns the
//! uniform `ToolOutcome` envelope. Repository failures are converted into
//! `success: false` outcomes here -- nothing raises past this boundary, so
//! the orchestrator can always turn an outcome into chat text.

use chrono::Utc;
use taskdeck_types::agent::{ListFilter, ToolOutcome, ToolRequest};
use taskdeck_types::task::{Task, TaskId};
use tracing::debug;

use crate::task::repository::TaskRepository;

const MISSING_TASK_ERROR: &str = "Task not found or access denied";
const MISSING_TASK_MESSAGE: &str = "Task not found or you don't have permission to access it";

/// Executes tool requests against the task store.
///
/// Generic over `TaskRepository` so taskdeck-core never depends on
/// taskdeck-infra.
pub struct ToolDispatcher<T: TaskRepository> {
    tasks: T,
}

impl<T: TaskRepository> ToolDispatcher<T> {
    /// Create a new dispatcher over the given task repository.
    pub fn new(tasks: T) -> Self {
        Self { tasks }
    }

    /// Execute one tool request on behalf of `user_id`.
    pub async fn dispatch(&self, user_id: &str, request: &ToolRequest) -> ToolOutcome {
        debug!(user_id = %user_id, tool = request.tool_name(), "Dispatching tool request");
        match request {
            ToolRequest::AddTask { title, description } => {
                self.add_task(user_id, title, description.clone()).await
            }
            ToolRequest::ListTasks { status } => self.list_tasks(user_id, *status).await,
            ToolRequest::CompleteTask { task_id } => self.complete_task(user_id, task_id).await,
            ToolRequest::DeleteTask { task_id } => self.delete_task(user_id, task_id).await,
            ToolRequest::UpdateTask {
                task_id,
                title,
                description,
            } => {
                self.update_task(user_id, task_id, title.as_deref(), description.as_deref())
                    .await
            }
        }
    }

    async fn add_task(
        &self,
        user_id: &str,
        title: &str,
        description: Option<String>,
    ) -> ToolOutcome {
        let task = Task::new(user_id, title, description);
        match self.tasks.create(&task).await {
            Ok(created) => ToolOutcome::ok(format!("Task '{title}' added successfully"))
                .with_task_id(created.id),
            Err(e) => ToolOutcome::failed(e.to_string(), format!("Failed to add task: {e}")),
        }
    }

    async fn list_tasks(&self, user_id: &str, status: ListFilter) -> ToolOutcome {
        let tasks = match self.tasks.list_for_user(user_id).await {
            Ok(tasks) => tasks,
            Err(e) => {
                return ToolOutcome::failed(e.to_string(), format!("Failed to list tasks: {e}"));
            }
        };

        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| match status {
                ListFilter::All => true,
                ListFilter::Pending => !task.completed,
                ListFilter::Completed => task.completed,
            })
            .collect();

        let count = tasks.len();
        ToolOutcome {
            success: true,
            message: format!("Found {count} {status} tasks"),
            task_id: None,
            tasks: Some(tasks),
            count: Some(count),
            error: None,
        }
    }

    async fn complete_task(&self, user_id: &str, task_id: &TaskId) -> ToolOutcome {
        let mut task = match self.tasks.get_for_user(task_id, user_id).await {
            Ok(Some(task)) => task,
            Ok(None) => return ToolOutcome::failed(MISSING_TASK_ERROR, MISSING_TASK_MESSAGE),
            Err(e) => {
                return ToolOutcome::failed(e.to_string(), format!("Failed to complete task: {e}"));
            }
        };

        task.completed = true;
        task.updated_at = Utc::now();

        match self.tasks.update(&task).await {
            Ok(()) => ToolOutcome::ok(format!("Task '{}' marked as completed", task.title))
                .with_task_id(task.id),
            Err(e) => ToolOutcome::failed(e.to_string(), format!("Failed to complete task: {e}")),
        }
    }

    async fn delete_task(&self, user_id: &str, task_id: &TaskId) -> ToolOutcome {
        let task = match self.tasks.get_for_user(task_id, user_id).await {
            Ok(Some(task)) => task,
            Ok(None) => return ToolOutcome::failed(MISSING_TASK_ERROR, MISSING_TASK_MESSAGE),
            Err(e) => {
                return ToolOutcome::failed(e.to_string(), format!("Failed to delete task: {e}"));
            }
        };

        match self.tasks.delete(task_id, user_id).await {
            Ok(()) => ToolOutcome::ok(format!("Task '{}' deleted successfully", task.title))
                .with_task_id(task.id),
            Err(e) => ToolOutcome::failed(e.to_string(), format!("Failed to delete task: {e}")),
        }
    }

    async fn update_task(
        &self,
        user_id: &str,
        task_id: &TaskId,
        title: Option<&str>,
        description: Option<&str>,
    ) -> ToolOutcome {
        if title.is_none() && description.is_none() {
            return ToolOutcome::failed(
                "No updates provided",
                "No title or description provided to update",
            );
        }

        let mut task = match self.tasks.get_for_user(task_id, user_id).await {
            Ok(Some(task)) => task,
            Ok(None) => return ToolOutcome::failed(MISSING_TASK_ERROR, MISSING_TASK_MESSAGE),
            Err(e) => {
                return ToolOutcome::failed(e.to_string(), format!("Failed to update task: {e}"));
            }
        };

        if let Some(title) = title {
            task.title = title.to_string();
        }
        if let Some(description) = description {
            task.description = Some(description.to_string());
        }
        task.updated_at = Utc::now();

        match self.tasks.update(&task).await {
            Ok(()) => ToolOutcome::ok("Task updated successfully").with_task_id(task.id),
            Err(e) => ToolOutcome::failed(e.to_string(), format!("Failed to update task: {e}")),
        }
    }
}
