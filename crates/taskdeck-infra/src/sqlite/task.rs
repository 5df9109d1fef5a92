//! SQLite task repository implementation.
//!
//! Implements `TaskRepository` from `taskdeck-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct for SQLite-to-domain
//! mapping, reader pool for SELECTs, writer pool for mutations.

use chrono::{DateTime, Utc};
use sqlx::Row;
use taskdeck_core::task::repository::TaskRepository;
use taskdeck_types::error::RepositoryError;
use taskdeck_types::task::{Priority, Task, TaskId};
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `TaskRepository`.
pub struct SqliteTaskRepository {
    pool: DatabasePool,
}

impl SqliteTaskRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Task.
struct TaskRow {
    id: String,
    user_id: String,
    title: String,
    description: Option<String>,
    completed: i64,
    priority: String,
    created_at: String,
    updated_at: String,
}

impl TaskRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            completed: row.try_get("completed")?,
            priority: row.try_get("priority")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_task(self) -> Result<Task, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid task id: {e}")))?;
        let priority: Priority = self
            .priority
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Task {
            id: TaskId::from_uuid(id),
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            completed: self.completed != 0,
            priority,
            created_at,
            updated_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: &Task) -> Result<Task, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO tasks (id, user_id, title, description, completed, priority, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(task.id.to_string())
        .bind(&task.user_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed as i64)
        .bind(task.priority.to_string())
        .bind(format_datetime(&task.created_at))
        .bind(format_datetime(&task.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(task.clone())
    }

    async fn get_for_user(
        &self,
        task_id: &TaskId,
        user_id: &str,
    ) -> Result<Option<Task>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id.to_string())
            .bind(user_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let task_row =
                    TaskRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(task_row.into_task()?))
            }
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Task>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM tasks WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in &rows {
            let task_row =
                TaskRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            tasks.push(task_row.into_task()?);
        }

        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE tasks
               SET title = ?, description = ?, completed = ?, priority = ?, updated_at = ?
               WHERE id = ? AND user_id = ?"#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed as i64)
        .bind(task.priority.to_string())
        .bind(format_datetime(&task.updated_at))
        .bind(task.id.to_string())
        .bind(&task.user_id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, task_id: &TaskId, user_id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id.to_string())
            .bind(user_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_task() {
        let pool = test_pool().await;
        let repo = SqliteTaskRepository::new(pool);

        let task = Task::new("user-1", "Buy milk", Some("2% if they have it".to_string()));
        let created = repo.create(&task).await.unwrap();
        assert_eq!(created.id, task.id);

        let found = repo.get_for_user(&task.id, "user-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Buy milk");
        assert_eq!(found.description.as_deref(), Some("2% if they have it"));
        assert_eq!(found.priority, Priority::Medium);
        assert!(!found.completed);
    }

    #[tokio::test]
    async fn test_get_is_scoped_by_user() {
        let pool = test_pool().await;
        let repo = SqliteTaskRepository::new(pool);

        let task = Task::new("owner", "Private task", None);
        repo.create(&task).await.unwrap();

        let found = repo.get_for_user(&task.id, "intruder").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_for_user_only_sees_own_tasks() {
        let pool = test_pool().await;
        let repo = SqliteTaskRepository::new(pool);

        for title in ["one", "two", "three"] {
            repo.create(&Task::new("user-1", title, None)).await.unwrap();
        }
        repo.create(&Task::new("user-2", "other", None)).await.unwrap();

        let tasks = repo.list_for_user("user-1").await.unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|t| t.user_id == "user-1"));
    }

    #[tokio::test]
    async fn test_update_task() {
        let pool = test_pool().await;
        let repo = SqliteTaskRepository::new(pool);

        let mut task = Task::new("user-1", "Draft report", None);
        repo.create(&task).await.unwrap();

        task.title = "Final report".to_string();
        task.completed = true;
        task.updated_at = Utc::now();
        repo.update(&task).await.unwrap();

        let found = repo.get_for_user(&task.id, "user-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Final report");
        assert!(found.completed);
    }

    #[tokio::test]
    async fn test_update_foreign_task_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteTaskRepository::new(pool);

        let mut task = Task::new("owner", "Private task", None);
        repo.create(&task).await.unwrap();

        task.user_id = "intruder".to_string();
        task.title = "Hijacked".to_string();
        let err = repo.update(&task).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        let found = repo.get_for_user(&task.id, "owner").await.unwrap().unwrap();
        assert_eq!(found.title, "Private task");
    }

    #[tokio::test]
    async fn test_delete_task() {
        let pool = test_pool().await;
        let repo = SqliteTaskRepository::new(pool);

        let task = Task::new("user-1", "Temporary", None);
        repo.create(&task).await.unwrap();

        repo.delete(&task.id, "user-1").await.unwrap();

        let found = repo.get_for_user(&task.id, "user-1").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_task_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteTaskRepository::new(pool);

        let err = repo.delete(&TaskId::new(), "user-1").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_empty_title_violates_check_constraint() {
        let pool = test_pool().await;
        let repo = SqliteTaskRepository::new(pool);

        let task = Task::new("user-1", "", None);
        let err = repo.create(&task).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }
}
