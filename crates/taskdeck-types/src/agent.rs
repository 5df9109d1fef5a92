//! Agent tool types: intents, tool requests, and the result envelope.
//!
//! These types model the data shapes flowing through the classify ->
//! dispatch pipeline: the classified intent for one message, the five tool
//! operations, and the uniform success/message envelope every tool returns.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::task::{Task, TaskId};

/// Status filter for task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
    All,
    Pending,
    Completed,
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFilter::All => write!(f, "all"),
            ListFilter::Pending => write!(f, "pending"),
            ListFilter::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(ListFilter::All),
            "pending" => Ok(ListFilter::Pending),
            "completed" => Ok(ListFilter::Completed),
            other => Err(format!("invalid list filter: '{other}'")),
        }
    }
}

impl Default for ListFilter {
    fn default() -> Self {
        ListFilter::All
    }
}

/// A CRUD operation the agent can invoke on behalf of a user.
///
/// Parameters are extracted by the classifier; the owning user id is
/// supplied separately at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    AddTask {
        title: String,
        description: Option<String>,
    },
    ListTasks {
        status: ListFilter,
    },
    CompleteTask {
        task_id: TaskId,
    },
    DeleteTask {
        task_id: TaskId,
    },
    UpdateTask {
        task_id: TaskId,
        title: Option<String>,
        description: Option<String>,
    },
}

impl ToolRequest {
    /// Wire name of the tool, as recorded in tool-call observability output.
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolRequest::AddTask { .. } => "add_task",
            ToolRequest::ListTasks { .. } => "list_tasks",
            ToolRequest::CompleteTask { .. } => "complete_task",
            ToolRequest::DeleteTask { .. } => "delete_task",
            ToolRequest::UpdateTask { .. } => "update_task",
        }
    }
}

/// Outcome of classifying one free-text message.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// A tool should be invoked with the extracted parameters.
    Invoke(ToolRequest),
    /// The message needs clarification before anything can be dispatched.
    Clarify(String),
}

/// Uniform result envelope returned by every tool operation.
///
/// Tools never raise past this boundary: storage failures are converted
/// into `success: false` with a descriptive message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutcome {
    /// Successful outcome with a user-facing message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            task_id: None,
            tasks: None,
            count: None,
            error: None,
        }
    }

    /// Failed outcome carrying both a machine error and a user-facing message.
    pub fn failed(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            task_id: None,
            tasks: None,
            count: None,
            error: Some(error.into()),
        }
    }

    /// Attach the affected task id.
    pub fn with_task_id(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }
}

/// Record of a single tool invocation, returned with the chat response
/// for observability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool_name: String,
    pub params: serde_json::Value,
    pub result: ToolOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_roundtrip() {
        for filter in [ListFilter::All, ListFilter::Pending, ListFilter::Completed] {
            let parsed: ListFilter = filter.to_string().parse().unwrap();
            assert_eq!(filter, parsed);
        }
    }

    #[test]
    fn test_list_filter_default_is_all() {
        assert_eq!(ListFilter::default(), ListFilter::All);
    }

    #[test]
    fn test_tool_names() {
        let add = ToolRequest::AddTask {
            title: "t".to_string(),
            description: None,
        };
        assert_eq!(add.tool_name(), "add_task");

        let list = ToolRequest::ListTasks {
            status: ListFilter::All,
        };
        assert_eq!(list.tool_name(), "list_tasks");

        let complete = ToolRequest::CompleteTask {
            task_id: TaskId::new(),
        };
        assert_eq!(complete.tool_name(), "complete_task");
    }

    #[test]
    fn test_outcome_serialization_skips_empty_fields() {
        let outcome = ToolOutcome::ok("Task added");
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(!json.contains("task_id"));
        assert!(!json.contains("tasks"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_failed_outcome_carries_error() {
        let outcome = ToolOutcome::failed("boom", "Failed to add task: boom");
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_with_task_id() {
        let id = TaskId::new();
        let outcome = ToolOutcome::ok("done").with_task_id(id);
        assert_eq!(outcome.task_id, Some(id));
    }
}
