use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum TaskStatus {
    Backlog,
    Ongoing,
    Done,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backlog" => Ok(TaskStatus::Backlog),
            "ongoing" => Ok(TaskStatus::Ongoing),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::Ongoing => "Ongoing",
            TaskStatus::Done => "Done",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        };
        f.write_str(label)
    }
}

/// A card on the board.
///
/// `task_type` is the free-form unit label (for example "Bug" or "UNIT 3") and
/// travels as `type` both on the wire and in the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub task_type: String,
    pub priority: TaskPriority,
}

impl Task {
    pub(crate) fn generate_id() -> String {
        Uuid::now_v7().simple().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    pub title: String,
    pub status: TaskStatus,
    pub task_type: String,
    pub priority: TaskPriority,
}

/// Partial edit of a task. Status is deliberately absent; it moves through
/// its own operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub task_type: Option<String>,
    pub priority: Option<TaskPriority>,
}

/// Row of the `daily_snapshots` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DailySnapshot {
    pub date: NaiveDate,
}

/// Where a resolved day came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    /// Served straight from the current-day cache.
    Live,
    /// Read from the snapshot table.
    Archived,
}

impl SnapshotSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotSource::Live => "live",
            SnapshotSource::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub source: SnapshotSource,
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("Backlog".parse(), Ok(TaskStatus::Backlog));
        assert_eq!("ONGOING".parse(), Ok(TaskStatus::Ongoing));
        assert_eq!(" done ".parse(), Ok(TaskStatus::Done));
        assert!("archived".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("low".parse(), Ok(TaskPriority::Low));
        assert_eq!("High".parse(), Ok(TaskPriority::High));
        assert_eq!(
            "urgent".parse::<TaskPriority>(),
            Err(ParseTaskPriorityError("urgent".to_string()))
        );
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task {
            id: "abc".to_string(),
            title: "Trouble SLA".to_string(),
            status: TaskStatus::Ongoing,
            task_type: "Bug".to_string(),
            priority: TaskPriority::High,
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc",
                "title": "Trouble SLA",
                "status": "Ongoing",
                "type": "Bug",
                "priority": "high",
            })
        );

        let back: Task = serde_json::from_value(value).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = Task::generate_id();
        let b = Task::generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
