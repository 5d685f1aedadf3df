//! Relational task-store model.
//!
//! # Responsibility
//! - Mirror the `users`, `status` and `tasks` tables as typed rows.
//! - Provide projection rows for join and aggregate queries.
//!
//! # Invariants
//! - `status.name` only ever holds one of the `TaskStatus` labels.
//! - `Task::status_id` and `Task::user_id` point at existing rows.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Row identifier shared by all three tables.
pub type RowId = i64;

/// Task lifecycle label stored in `status.name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created but not started.
    Todo,
    /// Work is in progress.
    InProgress,
    /// Finished.
    Completed,
}

impl TaskStatus {
    /// All labels in seeding order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Returns the exact label persisted in `status.name`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }

    /// Parses a persisted label. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Todo" => Some(Self::Todo),
            "InProgress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RowId,
    pub fullname: String,
    pub email: String,
}

/// Row of the `status` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: RowId,
    pub name: TaskStatus,
}

/// Row of the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RowId,
    pub title: String,
    /// `None` and `Some("")` both count as "without description".
    pub description: Option<String>,
    pub status_id: RowId,
    pub user_id: RowId,
}

/// Insert request for a new task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status_id: RowId,
    pub user_id: RowId,
}

impl NewTask {
    pub fn new(title: impl Into<String>, status_id: RowId, user_id: RowId) -> Self {
        Self {
            title: title.into(),
            description: None,
            status_id,
            user_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Number of tasks sharing one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: i64,
}

/// One user with the number of tasks assigned to them (zero included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTaskCount {
    pub user_id: RowId,
    pub fullname: String,
    pub task_count: i64,
}

/// Joined `users ⋈ tasks ⋈ status` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTaskRow {
    pub user: User,
    pub task: Task,
    pub status: TaskStatus,
}
