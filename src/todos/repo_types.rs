use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Priority given to todos created without one.
pub const DEFAULT_PRIORITY: i32 = 3;

/// Todo record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub task: String,
    pub completed: bool,
    pub priority: i32,
    pub notes: Option<String>,
}

/// Identifying fields returned by list and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TodoSummary {
    pub id: i32,
    pub task: String,
    pub completed: bool,
}

impl From<&Todo> for TodoSummary {
    fn from(t: &Todo) -> Self {
        Self {
            id: t.id,
            task: t.task.clone(),
            completed: t.completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub task: String,
    pub priority: i32,
    pub notes: Option<String>,
}

/// Full replacement of a todo's mutable fields.
#[derive(Debug, Clone)]
pub struct TodoChanges {
    pub task: String,
    pub completed: bool,
    pub priority: i32,
    pub notes: Option<String>,
}
