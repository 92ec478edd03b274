use serde::{Deserialize, Serialize};

use super::repo_types::DEFAULT_PRIORITY;

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    pub task: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Full replacement body. `id` may be echoed back by clients but the path
/// id is always the one updated.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub id: Option<i32>,
    pub task: String,
    pub completed: bool,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemovedResponse {
    pub removed: bool,
}
