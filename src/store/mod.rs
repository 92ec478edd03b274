use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::User;
use crate::todos::repo_types::{NewTodo, Todo, TodoChanges, TodoSummary};

#[cfg(test)]
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("email already registered")]
    EmailTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn list_todos(&self) -> anyhow::Result<Vec<TodoSummary>>;
    async fn get_todo(&self, id: i32) -> anyhow::Result<Option<Todo>>;
    async fn create_todo(&self, todo: NewTodo) -> anyhow::Result<Todo>;
    /// Returns `None` when no todo has this id.
    async fn update_todo(&self, id: i32, changes: TodoChanges)
        -> anyhow::Result<Option<TodoSummary>>;
    /// Returns whether a row was removed.
    async fn delete_todo(&self, id: i32) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, CreateUserError>;
}

/// Postgres-backed implementation of the store traits.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
