use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CreateUserError, TodoStore, UserStore};
use crate::auth::repo_types::User;
use crate::todos::repo_types::{NewTodo, Todo, TodoChanges, TodoSummary};

#[derive(Default)]
struct Tables {
    todos: BTreeMap<i32, Todo>,
    users: BTreeMap<i32, User>,
    next_todo_id: i32,
    next_user_id: i32,
}

/// In-process stand-in for Postgres used by route tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list_todos(&self) -> anyhow::Result<Vec<TodoSummary>> {
        let t = self.tables.read().await;
        Ok(t.todos.values().map(TodoSummary::from).collect())
    }

    async fn get_todo(&self, id: i32) -> anyhow::Result<Option<Todo>> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn create_todo(&self, todo: NewTodo) -> anyhow::Result<Todo> {
        let mut t = self.tables.write().await;
        t.next_todo_id += 1;
        let row = Todo {
            id: t.next_todo_id,
            task: todo.task,
            completed: false,
            priority: todo.priority,
            notes: todo.notes,
        };
        t.todos.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_todo(
        &self,
        id: i32,
        changes: TodoChanges,
    ) -> anyhow::Result<Option<TodoSummary>> {
        let mut t = self.tables.write().await;
        Ok(t.todos.get_mut(&id).map(|row| {
            row.task = changes.task;
            row.completed = changes.completed;
            row.priority = changes.priority;
            row.notes = changes.notes;
            TodoSummary::from(&*row)
        }))
    }

    async fn delete_todo(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.tables.write().await.todos.remove(&id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, CreateUserError> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.email == email) {
            return Err(CreateUserError::EmailTaken);
        }
        t.next_user_id += 1;
        let user = User {
            id: t.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }
}
