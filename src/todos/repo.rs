use async_trait::async_trait;

use crate::store::{PgStore, TodoStore};
use crate::todos::repo_types::{NewTodo, Todo, TodoChanges, TodoSummary};

#[async_trait]
impl TodoStore for PgStore {
    async fn list_todos(&self) -> anyhow::Result<Vec<TodoSummary>> {
        let rows = sqlx::query_as::<_, TodoSummary>(
            r#"
            SELECT id, task, completed
            FROM todos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_todo(&self, id: i32) -> anyhow::Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, task, completed, priority, notes
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn create_todo(&self, todo: NewTodo) -> anyhow::Result<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (task, priority, notes)
            VALUES ($1, $2, $3)
            RETURNING id, task, completed, priority, notes
            "#,
        )
        .bind(todo.task)
        .bind(todo.priority)
        .bind(todo.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn update_todo(
        &self,
        id: i32,
        changes: TodoChanges,
    ) -> anyhow::Result<Option<TodoSummary>> {
        let row = sqlx::query_as::<_, TodoSummary>(
            r#"
            UPDATE todos
            SET task = $1,
                completed = $2,
                priority = $3,
                notes = $4
            WHERE id = $5
            RETURNING id, task, completed
            "#,
        )
        .bind(changes.task)
        .bind(changes.completed)
        .bind(changes.priority)
        .bind(changes.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_todo(&self, id: i32) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
