use anyhow::Context;
use serde::Deserialize;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use tracing::info;

const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        task VARCHAR(256) NOT NULL,
        completed BOOL NOT NULL DEFAULT FALSE,
        priority INTEGER NOT NULL DEFAULT 3,
        notes TEXT
    );
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email VARCHAR(256) NOT NULL UNIQUE,
        password VARCHAR(512) NOT NULL
    );
"#;

const DROP_TABLES: &str = r#"
    DROP TABLE IF EXISTS todos;
    DROP TABLE IF EXISTS users;
"#;

const SEED_TODOS: &str = include_str!("../seed/todos.json");

#[derive(Debug, Deserialize)]
struct SeedTodo {
    task: String,
    completed: bool,
}

pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("connect to database")
}

pub async fn create_tables(db: &PgPool) -> anyhow::Result<()> {
    db.execute(CREATE_TABLES).await.context("create tables")?;
    info!("tables created");
    Ok(())
}

pub async fn drop_tables(db: &PgPool) -> anyhow::Result<()> {
    db.execute(DROP_TABLES).await.context("drop tables")?;
    info!("tables dropped");
    Ok(())
}

pub async fn seed(db: &PgPool) -> anyhow::Result<usize> {
    let todos = seed_todos()?;
    for todo in &todos {
        sqlx::query(
            r#"
            INSERT INTO todos (task, completed)
            VALUES ($1, $2)
            "#,
        )
        .bind(&todo.task)
        .bind(todo.completed)
        .execute(db)
        .await
        .with_context(|| format!("seed todo {:?}", todo.task))?;
    }
    info!(count = todos.len(), "todos seeded");
    Ok(todos.len())
}

fn seed_todos() -> anyhow::Result<Vec<SeedTodo>> {
    serde_json::from_str(SEED_TODOS).context("parse seed/todos.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_seed_parses() {
        let todos = seed_todos().expect("seed data should parse");
        assert!(!todos.is_empty());
        assert!(todos.iter().all(|t| !t.task.is_empty()));
    }
}
