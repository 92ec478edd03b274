use std::sync::Arc;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod movies;
mod state;
mod store;
mod todos;

#[cfg(test)]
mod test_support;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "todos_api=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let command = std::env::args().nth(1).unwrap_or_else(|| "serve".into());
    let config = Arc::new(AppConfig::from_env()?);
    let pool = db::connect(&config.database_url).await?;

    match command.as_str() {
        "serve" => {
            if let Err(e) = db::create_tables(&pool).await {
                tracing::warn!(error = %e, "create tables failed; continuing");
            }
            let state = AppState::new(pool, config)?;
            app::serve(app::build_app(state)).await?;
        }
        "create-tables" => db::create_tables(&pool).await?,
        "drop-tables" => db::drop_tables(&pool).await?,
        "seed" => {
            db::seed(&pool).await?;
        }
        other => anyhow::bail!(
            "unknown command `{other}`; expected serve, create-tables, drop-tables or seed"
        ),
    }

    Ok(())
}
