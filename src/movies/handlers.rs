use std::sync::Arc;

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use super::client::MovieClient;
use super::dto::{reshape, MovieSearchResponse, SearchParams};
use crate::{
    auth::gate::require_admin,
    config::MovieConfig,
    error::{ApiPath, ApiQuery, AppError, AppResult},
    state::AppState,
    todos::repo_types::{NewTodo, Todo, DEFAULT_PRIORITY},
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/movies", get(search_movies))
}

pub fn write_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/todos/movies/:imdb_id", put(create_todo_from_movie))
        .route_layer(from_fn_with_state(state, require_admin))
}

fn backend(state: &AppState) -> AppResult<(&Arc<dyn MovieClient>, &MovieConfig)> {
    match (state.movies.as_ref(), state.config.movies.as_ref()) {
        (Some(client), Some(cfg)) => Ok((client, cfg)),
        _ => Err(AppError::NotFound("Movie search is not configured".into())),
    }
}

#[instrument(skip(state))]
pub async fn search_movies(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> AppResult<Json<MovieSearchResponse>> {
    let query = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter `search` is required".into()))?;

    let (client, cfg) = backend(&state)?;
    let page = client.search(query).await?;
    Ok(Json(reshape(page, cfg)))
}

#[instrument(skip(state))]
pub async fn create_todo_from_movie(
    State(state): State<AppState>,
    ApiPath(imdb_id): ApiPath<String>,
) -> AppResult<Json<Todo>> {
    let (client, _) = backend(&state)?;
    let movie = client
        .lookup(&imdb_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {imdb_id} not found")))?;

    let todo = state
        .todos
        .create_todo(NewTodo {
            task: movie.todo_task(),
            priority: DEFAULT_PRIORITY,
            notes: movie.cast(),
        })
        .await?;
    info!(todo_id = todo.id, %imdb_id, "todo created from movie");
    Ok(Json(todo))
}
