use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{CreateTodoRequest, RemovedResponse, UpdateTodoRequest};
use super::repo_types::{NewTodo, Todo, TodoChanges, TodoSummary};
use crate::{
    auth::gate::require_admin,
    error::{ApiJson, ApiPath, AppError, AppResult},
    state::AppState,
};

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/:id", get(get_todo))
}

pub fn write_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/todos", post(create_todo))
        .route("/todos/:id", put(update_todo).delete(delete_todo))
        .route_layer(from_fn_with_state(state, require_admin))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_todos(State(state): State<AppState>) -> AppResult<Json<Vec<TodoSummary>>> {
    Ok(Json(state.todos.list_todos().await?))
}

#[instrument(skip(state))]
pub async fn get_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Todo>> {
    state
        .todos
        .get_todo(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Todo {id} not found")))
}

#[instrument(skip(state, body))]
pub async fn create_todo(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTodoRequest>,
) -> AppResult<Json<Todo>> {
    let todo = state
        .todos
        .create_todo(NewTodo {
            task: body.task,
            priority: body.priority,
            notes: body.notes,
        })
        .await?;
    info!(todo_id = todo.id, "todo created");
    Ok(Json(todo))
}

#[instrument(skip(state, body))]
pub async fn update_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<UpdateTodoRequest>,
) -> AppResult<Json<TodoSummary>> {
    if let Some(body_id) = body.id.filter(|b| *b != id) {
        warn!(todo_id = id, body_id, "body id does not match path id");
        return Err(AppError::BadRequest(format!(
            "Body id {body_id} does not match path id {id}"
        )));
    }

    let changes = TodoChanges {
        task: body.task,
        completed: body.completed,
        priority: body.priority,
        notes: body.notes,
    };
    let updated = state
        .todos
        .update_todo(id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Todo {id} not found")))?;
    info!(todo_id = id, "todo updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<RemovedResponse>> {
    let removed = state.todos.delete_todo(id).await?;
    info!(todo_id = id, removed, "todo delete");
    Ok(Json(RemovedResponse { removed }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        authed_json_request, body_json, get, json_request, send, ADMIN_PASSPHRASE,
    };
    use axum::{body::Body, http::{header::AUTHORIZATION, Request, StatusCode}};
    use serde_json::json;

    async fn create(state: &AppState, body: &str) -> Todo {
        let res = send(state.clone(), authed_json_request("POST", "/api/todos", body)).await;
        assert_eq!(res.status(), StatusCode::OK);
        body_json(res).await
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(AUTHORIZATION, ADMIN_PASSPHRASE)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn list_is_empty_without_rows() {
        let res = send(AppState::fake(), get("/api/todos")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let todos: Vec<TodoSummary> = body_json(res).await;
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn create_returns_full_record() {
        let state = AppState::fake();
        let todo = create(&state, r#"{"task":"buy milk","priority":2,"notes":"2%"}"#).await;
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            json!({"id":1,"task":"buy milk","completed":false,"priority":2,"notes":"2%"})
        );
    }

    #[tokio::test]
    async fn create_assigns_unique_ids_and_defaults() {
        let state = AppState::fake();
        let a = create(&state, r#"{"task":"a"}"#).await;
        let b = create(&state, r#"{"task":"b"}"#).await;
        assert_ne!(a.id, b.id);
        assert!(!a.completed && !b.completed);
        assert_eq!(a.priority, 3);
        assert_eq!(a.notes, None);

        let res = send(state, get("/api/todos")).await;
        let todos: Vec<TodoSummary> = body_json(res).await;
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].task, "a");
    }

    #[tokio::test]
    async fn create_rejects_bad_body() {
        let state = AppState::fake();
        let res = send(state.clone(), authed_json_request("POST", "/api/todos", r#"{"priority":1}"#)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = body_json(res).await;
        assert!(body["error"].is_string());

        let res = send(state, authed_json_request("POST", "/api/todos", r#"{"task":"x","bogus":1}"#)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_missing_is_404() {
        let res = send(AppState::fake(), get("/api/todos/99")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = body_json(res).await;
        assert_eq!(body["error"], "Todo 99 not found");
    }

    #[tokio::test]
    async fn bad_path_id_is_json_400() {
        let state = AppState::fake();
        for uri in ["/api/todos/abc", "/api/todos/99999999999"] {
            let res = send(state.clone(), get(uri)).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = body_json(res).await;
            assert!(body["error"].is_string(), "{uri}: {body}");
        }

        let body = r#"{"task":"t","completed":false}"#;
        let res = send(state, authed_json_request("PUT", "/api/todos/abc", body)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = body_json(res).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn update_uses_path_id() {
        let state = AppState::fake();
        let first = create(&state, r#"{"task":"first"}"#).await;
        let second = create(&state, r#"{"task":"second"}"#).await;

        let body = r#"{"task":"second, done","completed":true,"priority":5,"notes":null}"#;
        let uri = format!("/api/todos/{}", second.id);
        let res = send(state.clone(), authed_json_request("PUT", &uri, body)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated: TodoSummary = body_json(res).await;
        assert_eq!(
            updated,
            TodoSummary { id: second.id, task: "second, done".into(), completed: true }
        );

        let res = send(state.clone(), get(&format!("/api/todos/{}", first.id))).await;
        let untouched: Todo = body_json(res).await;
        assert_eq!(untouched, first);

        let res = send(state, get(&uri)).await;
        let full: Todo = body_json(res).await;
        assert_eq!(full.priority, 5);
    }

    #[tokio::test]
    async fn update_rejects_mismatched_body_id() {
        let state = AppState::fake();
        let todo = create(&state, r#"{"task":"t"}"#).await;
        let body = format!(r#"{{"id":{},"task":"t","completed":true}}"#, todo.id + 1);
        let uri = format!("/api/todos/{}", todo.id);
        let res = send(state, authed_json_request("PUT", &uri, &body)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_missing_is_404() {
        let body = r#"{"task":"t","completed":false}"#;
        let res = send(AppState::fake(), authed_json_request("PUT", "/api/todos/5", body)).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_reports_removed_and_row_is_gone() {
        let state = AppState::fake();
        let todo = create(&state, r#"{"task":"gone soon"}"#).await;
        let uri = format!("/api/todos/{}", todo.id);

        let res = send(state.clone(), delete(&uri)).await;
        let body: RemovedResponse = body_json(res).await;
        assert!(body.removed);

        let res = send(state.clone(), get(&uri)).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = send(state, delete(&uri)).await;
        let body: RemovedResponse = body_json(res).await;
        assert!(!body.removed);
    }

    #[tokio::test]
    async fn mutations_are_admin_gated() {
        let state = AppState::fake();
        let res = send(state.clone(), json_request("POST", "/api/todos", r#"{"task":"x"}"#)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/todos/1")
            .header(AUTHORIZATION, "Bearer not-a-token")
            .body(Body::empty())
            .unwrap();
        let res = send(state.clone(), req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = send(state, get("/api/todos")).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
