use std::net::SocketAddr;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::{auth, movies, todos};

pub fn build_app(state: AppState) -> Router {
    let mut api = Router::new()
        .merge(todos::router(state.clone()))
        .merge(auth::router(state.clone()))
        .route("/health", get(|| async { "ok" }))
        .fallback(api_not_found);
    if state.movies.is_some() {
        api = api.merge(movies::router(state.clone()));
    }

    Router::new()
        .nest("/api", api)
        .fallback(client_redirect)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn api_not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

/// Single-page-app fallback: any other GET goes to the client.
async fn client_redirect(State(state): State<AppState>, method: Method) -> AppResult<Response> {
    match state.config.client_url.as_deref() {
        Some(url) if method == Method::GET => {
            Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response())
        }
        _ => Err(AppError::NotFound("Not found".into())),
    }
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let port = std::env::var("PORT")
        .or_else(|_| std::env::var("APP_PORT"))
        .unwrap_or_else(|_| "3000".into());
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        port
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
