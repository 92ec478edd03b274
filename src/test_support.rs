use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::{app::build_app, state::AppState};

pub const ADMIN_PASSPHRASE: &str = "open sesame";

pub async fn send(state: AppState, req: Request<Body>) -> Response {
    build_app(state).oneshot(req).await.unwrap()
}

pub async fn body_json<T: serde::de::DeserializeOwned>(res: Response) -> T {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_auth(uri: &str, credential: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, credential)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    let mut req = json_request(method, uri, body);
    req.headers_mut()
        .insert(header::AUTHORIZATION, ADMIN_PASSPHRASE.parse().unwrap());
    req
}
