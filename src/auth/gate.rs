use axum::{
    extract::{FromRef, Query, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{auth::jwt::JwtKeys, error::AppError, state::AppState};

/// Who passed the admin gate. Inserted into request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminIdentity {
    Passphrase,
    User(i32),
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Reads the credential from `Authorization` (optionally `Bearer `-prefixed)
/// or from `?token=`. The header wins when both are present.
fn credential(req: &Request) -> Option<String> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.strip_prefix("Bearer ")
                .or_else(|| v.strip_prefix("bearer "))
                .unwrap_or(v)
                .trim()
                .to_string()
        });
    header
        .or_else(|| {
            Query::<TokenQuery>::try_from_uri(req.uri())
                .ok()
                .and_then(|Query(q)| q.token)
        })
        .filter(|c| !c.is_empty())
}

pub fn authorize(
    credential: Option<&str>,
    passphrase: Option<&str>,
    keys: &JwtKeys,
) -> Result<AdminIdentity, AppError> {
    let Some(credential) = credential else {
        return Err(AppError::Unauthorized("Authentication required".into()));
    };

    if passphrase.is_some_and(|p| p == credential) {
        return Ok(AdminIdentity::Passphrase);
    }

    match keys.verify(credential) {
        Ok(claims) => Ok(AdminIdentity::User(claims.sub)),
        Err(e) => {
            warn!(error = %e, "admin credential rejected");
            Err(AppError::Forbidden("Invalid credentials".into()))
        }
    }
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let identity = authorize(
        credential(&req).as_deref(),
        state.config.admin_passphrase.as_deref(),
        &keys,
    )?;
    debug!(?identity, "admin gate passed");
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
