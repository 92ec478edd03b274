use axum::{
    extract::{FromRef, State},
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AdminResponse, AuthResponse, CredentialsRequest},
        gate::{require_admin, AdminIdentity},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::{ApiJson, AppError, AppResult},
    state::AppState,
    store::CreateUserError,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
}

pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_check))
        .route_layer(from_fn_with_state(state, require_admin))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Normalized `(email, password)`, or a 400 when either is missing or blank.
fn required_credentials(payload: CredentialsRequest) -> AppResult<(String, String)> {
    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    let password = payload.password.filter(|p| !p.is_empty());
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(AppError::BadRequest("Email and password are required".into())),
    }
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (email, password) = required_credentials(payload)?;

    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    // Not atomic with the insert below; the UNIQUE constraint catches the race.
    if state.users.find_user_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let hash = hash_password(&password)?;
    let user = match state.users.create_user(&email, &hash).await {
        Ok(u) => u,
        Err(CreateUserError::EmailTaken) => {
            warn!(%email, "email registered concurrently");
            return Err(AppError::BadRequest("Email already registered".into()));
        }
        Err(CreateUserError::Other(e)) => return Err(e.into()),
    };

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = user.id, email = %user.email, "user signed up");
    Ok(Json(AuthResponse {
        id: user.id,
        email: user.email,
        token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (email, password) = required_credentials(payload)?;

    let Some(user) = state.users.find_user_by_email(&email).await? else {
        warn!(%email, "signin unknown email");
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    };

    // An unparsable stored hash can never match; treat it as a wrong password.
    let matches = verify_password(&password, &user.password_hash).unwrap_or_else(|e| {
        warn!(error = %e, user_id = user.id, "stored password is not a valid hash");
        false
    });
    if !matches {
        warn!(%email, user_id = user.id, "signin invalid password");
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = user.id, email = %user.email, "user signed in");
    Ok(Json(AuthResponse {
        id: user.id,
        email: user.email,
        token,
    }))
}

#[instrument(skip_all)]
pub async fn admin_check(Extension(identity): Extension<AdminIdentity>) -> Json<AdminResponse> {
    info!(?identity, "admin check");
    Json(AdminResponse { admin: true })
}
