use serde::{Deserialize, Serialize};

/// Request body for signup and signin. Both fields are checked by the
/// handlers so a missing one is a 400 with a readable message.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response returned after signup or signin.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: i32,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminResponse {
    pub admin: bool,
}
