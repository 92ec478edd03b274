use anyhow::bail;
use serde::Deserialize;

/// Upper bound for `JWT_TTL_MINUTES`: one hundred years.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365 * 100;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Tokens never expire when unset.
    pub ttl_minutes: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieConfig {
    pub api_url: String,
    /// `{id}` is replaced with the imdb id, `{key}` with the api key.
    pub poster_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub admin_passphrase: Option<String>,
    pub client_url: Option<String>,
    pub movies: Option<MovieConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "todos-api".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "todos-users".into()),
            ttl_minutes: parse_ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok())?,
        };
        let movies = non_empty_var("MOVIE_API_KEY").map(|api_key| MovieConfig {
            api_url: std::env::var("MOVIE_API_URL")
                .unwrap_or_else(|_| "https://www.omdbapi.com/".into()),
            poster_url: std::env::var("MOVIE_POSTER_URL")
                .unwrap_or_else(|_| "https://img.omdbapi.com/?apikey={key}&i={id}".into()),
            api_key,
        });
        Ok(Self {
            database_url,
            jwt,
            admin_passphrase: non_empty_var("ADMIN_PASSPHRASE"),
            client_url: non_empty_var("CLIENT_URL"),
            movies,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Unset, non-numeric or non-positive values mean no expiry.
fn parse_ttl_minutes(raw: Option<String>) -> anyhow::Result<Option<i64>> {
    let Some(minutes) = raw
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|m| *m > 0)
    else {
        return Ok(None);
    };
    if minutes > MAX_TTL_MINUTES {
        bail!("JWT_TTL_MINUTES must be at most {MAX_TTL_MINUTES}, got {minutes}");
    }
    Ok(Some(minutes))
}
