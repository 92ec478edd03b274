use serde::{Deserialize, Serialize};

use crate::config::MovieConfig;

/// Served in place of posters the upstream reports as `N/A`.
pub const PLACEHOLDER_POSTER: &str = "https://placehold.co/300x445?text=No+Poster";

const NOT_AVAILABLE: &str = "N/A";

// --- upstream shapes ---

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbMovie>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbDetail {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
}

impl OmdbDetail {
    pub fn todo_task(&self) -> String {
        format!("Watch {} ({})", self.title, self.year)
    }

    pub fn cast(&self) -> Option<String> {
        self.actors
            .clone()
            .filter(|a| !a.is_empty() && a != NOT_AVAILABLE)
    }
}

/// True when the upstream payload reports `"Response": "False"`.
pub(crate) fn upstream_failed(response: Option<&str>) -> bool {
    response.is_some_and(|r| r.eq_ignore_ascii_case("false"))
}

// --- our shapes ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: String,
    #[serde(rename = "imdbId")]
    pub imdb_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub poster: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieSearchResponse {
    pub total: u64,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

pub fn poster_url(cfg: &MovieConfig, imdb_id: &str, upstream_poster: &str) -> String {
    if upstream_poster == NOT_AVAILABLE {
        return PLACEHOLDER_POSTER.to_string();
    }
    cfg.poster_url
        .replace("{id}", imdb_id)
        .replace("{key}", &cfg.api_key)
}

pub fn reshape(page: OmdbSearchResponse, cfg: &MovieConfig) -> MovieSearchResponse {
    if upstream_failed(page.response.as_deref()) {
        return MovieSearchResponse {
            total: 0,
            movies: Vec::new(),
        };
    }
    let total = page
        .total_results
        .as_deref()
        .and_then(|t| t.parse().ok())
        .unwrap_or(page.search.len() as u64);
    let movies = page
        .search
        .into_iter()
        .map(|m| Movie {
            poster: poster_url(cfg, &m.imdb_id, &m.poster),
            title: m.title,
            year: m.year,
            imdb_id: m.imdb_id,
            kind: m.kind,
        })
        .collect();
    MovieSearchResponse { total, movies }
}
