use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use parking_lot::RwLock;
use search_core::corpus::load_corpus;
use search_core::{render, AdvancedSearch, ResultSet, SearchIndexes};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
    #[serde(default = "default_option")]
    pub option: i64,
    #[serde(default)]
    pub value: String,
}
fn default_option() -> i64 { 6 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub option: i64,
    pub took_s: f64,
    pub total_hits: usize,
    pub message: String,
    pub results: ResultSet,
}

#[derive(Serialize)]
pub struct ArticleResponse {
    pub title: String,
    pub author: String,
    pub timestamp: i64,
    pub length: u64,
    pub year: Option<i64>,
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub articles: usize,
    pub titles: usize,
    pub keywords: usize,
}

/// Startup configuration for the HTTP surface.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub corpus: PathBuf,
    /// Enables `/admin/reload` when set.
    pub admin_token: Option<String>,
    /// Allowed CORS origins; any origin when empty.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Corpus path from the caller, the rest from `ADMIN_TOKEN` and
    /// `CORS_ALLOW_ORIGIN` (comma-separated).
    pub fn from_env(corpus: impl Into<PathBuf>) -> Self {
        let cors_origins = std::env::var("CORS_ALLOW_ORIGIN")
            .map(|val| val.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        Self { corpus: corpus.into(), admin_token: std::env::var("ADMIN_TOKEN").ok(), cors_origins }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: PathBuf,
    pub indexes: Arc<RwLock<SearchIndexes>>,
    pub admin_token: Option<String>,
}

pub fn build_app(config: AppConfig) -> Result<Router> {
    // Indexes are built once here and only replaced by an explicit reload.
    let corpus = load_corpus(&config.corpus)?;
    let indexes = SearchIndexes::build(&corpus);
    tracing::info!(titles = indexes.titles.len(), keywords = indexes.keywords.len(), "indexes built");
    let app_state = AppState { corpus: config.corpus, indexes: Arc::new(RwLock::new(indexes)), admin_token: config.admin_token };

    let origins: Vec<_> = config.cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        // Wildcard so titles containing '/' still resolve.
        .route("/article/*title", get(article_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let advanced = AdvancedSearch::from_option(params.option, params.value);
    let results = state.indexes.read().query(&params.keyword, &advanced);
    let elapsed = start.elapsed();
    Json(SearchResponse {
        keyword: params.keyword,
        option: params.option,
        took_s: elapsed.as_secs_f64(),
        total_hits: results.total_hits(),
        message: render(&results),
        results,
    })
}

pub async fn article_handler(State(state): State<AppState>, Path(title): Path<String>) -> Result<Json<ArticleResponse>, (StatusCode, String)> {
    let indexes = state.indexes.read();
    match indexes.titles.get(&title) {
        Some(info) => Ok(Json(ArticleResponse {
            author: info.author.clone(),
            timestamp: info.timestamp,
            length: info.length,
            year: info.year(),
            title,
        })),
        None => Err((StatusCode::NOT_FOUND, format!("no article titled {title:?}"))),
    }
}

async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let corpus = load_corpus(&state.corpus).map_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "corpus reload failed");
        (StatusCode::INTERNAL_SERVER_ERROR, format!("reload failed: {e:#}"))
    })?;
    let rebuilt = SearchIndexes::build(&corpus);
    let response = ReloadResponse { articles: corpus.len(), titles: rebuilt.titles.len(), keywords: rebuilt.keywords.len() };
    *state.indexes.write() = rebuilt;
    tracing::info!(articles = response.articles, "indexes rebuilt");
    Ok(Json(response))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
