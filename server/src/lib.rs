use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use invert_core::corpus::{load_stoplist, DirectoryCorpus};
use invert_core::{evaluate, EngineConfig, InvertedIndex, QueryOutcome, SnippetExtractor, Stoplist};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub message: Option<String>,
    pub outcome: QueryOutcome,
    /// Context window per matching document.
    pub snippets: BTreeMap<String, Vec<String>>,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<InvertedIndex>,
    pub corpus: Arc<DirectoryCorpus>,
    pub config: EngineConfig,
}

pub struct ServerConfig {
    pub corpus: PathBuf,
    pub stoplist: Option<PathBuf>,
    pub engine: EngineConfig,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    // Index the corpus once at startup; it is read-only from here on
    let corpus = DirectoryCorpus::open(&config.corpus)?;
    let stoplist = config.stoplist.as_ref().map(load_stoplist).unwrap_or_else(Stoplist::new);
    let index = corpus.build_index(stoplist);
    let app_state = AppState { index: Arc::new(index), corpus: Arc::new(corpus), config: config.engine };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:name", get(doc_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let outcome = evaluate(&state.index, &params.q);

    // Single-term hits get a window around that term, ranked hits around the first query term
    let targets: Vec<(&str, &str)> = match &outcome {
        QueryOutcome::SingleTerm(report) => {
            report.hits.iter().map(|h| (report.term.as_str(), h.document.as_str())).collect()
        }
        QueryOutcome::Ranked { terms, hits } => match terms.first() {
            Some(first) => hits.iter().map(|h| (first.as_str(), h.document.as_str())).collect(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    };
    let extractor = SnippetExtractor::new(&*state.index, &*state.corpus, &state.config);
    let mut snippets = BTreeMap::new();
    for (term, document) in targets {
        match extractor.snippet(term, document) {
            Ok(words) => {
                snippets.insert(document.to_string(), words);
            }
            Err(err) => tracing::warn!(document, error = %err, "snippet unavailable"),
        }
    }

    let elapsed = start.elapsed();
    let message = outcome.message();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), message, outcome, snippets })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let not_found = || (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })));
    let length = state.index.document_length(&name).ok_or_else(not_found)?;
    let mut obj = serde_json::json!({
        "name": name,
        "length": length,
    });
    match state.corpus.read_document(&name) {
        Ok(text) => obj["text"] = serde_json::Value::String(text),
        Err(err) => tracing::warn!(document = %name, error = %err, "document no longer readable"),
    }
    Ok(Json(obj))
}
