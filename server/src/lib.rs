use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use recommender_core::store::{load_corpus, CorpusStore, JsonCorpusStore, SledCorpusStore};
use recommender_core::{IndexHandle, LinguisticResources, RecommendError, RecommendationSet, RecommenderConfig, SearchIndex};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct RecommendParams {
    pub title: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<IndexHandle>,
}

/// Where the course table is read from at startup.
#[derive(Debug, Clone)]
pub enum CorpusSource {
    Json(PathBuf),
    Sled(PathBuf),
}

/// Load the corpus once and build the index that will be served.
pub fn load_index(source: &CorpusSource, config: RecommenderConfig) -> Result<SearchIndex> {
    let store: Box<dyn CorpusStore> = match source {
        CorpusSource::Json(path) => Box::new(JsonCorpusStore::new(path)),
        CorpusSource::Sled(path) => Box::new(SledCorpusStore::open(path)?),
    };
    let corpus = load_corpus(store.as_ref())?;
    let resources = LinguisticResources::english();
    Ok(SearchIndex::build(corpus, &resources, config))
}

pub fn build_app(index: Arc<IndexHandle>) -> Router {
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

    Router::new()
        .route("/", get(form_handler))
        .route("/health", get(|| async { "ok" }))
        .route("/recommend", get(recommend_handler))
        .with_state(AppState { index })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// JSON error body `{"error": ...}` with the status matching the failure.
pub struct ApiError(pub RecommendError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RecommendError::MissingParameter => StatusCode::BAD_REQUEST,
            RecommendError::NotFound => StatusCode::NOT_FOUND,
            RecommendError::IndexOutOfRange { .. } => {
                tracing::error!(error = %self.0, "ranker received an invalid row");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self { ApiError(err) }
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendationSet>, ApiError> {
    let title = params.title.unwrap_or_default();
    if title.is_empty() {
        return Err(RecommendError::MissingParameter.into());
    }
    let index = state.index.current();
    let set = index.recommend_by_title(&title)?;
    Ok(Json(set))
}

async fn form_handler() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<title>Course Recommendation</title>
<h1>Course Recommendation System</h1>
<form action="/recommend" method="get">
    <label for="title">Enter Course Title:</label>
    <input type="text" id="title" name="title">
    <input type="submit" value="Get Recommendations">
</form>
"#,
    )
}
