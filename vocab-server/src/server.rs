use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::coordinator::Coordinator;
use crate::error::VocabError;
use crate::word::Word;

#[derive(Clone)]
struct AppState {
    coordinator: Arc<Coordinator>,
}

/// Build the HTTP surface: the list, search and add operations plus a
/// liveness probe. CORS is wide open since the UI is served separately.
pub fn build_router(coordinator: Arc<Coordinator>) -> Router {
    Router::new()
        .route("/words", get(list_words).post(add_word))
        .route("/words/search", get(search_words))
        .route("/health", get(health))
        .with_state(AppState { coordinator })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

async fn list_words(State(state): State<AppState>) -> Result<Json<Vec<Word>>, AppError> {
    Ok(Json(state.coordinator.list_words().await?))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search_words(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Word>>, AppError> {
    Ok(Json(state.coordinator.search_words(&params.q).await?))
}

#[derive(Debug, Deserialize)]
struct AddWordRequest {
    text: String,
}

async fn add_word(
    State(state): State<AppState>,
    Json(request): Json<AddWordRequest>,
) -> Result<Json<Word>, AppError> {
    Ok(Json(state.coordinator.add_word(&request.text).await?))
}

/// Translates coordinator errors into HTTP responses with a JSON body of
/// the form `{"error": "..."}`.
struct AppError(VocabError);

impl From<VocabError> for AppError {
    fn from(error: VocabError) -> Self {
        Self(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
