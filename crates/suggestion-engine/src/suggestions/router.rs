use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::repository::{CatalogError, ItemCatalog};
use super::service::{ScoreRequest, SuggestionRequest, SuggestionService, SuggestionServiceError};
use crate::scoring::ItemId;

/// Router builder exposing the ranking and single-item scoring endpoints.
pub fn suggestion_router<C>(service: Arc<SuggestionService<C>>) -> Router
where
    C: ItemCatalog + 'static,
{
    Router::new()
        .route("/api/v1/suggestions", post(suggest_handler::<C>))
        .route("/api/v1/items/:item_id/score", post(score_handler::<C>))
        .with_state(service)
}

pub(crate) async fn suggest_handler<C>(
    State(service): State<Arc<SuggestionService<C>>>,
    axum::Json(request): axum::Json<SuggestionRequest>,
) -> Response
where
    C: ItemCatalog + 'static,
{
    match service.suggest(&request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(SuggestionServiceError::InvalidLimit) => {
            let payload = json!({
                "error": SuggestionServiceError::InvalidLimit.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn score_handler<C>(
    State(service): State<Arc<SuggestionService<C>>>,
    Path(item_id): Path<String>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    C: ItemCatalog + 'static,
{
    let id = ItemId(item_id);
    match service.score(&id, &request) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(SuggestionServiceError::Catalog(CatalogError::NotFound)) => {
            let payload = json!({
                "item_id": id.0,
                "error": "item not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: SuggestionServiceError) -> Response {
    tracing::error!(%error, "suggestion request failed");
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
