use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::config::ScoringConfig;
use crate::suggestions::router::{score_handler, suggest_handler};
use crate::suggestions::SuggestionService;

fn post_json(uri: &str, body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("request builds")
}

fn character_json() -> Value {
    json!({
        "attributes": { "str": 0, "dex": 3 },
        "primary_role": "striker",
        "playstyle_hints": ["ranged-preferred"],
        "proficiencies": { "Pistols": true, "Rifles": true }
    })
}

#[tokio::test]
async fn suggestions_route_returns_ranked_items() {
    let router = router_with_service(build_service(ScoringConfig::default()));

    let response = router
        .oneshot(post_json(
            "/api/v1/suggestions",
            json!({ "character": character_json(), "limit": 2 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total_candidates"), Some(&json!(6)));
    let suggestions = payload
        .get("suggestions")
        .and_then(Value::as_array)
        .expect("suggestions array");
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].get("rank"), Some(&json!(1)));
    let breakdown = suggestions[0].get("breakdown").expect("breakdown present");
    assert!(breakdown.get("final_score").and_then(Value::as_u64).is_some());
    assert!(breakdown.get("tier").is_some());
}

#[tokio::test]
async fn score_route_returns_a_breakdown() {
    let router = router_with_service(build_service(ScoringConfig::default()));

    let response = router
        .oneshot(post_json(
            "/api/v1/items/br-1/score",
            json!({ "character": character_json(), "implied_role": "sniper" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("item_id"), Some(&json!("br-1")));
    assert_eq!(
        payload.pointer("/breakdown/components/role_alignment/score"),
        Some(&json!(25))
    );
}

#[tokio::test]
async fn score_route_returns_not_found_for_unknown_items() {
    let router = router_with_service(build_service(ScoringConfig::default()));

    let response = router
        .oneshot(post_json(
            "/api/v1/items/unobtainium/score",
            json!({ "character": character_json() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("item_id"), Some(&json!("unobtainium")));
}

#[tokio::test]
async fn suggest_handler_returns_unprocessable_for_zero_limit() {
    let service = Arc::new(build_service(ScoringConfig::default()));

    let response = suggest_handler::<MemoryCatalog>(
        State(service),
        axum::Json(suggestion_request(Some(0))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn score_handler_returns_internal_error_when_catalog_is_down() {
    let service = Arc::new(SuggestionService::new(
        Arc::new(UnavailableCatalog),
        ScoringConfig::default(),
    ));

    let response = score_handler::<UnavailableCatalog>(
        State(service),
        Path("bp-heavy".to_string()),
        axum::Json(score_request()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("armory offline"));
}
