use axum::{
    Json, Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::{Deserialize, Serialize};
use solar_core::{ForecastError, RadiationPayload, radiation_for};
use std::sync::OnceLock;
use tower_http::trace::TraceLayer;

use crate::{page, state::AppState};

static INDEX_HTML: OnceLock<String> = OnceLock::new();

/// Assemble the dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/radiation", get(radiation))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML.get_or_init(page::render_index).as_str())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct RadiationQuery {
    provincia: Option<String>,
}

/// Either the chart data or `{"error": ...}`; both are sent with 200 OK.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RadiationResponse {
    Payload(RadiationPayload),
    Error { error: String },
}

async fn radiation(
    State(state): State<AppState>,
    Query(query): Query<RadiationQuery>,
) -> Json<RadiationResponse> {
    let provincia = query.provincia.unwrap_or_default();

    match radiation_for(state.provider.as_ref(), &provincia).await {
        Ok(payload) => Json(RadiationResponse::Payload(payload)),
        Err(err) => {
            match &err {
                ForecastError::UnknownProvince(name) => {
                    tracing::info!(provincia = %name, "rejected unknown province");
                }
                ForecastError::Upstream(upstream) => {
                    tracing::warn!(provincia = %provincia, "radiation forecast failed: {upstream}");
                }
            }
            Json(RadiationResponse::Error { error: err.to_string() })
        }
    }
}
