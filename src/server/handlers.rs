//! HTTP request handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use tracing::debug;

use crate::error::InferenceError;

use super::error::{Result, ServerError};
use super::metadata::{ApiInfo, HealthStatus, VersionInfo, Welcome};
use super::schema::{decode_json_body, PredictionRequest, PredictionResponse};
use super::state::AppState;

// ============================================================================
// Prediction
// ============================================================================

pub async fn predict(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResponse>> {
    let bytes = payload?;
    // A missing Content-Type is read as JSON
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let body = decode_json_body(content_type, &bytes).map_err(ServerError::Validation)?;
    let request = PredictionRequest::from_json(&body).map_err(ServerError::Validation)?;

    let labels = state.model.predict(&request.to_array())?;
    let predicted_class = labels.into_iter().next().ok_or(InferenceError::EmptyOutput)?;

    debug!(predicted_class = %predicted_class, "Prediction served");
    Ok(Json(PredictionResponse { predicted_class }))
}

// ============================================================================
// Static metadata
// ============================================================================

pub async fn root(State(state): State<Arc<AppState>>) -> Json<Welcome> {
    Json(state.metadata.welcome.clone())
}

pub async fn version(State(state): State<Arc<AppState>>) -> Json<VersionInfo> {
    Json(state.metadata.version.clone())
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(state.metadata.health.clone())
}

pub async fn api_info(State(state): State<Arc<AppState>>) -> Json<ApiInfo> {
    Json(state.metadata.info.clone())
}
