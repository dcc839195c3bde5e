use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::errors::{AppError, ErrorResponse};
use crate::models::prediction::{
    FeatureCatalog, HealthStatus, ModelInfo, PredictionRequest, PredictionResponse,
    FEATURE_COLUMNS, NUM_FEATURES,
};
use crate::services::{formatter, inference};
use crate::shared_state::AppState;

/// POST /api/predict
/// Run a solar power prediction
///
/// Feeds the six environmental measurements through the fitted scaler and the
/// regression model and returns the predicted output in Joules per 3-hour
/// period, with derived unit conversions and a qualitative condition label.
#[utoipa::path(
    post,
    path = "/api/predict",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Prediction computed", body = PredictionResponse),
        (status = 503, description = "Model artifacts not loaded, prediction disabled", body = ErrorResponse),
        (status = 500, description = "Inference backend failure", body = ErrorResponse)
    )
)]
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    let artifacts = state
        .artifacts
        .get()
        .map_err(|err| AppError::Unavailable(state.artifacts.unavailable_message(err)))?;

    let raw_joules = inference::predict_with(artifacts, &request)?;
    tracing::debug!(
        raw_joules,
        sky_cover = request.sky_cover,
        distance_to_solar_noon = request.distance_to_solar_noon,
        "prediction computed"
    );

    let prediction = formatter::format(&request, raw_joules);
    Ok(Json(PredictionResponse {
        timestamp: Utc::now(),
        input: request,
        prediction,
    }))
}

/// GET /api/features
/// Describe the input feature schema
///
/// Returns the six features in model column order with their units, valid
/// ranges, defaults and the sky cover level labels. Drives the form UI.
#[utoipa::path(
    get,
    path = "/api/features",
    responses(
        (status = 200, description = "Feature schema in model column order", body = FeatureCatalog)
    )
)]
pub async fn get_features() -> impl IntoResponse {
    Json(FeatureCatalog::new())
}

/// GET /api/model/info
/// Get artifact status
///
/// Reports the configured artifact locations, whether the scaler/model pair
/// loaded, and the load failure detail when it did not.
#[utoipa::path(
    get,
    path = "/api/model/info",
    responses(
        (status = 200, description = "Artifact locations and availability", body = ModelInfo)
    )
)]
pub async fn get_model_info(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.artifacts.config();
    let load_error = state.artifacts.get().err().map(|e| e.to_string());
    Json(ModelInfo {
        available: load_error.is_none(),
        model_path: config.model_path.display().to_string(),
        scaler_path: config.scaler_path.display().to_string(),
        feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        input_arity: NUM_FEATURES,
        load_error,
    })
}

/// GET /api/health
/// Service health
///
/// `degraded` means the HTTP surface is up but prediction is disabled
/// because the artifacts failed to load.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    let artifacts_loaded = state.is_available();
    let status = if artifacts_loaded { "ok" } else { "degraded" };
    (
        StatusCode::OK,
        Json(HealthStatus {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            artifacts_loaded,
        }),
    )
}
