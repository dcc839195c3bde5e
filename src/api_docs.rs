use utoipa::OpenApi;

use crate::controllers::predict_controller;
use crate::errors;
use crate::models::prediction;

#[derive(OpenApi)]
#[openapi(
    paths(
        predict_controller::predict,
        predict_controller::get_features,
        predict_controller::get_model_info,
        predict_controller::get_health
    ),
    components(
        schemas(
            prediction::PredictionRequest,
            prediction::PredictionResponse,
            prediction::PredictionResult,
            prediction::ConditionLabel,
            prediction::FeatureCatalog,
            prediction::FeatureInfo,
            prediction::SkyCoverLevel,
            prediction::ModelInfo,
            prediction::HealthStatus,
            errors::ErrorResponse
        )
    ),
    tags(
        (name = "solar-power-predictor", description = "Solar Power Prediction API")
    )
)]
pub struct ApiDoc;
