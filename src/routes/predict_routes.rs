use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::predict_controller::{get_features, get_health, get_model_info, predict};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/features", get(get_features))
        .route("/model/info", get(get_model_info))
        .route("/health", get(get_health))
        .with_state(state)
}
