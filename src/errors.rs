use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Failure to bring the scaler/model pair into memory. Raised once at load
/// time and cached for the life of the process; every variant names the
/// offending file so the message stays actionable.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactLoadError {
    #[error("cannot read artifact file {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("scaler artifact {file} is not valid JSON: {source}")]
    MalformedScaler {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact {file} is not a loadable ONNX graph: {message}")]
    MalformedModel { file: String, message: String },

    #[error("scaler artifact {file} was fitted on columns {found:?}, expected {expected:?}")]
    ColumnMismatch {
        file: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("scaler artifact {file} carries {len} {what} values, expected {expected}")]
    BadArity {
        file: String,
        what: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("scaler artifact {file} has a zero scale for column {column}")]
    ZeroScale { file: String, column: String },
}

/// Failure raised by a backend during a single prediction. Distinct from
/// load failures: the artifacts are in memory but rejected the record.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("inference backend rejected the input record: {0}")]
    BadShape(String),

    #[error("inference backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Prediction unavailable: {0}")]
    Unavailable(String),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Prediction(err) => {
                tracing::error!("prediction failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "prediction unavailable".to_string())
            }
        };

        (status, axum::Json(ErrorResponse { error: message })).into_response()
    }
}
