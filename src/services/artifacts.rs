/// ============================================================
///  Artifact loading — fitted scaler + regression model
///
///  Two files ship next to the binary:
///   - scaler.json  – fitted standardization parameters (per-column
///                    mean/scale plus the fitted column list)
///   - model.onnx   – regression model exported to ONNX, input
///                    shape [1, 6], one scalar output
///
///  Both are loaded at most once per process through `ArtifactStore`
///  and shared read-only afterwards. A failed load is cached the
///  same way: the service keeps running with prediction disabled.
/// ============================================================

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use tract_onnx::prelude::*;

use crate::config::ArtifactConfig;
use crate::errors::{ArtifactLoadError, PredictionError};
use crate::models::prediction::{FEATURE_COLUMNS, NUM_FEATURES};

/// Maps a raw fixed-width record into the normalized space the model was
/// trained on. Must not mutate its input.
pub trait Transformer: Send + Sync {
    fn transform(&self, row: &[f64; NUM_FEATURES]) -> Result<[f64; NUM_FEATURES], PredictionError>;
}

/// Maps a normalized fixed-width record to a single continuous value.
pub trait Predictor: Send + Sync {
    fn predict(&self, row: &[f64; NUM_FEATURES]) -> Result<f64, PredictionError>;
}

// ─── Scaler backend ──────────────────────────────────────────

/// Standardization transform `(x - mean) / scale`, one pair per column,
/// deserialized from the scaler JSON artifact.
#[derive(Debug, Deserialize)]
pub struct StandardScaler {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        let file = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| ArtifactLoadError::Read {
            file: file.clone(),
            source,
        })?;
        Self::parse(&raw, &file)
    }

    fn parse(raw: &str, file: &str) -> Result<Self, ArtifactLoadError> {
        let scaler: StandardScaler =
            serde_json::from_str(raw).map_err(|source| ArtifactLoadError::MalformedScaler {
                file: file.to_string(),
                source,
            })?;

        // The fitted column list is the ground truth for input ordering;
        // reject an artifact that disagrees with the request schema.
        if scaler.columns != FEATURE_COLUMNS {
            return Err(ArtifactLoadError::ColumnMismatch {
                file: file.to_string(),
                expected: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: scaler.columns,
            });
        }
        for (what, len) in [("mean", scaler.mean.len()), ("scale", scaler.scale.len())] {
            if len != NUM_FEATURES {
                return Err(ArtifactLoadError::BadArity {
                    file: file.to_string(),
                    what,
                    len,
                    expected: NUM_FEATURES,
                });
            }
        }
        if let Some(i) = scaler.scale.iter().position(|s| *s == 0.0) {
            return Err(ArtifactLoadError::ZeroScale {
                file: file.to_string(),
                column: scaler.columns[i].clone(),
            });
        }
        Ok(scaler)
    }
}

impl Transformer for StandardScaler {
    fn transform(&self, row: &[f64; NUM_FEATURES]) -> Result<[f64; NUM_FEATURES], PredictionError> {
        let mut out = [0.0; NUM_FEATURES];
        for i in 0..NUM_FEATURES {
            out[i] = (row[i] - self.mean[i]) / self.scale[i];
        }
        Ok(out)
    }
}

// ─── Model backend ───────────────────────────────────────────

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX regression model loaded via tract. Input `[1, 6]` f32, output a
/// single scalar (Joules per 3-hour period).
#[derive(Debug)]
pub struct OnnxModel {
    plan: TractModel,
}

impl OnnxModel {
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        let file = path.display().to_string();
        let bytes = fs::read(path).map_err(|source| ArtifactLoadError::Read {
            file: file.clone(),
            source,
        })?;

        let plan = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(bytes))
            .and_then(|m| m.with_input_fact(0, f32::fact([1, NUM_FEATURES]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| ArtifactLoadError::MalformedModel {
                file: file.clone(),
                message: e.to_string(),
            })?;

        let model = Self { plan };

        // Probe with a dummy forward: the graph must emit exactly one scalar.
        let scalar = model
            .forward(&[0.0; NUM_FEATURES])
            .map_err(|e| ArtifactLoadError::MalformedModel {
                file: file.clone(),
                message: e.to_string(),
            })?;
        if !scalar.is_finite() {
            tracing::warn!("probe forward on {file} produced a non-finite value");
        }

        Ok(model)
    }

    fn forward(&self, row: &[f64; NUM_FEATURES]) -> Result<f64, PredictionError> {
        let data: Vec<f32> = row.iter().map(|v| *v as f32).collect();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, NUM_FEATURES), data)
            .map_err(|e| PredictionError::BadShape(e.to_string()))?
            .into();

        let result = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| PredictionError::Backend(e.to_string()))?;

        let output = result
            .first()
            .ok_or_else(|| PredictionError::Backend("model produced no output".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| PredictionError::Backend(e.to_string()))?;

        if view.len() != 1 {
            return Err(PredictionError::Backend(format!(
                "model emitted {} values, expected a single scalar",
                view.len()
            )));
        }
        Ok(view.iter().next().copied().unwrap_or(0.0) as f64)
    }
}

impl Predictor for OnnxModel {
    fn predict(&self, row: &[f64; NUM_FEATURES]) -> Result<f64, PredictionError> {
        self.forward(row)
    }
}

// ─── Loaded pair + once-only store ───────────────────────────

/// The fitted scaler and model, immutable after load.
#[derive(Debug)]
pub struct ArtifactPair {
    pub scaler: StandardScaler,
    pub model: OnnxModel,
}

impl ArtifactPair {
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactLoadError> {
        let scaler = StandardScaler::load(&config.scaler_path)?;
        let model = OnnxModel::load(&config.model_path)?;
        Ok(Self { scaler, model })
    }
}

/// Process-wide memoization of the artifact load. The first caller performs
/// the load; a racing second caller blocks on the `OnceLock` and reuses the
/// outcome, success or failure. No retry: a missing file stays missing.
pub struct ArtifactStore {
    config: ArtifactConfig,
    cell: OnceLock<Result<ArtifactPair, ArtifactLoadError>>,
}

impl ArtifactStore {
    pub fn new(config: ArtifactConfig) -> Self {
        Self {
            config,
            cell: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Result<&ArtifactPair, &ArtifactLoadError> {
        self.cell
            .get_or_init(|| ArtifactPair::load(&self.config))
            .as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.get().is_ok()
    }

    pub fn config(&self) -> &ArtifactConfig {
        &self.config
    }

    /// Actionable message for the degraded mode, naming both expected files.
    pub fn unavailable_message(&self, err: &ArtifactLoadError) -> String {
        format!(
            "could not load model artifacts: {err}. Make sure `{}` and `{}` are present next to the server binary.",
            self.config.model_path.display(),
            self.config.scaler_path.display()
        )
    }
}
