//! Inference adapter: fixed-order record assembly → scaling → prediction.
//!
//! Performs no validation and no clamping; out-of-range inputs flow straight
//! through and the model output is reported as-is, negative values included.

use crate::errors::PredictionError;
use crate::models::prediction::PredictionRequest;
use crate::services::artifacts::{ArtifactPair, Predictor, Transformer};

/// Run one prediction. Deterministic: identical request and identical
/// backends yield identical output.
pub fn predict(
    request: &PredictionRequest,
    transformer: &impl Transformer,
    predictor: &impl Predictor,
) -> Result<f64, PredictionError> {
    let row = request.to_row();
    let normalized = transformer.transform(&row)?;
    predictor.predict(&normalized)
}

/// Convenience wrapper over a loaded artifact pair.
pub fn predict_with(
    artifacts: &ArtifactPair,
    request: &PredictionRequest,
) -> Result<f64, PredictionError> {
    predict(request, &artifacts.scaler, &artifacts.model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prediction::NUM_FEATURES;

    /// Pass-through transformer, stands in for a fitted scaler.
    struct Identity;

    impl Transformer for Identity {
        fn transform(
            &self,
            row: &[f64; NUM_FEATURES],
        ) -> Result<[f64; NUM_FEATURES], PredictionError> {
            Ok(*row)
        }
    }

    /// Weighted-sum backend with distinct per-column weights, so any column
    /// misordering changes the output.
    struct WeightedSum;

    impl Predictor for WeightedSum {
        fn predict(&self, row: &[f64; NUM_FEATURES]) -> Result<f64, PredictionError> {
            let weights = [1.0, 10.0, 100.0, 1000.0, 10000.0, 100000.0];
            Ok(row.iter().zip(weights).map(|(v, w)| v * w).sum())
        }
    }

    struct FailingBackend;

    impl Predictor for FailingBackend {
        fn predict(&self, _row: &[f64; NUM_FEATURES]) -> Result<f64, PredictionError> {
            Err(PredictionError::BadShape("record shape rejected".to_string()))
        }
    }

    #[test]
    fn test_predict_is_deterministic() {
        let request = PredictionRequest::default();
        let a = predict(&request, &Identity, &WeightedSum).unwrap();
        let b = predict(&request, &Identity, &WeightedSum).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_predict_feeds_columns_in_declared_order() {
        let request = PredictionRequest {
            distance_to_solar_noon: 0.5,
            temperature: 20.0,
            sky_cover: 1,
            visibility: 12.0,
            humidity: 40,
            wind_speed: 6.0,
        };
        let out = predict(&request, &Identity, &WeightedSum).unwrap();
        // 0.5*1 + 20*10 + 1*100 + 12*1000 + 40*10000 + 6*100000
        assert_eq!(out, 0.5 + 200.0 + 100.0 + 12_000.0 + 400_000.0 + 600_000.0);
    }

    #[test]
    fn test_predict_does_not_mutate_request() {
        let request = PredictionRequest::default();
        let before = request.clone();
        predict(&request, &Identity, &WeightedSum).unwrap();
        assert_eq!(request.to_row(), before.to_row());
    }

    #[test]
    fn test_valid_range_inputs_stay_finite() {
        // Corners of the valid input space
        let corners = [
            (0.0, -10.0, 0u8, 0.0, 0u8, 0.0),
            (1.6, 60.0, 4, 20.0, 100, 20.0),
            (0.3, 25.0, 2, 10.0, 45, 3.5),
        ];
        for (d, t, s, v, h, w) in corners {
            let request = PredictionRequest {
                distance_to_solar_noon: d,
                temperature: t,
                sky_cover: s,
                visibility: v,
                humidity: h,
                wind_speed: w,
            };
            let out = predict(&request, &Identity, &WeightedSum).unwrap();
            assert!(out.is_finite(), "non-finite output for {request:?}");
        }
    }

    #[test]
    fn test_out_of_range_inputs_are_not_rejected() {
        // The adapter trusts its caller: nonsensical values still flow through
        let request = PredictionRequest {
            distance_to_solar_noon: -5.0,
            temperature: 900.0,
            sky_cover: 77,
            visibility: -1.0,
            humidity: 255,
            wind_speed: 1e6,
        };
        assert!(predict(&request, &Identity, &WeightedSum).is_ok());
    }

    #[test]
    fn test_backend_failure_propagates() {
        let request = PredictionRequest::default();
        let err = predict(&request, &Identity, &FailingBackend).unwrap_err();
        assert!(matches!(err, PredictionError::BadShape(_)));
    }
}
