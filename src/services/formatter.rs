//! Result formatting: pure unit conversions plus the condition label.
//!
//! No rounding happens here; display precision is the renderer's concern.

use crate::models::prediction::{ConditionLabel, PredictionRequest, PredictionResult};

/// Joules in one kilowatt-hour.
pub const JOULES_PER_KWH: f64 = 3_600_000.0;

/// Number of 3-hour periods folded into the daily estimate. Known rough
/// heuristic carried over from the trained model's framing: it assumes eight
/// periods of equivalent output and ignores night-time zero-output hours.
pub const PERIODS_PER_DAY: f64 = 8.0;

/// Derive the presentation figures from the raw model output and the two
/// request fields the condition label depends on.
pub fn format(request: &PredictionRequest, raw_joules: f64) -> PredictionResult {
    let kwh_equivalent = raw_joules / JOULES_PER_KWH;
    PredictionResult {
        raw_joules,
        kwh_equivalent,
        kilojoules: raw_joules / 1000.0,
        kwh_per_day_estimate: kwh_equivalent * PERIODS_PER_DAY,
        condition: ConditionLabel::classify(request.sky_cover, request.distance_to_solar_noon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(sky_cover: u8, distance: f64) -> PredictionRequest {
        PredictionRequest {
            sky_cover,
            distance_to_solar_noon: distance,
            ..PredictionRequest::default()
        }
    }

    #[test]
    fn test_unit_conversions() {
        let result = format(&request_with(0, 0.1), 26_500.0);
        // Kilojoules is exact scalar arithmetic
        assert_eq!(result.kilojoules * 1000.0, result.raw_joules);
        // kWh round-trips within float tolerance
        assert!((result.kwh_equivalent * JOULES_PER_KWH - result.raw_joules).abs() < 1e-6);
        assert_eq!(result.kwh_per_day_estimate, result.kwh_equivalent * 8.0);
    }

    #[test]
    fn test_negative_output_is_not_clamped() {
        let result = format(&request_with(4, 1.5), -1_234.5);
        assert_eq!(result.raw_joules, -1_234.5);
        assert_eq!(result.kilojoules, -1.2345);
        assert!(result.kwh_equivalent < 0.0);
        assert!(result.kwh_per_day_estimate < 0.0);
    }

    #[test]
    fn test_condition_label_flows_from_request() {
        assert_eq!(format(&request_with(0, 0.29), 0.0).condition, ConditionLabel::Ideal);
        assert_eq!(format(&request_with(0, 0.30), 0.0).condition, ConditionLabel::Moderate);
        assert_eq!(format(&request_with(3, 0.1), 0.0).condition, ConditionLabel::Low);
        assert_eq!(format(&request_with(2, 1.21), 0.0).condition, ConditionLabel::Low);
        assert_eq!(format(&request_with(1, 0.5), 0.0).condition, ConditionLabel::Moderate);
    }

    #[test]
    fn test_label_is_independent_of_model_output() {
        // A clear noon sky stays IDEAL even when the model says zero output
        let low = format(&request_with(0, 0.1), -50_000.0);
        let high = format(&request_with(0, 0.1), 50_000.0);
        assert_eq!(low.condition, high.condition);
    }
}
