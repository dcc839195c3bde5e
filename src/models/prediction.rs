use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Feature schema ──────────────────────────────────────────────────────────

/// Number of input features expected by the scaler/model pair.
pub const NUM_FEATURES: usize = 6;

/// Authoritative column order of the input record. The scaler and the model
/// were fitted on exactly this order; the scaler artifact carries its own
/// fitted column list which is checked against this constant at load time.
pub const FEATURE_COLUMNS: [&str; NUM_FEATURES] = [
    "distance_to_solar_noon",
    "temperature",
    "sky_cover",
    "visibility",
    "humidity",
    "wind_speed",
];

// ─── Prediction request ──────────────────────────────────────────────────────

/// One set of environmental measurements for a 3-hour observation window.
/// All six fields are required; the form UI pre-fills the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionRequest {
    /// Angular distance to solar noon (radians): 0 = exactly noon, ~1.57 = sunrise/sunset
    pub distance_to_solar_noon: f64,
    /// Ambient temperature (°C)
    pub temperature: f64,
    /// Sky cover on the 0-4 okta-style scale (0 = clear, 4 = overcast)
    pub sky_cover: u8,
    /// Horizontal visibility (km)
    pub visibility: f64,
    /// Relative humidity (%)
    pub humidity: u8,
    /// Wind speed (m/s)
    pub wind_speed: f64,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            distance_to_solar_noon: 0.3,
            temperature: 25.0,
            sky_cover: 0,
            visibility: 10.0,
            humidity: 45,
            wind_speed: 3.5,
        }
    }
}

impl PredictionRequest {
    /// Assemble the single-row record in the fixed [`FEATURE_COLUMNS`] order.
    /// Integer fields widen to f64; no scaling happens here.
    pub fn to_row(&self) -> [f64; NUM_FEATURES] {
        [
            self.distance_to_solar_noon,
            self.temperature,
            self.sky_cover as f64,
            self.visibility,
            self.humidity as f64,
            self.wind_speed,
        ]
    }
}

// ─── Prediction result ───────────────────────────────────────────────────────

/// Qualitative solar condition, derived from sky cover and distance to solar
/// noon only — independent of the model's numeric output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionLabel {
    Ideal,
    Moderate,
    Low,
}

impl ConditionLabel {
    /// First matching rule wins:
    ///  1. IDEAL    — clear sky AND close to solar noon
    ///  2. LOW      — heavy cover OR far from solar noon
    ///  3. MODERATE — everything else
    pub fn classify(sky_cover: u8, distance_to_solar_noon: f64) -> Self {
        if sky_cover == 0 && distance_to_solar_noon < 0.3 {
            ConditionLabel::Ideal
        } else if sky_cover >= 3 || distance_to_solar_noon > 1.2 {
            ConditionLabel::Low
        } else {
            ConditionLabel::Moderate
        }
    }
}

/// Derived prediction figures. Raw model output plus pure unit conversions;
/// values are unrounded — rounding is a rendering concern.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PredictionResult {
    /// Model output: Joules generated over the 3-hour period (may be negative,
    /// the model is unconstrained and no clamping is applied)
    pub raw_joules: f64,
    /// raw_joules / 3,600,000
    pub kwh_equivalent: f64,
    /// raw_joules / 1,000
    pub kilojoules: f64,
    /// kwh_equivalent × 8 — assumes eight 3-hour periods of equivalent output
    pub kwh_per_day_estimate: f64,
    pub condition: ConditionLabel,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionResponse {
    pub timestamp: DateTime<Utc>,
    /// Echo of the measurements the prediction was computed from
    pub input: PredictionRequest,
    pub prediction: PredictionResult,
}

// ─── REST API response types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct FeatureInfo {
    pub name: String,
    pub label: String,
    pub unit: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default: f64,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkyCoverLevel {
    pub value: u8,
    pub label: String,
}

/// Static feature schema served to the form UI: column order, per-feature
/// ranges/defaults and the sky cover level labels.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeatureCatalog {
    pub columns: Vec<String>,
    pub features: Vec<FeatureInfo>,
    pub sky_cover_levels: Vec<SkyCoverLevel>,
}

impl FeatureCatalog {
    pub fn new() -> Self {
        let defaults = PredictionRequest::default();
        Self {
            columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            features: vec![
                FeatureInfo {
                    name: "distance_to_solar_noon".into(),
                    label: "Distance to Solar Noon".into(),
                    unit: Some("rad".into()),
                    min: Some(0.0),
                    max: Some(1.6),
                    default: defaults.distance_to_solar_noon,
                    description: "0 = exactly noon, ~1.57 = sunrise/sunset; closer to noon means higher output".into(),
                },
                FeatureInfo {
                    name: "temperature".into(),
                    label: "Temperature".into(),
                    unit: Some("°C".into()),
                    min: Some(-10.0),
                    max: Some(60.0),
                    default: defaults.temperature,
                    description: "Higher temperature under clear sky correlates with higher output".into(),
                },
                FeatureInfo {
                    name: "sky_cover".into(),
                    label: "Sky Cover".into(),
                    unit: None,
                    min: Some(0.0),
                    max: Some(4.0),
                    default: defaults.sky_cover as f64,
                    description: "0-4 cloud cover scale; more cover means lower output".into(),
                },
                FeatureInfo {
                    name: "visibility".into(),
                    label: "Visibility".into(),
                    unit: Some("km".into()),
                    min: Some(0.0),
                    max: Some(20.0),
                    default: defaults.visibility,
                    description: "Higher visibility means higher output".into(),
                },
                FeatureInfo {
                    name: "humidity".into(),
                    label: "Humidity".into(),
                    unit: Some("%".into()),
                    min: Some(0.0),
                    max: Some(100.0),
                    default: defaults.humidity as f64,
                    description: "Higher humidity means lower output".into(),
                },
                FeatureInfo {
                    name: "wind_speed".into(),
                    label: "Wind Speed".into(),
                    unit: Some("m/s".into()),
                    min: Some(0.0),
                    max: Some(20.0),
                    default: defaults.wind_speed,
                    description: "Weak positive effect on output".into(),
                },
            ],
            sky_cover_levels: vec![
                SkyCoverLevel { value: 0, label: "Clear".into() },
                SkyCoverLevel { value: 1, label: "Mostly Clear".into() },
                SkyCoverLevel { value: 2, label: "Partly Cloudy".into() },
                SkyCoverLevel { value: 3, label: "Mostly Cloudy".into() },
                SkyCoverLevel { value: 4, label: "Overcast".into() },
            ],
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelInfo {
    pub available: bool,
    pub model_path: String,
    pub scaler_path: String,
    pub feature_columns: Vec<String>,
    pub input_arity: usize,
    /// Load failure detail, present only when `available` is false
    pub load_error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub artifacts_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_follows_feature_columns() {
        // Pairwise-distinct values so any column swap would change the row
        let req = PredictionRequest {
            distance_to_solar_noon: 0.1,
            temperature: 21.0,
            sky_cover: 2,
            visibility: 13.0,
            humidity: 47,
            wind_speed: 5.5,
        };
        let row = req.to_row();
        assert_eq!(FEATURE_COLUMNS[0], "distance_to_solar_noon");
        assert_eq!(row[0], 0.1);
        assert_eq!(FEATURE_COLUMNS[1], "temperature");
        assert_eq!(row[1], 21.0);
        assert_eq!(FEATURE_COLUMNS[2], "sky_cover");
        assert_eq!(row[2], 2.0);
        assert_eq!(FEATURE_COLUMNS[3], "visibility");
        assert_eq!(row[3], 13.0);
        assert_eq!(FEATURE_COLUMNS[4], "humidity");
        assert_eq!(row[4], 47.0);
        assert_eq!(FEATURE_COLUMNS[5], "wind_speed");
        assert_eq!(row[5], 5.5);
    }

    #[test]
    fn test_defaults_within_valid_ranges() {
        let d = PredictionRequest::default();
        assert!((0.0..=1.6).contains(&d.distance_to_solar_noon));
        assert!((-10.0..=60.0).contains(&d.temperature));
        assert!(d.sky_cover <= 4);
        assert!((0.0..=20.0).contains(&d.visibility));
        assert!(d.humidity <= 100);
        assert!((0.0..=20.0).contains(&d.wind_speed));
    }

    #[test]
    fn test_condition_label_boundaries() {
        // Clear sky just inside the noon window
        assert_eq!(ConditionLabel::classify(0, 0.29), ConditionLabel::Ideal);
        // Exactly at the boundary falls out of IDEAL
        assert_eq!(ConditionLabel::classify(0, 0.30), ConditionLabel::Moderate);
        // Heavy cover wins regardless of distance
        assert_eq!(ConditionLabel::classify(3, 0.1), ConditionLabel::Low);
        assert_eq!(ConditionLabel::classify(4, 0.0), ConditionLabel::Low);
        // Distance rule fires on its own
        assert_eq!(ConditionLabel::classify(2, 1.21), ConditionLabel::Low);
        assert_eq!(ConditionLabel::classify(1, 0.5), ConditionLabel::Moderate);
    }

    #[test]
    fn test_condition_label_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&ConditionLabel::Ideal).unwrap(),
            "\"IDEAL\""
        );
        assert_eq!(
            serde_json::to_string(&ConditionLabel::Low).unwrap(),
            "\"LOW\""
        );
    }

    #[test]
    fn test_feature_catalog_matches_column_order() {
        let catalog = FeatureCatalog::new();
        assert_eq!(catalog.columns.len(), NUM_FEATURES);
        let names: Vec<&str> = catalog.features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, FEATURE_COLUMNS.to_vec());
        assert_eq!(catalog.sky_cover_levels.len(), 5);
    }
}
