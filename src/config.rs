use std::path::PathBuf;

use serde::Deserialize;

fn default_port() -> u16 {
    3000
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.onnx")
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("scaler.json")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

/// Locations of the two serialized artifacts. Defaults co-locate them with
/// the server binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactConfig {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
