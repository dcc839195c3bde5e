use std::sync::Arc;

use crate::services::artifacts::ArtifactStore;

/// Shared application state: the once-loaded artifact store. Cloning is
/// cheap; every handler sees the same read-only scaler/model pair, or the
/// same cached failure when the service runs in degraded mode.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
}

impl AppState {
    pub fn new(artifacts: ArtifactStore) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
        }
    }

    pub fn is_available(&self) -> bool {
        self.artifacts.is_available()
    }
}
