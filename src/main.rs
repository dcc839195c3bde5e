mod api_docs;
mod config;
mod controllers;
mod errors;
mod models;
mod routes;
mod services;
mod shared_state;

use std::net::SocketAddr;

use axum::{response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::predict_routes::api_routes;
use crate::services::artifacts::ArtifactStore;
use crate::shared_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("config.json not loaded ({e}); using defaults");
            Config::default()
        }
    };

    // 2. Load artifacts once; a failure leaves the service in degraded mode
    //    with prediction disabled instead of crashing.
    let store = ArtifactStore::new(config.artifacts.clone());
    match store.get() {
        Ok(_) => tracing::info!(
            model = %config.artifacts.model_path.display(),
            scaler = %config.artifacts.scaler_path.display(),
            "artifacts loaded"
        ),
        Err(e) => tracing::error!("prediction disabled: {e}"),
    }
    let state = AppState::new(store);

    // 3. Start Axum HTTP server
    let app = Router::new()
        .nest("/api", api_routes(state))
        .route(
            "/scalar",
            get(|| async { Html(Scalar::new(ApiDoc::openapi()).to_html()) }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("API server listening on http://{addr}");
    tracing::info!("Scalar UI: http://{addr}/scalar");

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
