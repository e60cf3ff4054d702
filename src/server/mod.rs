//! Iris Classifier Server Module
//!
//! HTTP front end for the loaded classifier: one prediction endpoint plus
//! static welcome, version, health and info endpoints.

mod api;
mod error;
mod handlers;
pub mod metadata;
pub mod schema;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use metadata::ServiceMetadata;
pub use schema::{FieldError, PredictionRequest, PredictionResponse, FEATURE_NAMES};
pub use state::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::model;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub max_body_size: usize,
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            model_path: std::env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models/iris_tree.json")),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64 * 1024),
            cors_origin: std::env::var("CORS_ORIGIN").ok(),
        }
    }
}

/// Load the model and start serving.
///
/// The model is loaded before the listener is bound; a load failure is
/// returned to the caller and the server never starts.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    info!(
        model_path = %config.model_path.display(),
        started_at = %start_time.to_rfc3339(),
        "Loading model artifact"
    );

    let model = model::load_model(&config.model_path).map_err(|e| {
        error!(error = %e, "Model failed to load, refusing to start");
        e
    })?;
    model::check_feature_schema(model.as_ref(), &FEATURE_NAMES);

    let state = Arc::new(AppState::new(model));
    let app = create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        pid = std::process::id(),
        max_body_size = config.max_body_size,
        "Iris Classifier API listening"
    );
    info!(url = %format!("http://{}/predict/", addr), "Prediction endpoint available");

    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        let stop_time = chrono::Utc::now();
        let uptime = stop_time.signed_duration_since(start_time);
        info!(
            stopped_at = %stop_time.to_rfc3339(),
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
