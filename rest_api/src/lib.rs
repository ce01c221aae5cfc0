// rest_api/src/lib.rs

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use lib::{Predictor, TrainingDataset};
use models::{PredictRequest, PredictionResult, RequestError};

pub mod config;
pub use crate::config::{load_rest_api_config, RestApiConfig};

#[derive(Debug, Error)]
pub enum RestApiError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
}

// Implement IntoResponse for RestApiError to convert it into an HTTP response
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            RestApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// Shared state for the Axum application. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

// Handler for POST /predict. The body is parsed whatever its content type.
async fn predict_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResult>, RestApiError> {
    let request = PredictRequest::from_slice(&body).inspect_err(|e| {
        if let RequestError::InvalidJson(detail) = e {
            debug!("Rejected unparseable body: {}", detail);
        }
    })?;
    Ok(Json(state.predictor.predict(&request.symptoms)))
}

// Handler for GET /health
async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

// Handler for GET /version
async fn version_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "version": env!("CARGO_PKG_VERSION") })))
}

/// Routes with CORS open to every origin and per-request tracing.
pub fn build_router(predictor: Arc<Predictor>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/predict", post(predict_handler))
        .route("/health", get(health_check_handler))
        .route("/version", get(version_handler))
        .with_state(AppState { predictor })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Loads the dataset named in `config` and trains the predictor. Any failure
/// here must stop the process before it binds.
pub fn build_predictor(config: &RestApiConfig) -> anyhow::Result<Arc<Predictor>> {
    let dataset = TrainingDataset::from_path(&config.dataset_path).with_context(|| {
        format!("Failed to load training data from {}", config.dataset_path.display())
    })?;
    let (predictor, report) = Predictor::from_dataset(&dataset).context("Failed to train model")?;
    debug!("Training report: {:?}", report);
    Ok(Arc::new(predictor))
}

/// Initializes the global `tracing` subscriber. `RUST_LOG` takes precedence
/// over the `debug` flag.
pub fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        warn!("Tracing subscriber already initialized");
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down."),
        _ = terminate => info!("Received SIGTERM, shutting down."),
    }
}

// Main function to start the REST API server
pub async fn start_server<F>(
    config: &RestApiConfig,
    predictor: Arc<Predictor>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_address()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;
    info!("Symptom checker listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(predictor).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("REST API server failed to start or run")?;

    info!("REST API server stopped.");
    Ok(())
}
