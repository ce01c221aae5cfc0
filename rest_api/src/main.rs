// rest_api/src/main.rs

use anyhow::{Context, Result};
use tracing::{error, info};

use rest_api::{build_predictor, init_tracing, load_rest_api_config, shutdown_signal, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = load_rest_api_config().context("Failed to load REST API configuration")?;
    init_tracing(config.debug);
    info!("Symptom checker starting with {:?}", config);

    // Train before binding: a service without a model must never accept requests.
    let predictor = build_predictor(&config).inspect_err(|e| error!("Startup failed: {:#}", e))?;

    start_server(&config, predictor, shutdown_signal()).await
}
