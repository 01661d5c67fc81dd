use anyhow::{Context, Result};
use dotenv::dotenv;
use portal::{config::Config, handler::AppRouter, state::AppState};
use shared::utils::{Telemetry, init_logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("portal", config.otel_endpoint.clone());

    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize log exporter")?;
    let _meter_provider = telemetry
        .init_meter()
        .context("Failed to initialize meter exporter")?;
    let _tracer_provider = telemetry
        .init_tracer()
        .context("Failed to initialize trace exporter")?;

    init_logger(logger_provider, "portal", is_dev, is_enable_file)
        .context("Failed to initialize logger")?;

    let port = config.port;

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    info!("🚀 Portal started successfully");

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    telemetry.shutdown()?;

    Ok(())
}
