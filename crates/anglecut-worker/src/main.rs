//! Angle director worker binary.

use std::process::ExitCode;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use anglecut_worker::{RunLogger, WorkerConfig, WorkerError, WorkerResult};

/// Exit status for invalid settings, distinct from run failures.
const CONFIG_EXIT_CODE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting anglecut-worker");

    let config = match WorkerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::from(CONFIG_EXIT_CODE);
        }
    };
    info!("Worker config: {:?}", config);

    let logger = RunLogger::new("direct");
    match run(config, logger.clone()).await {
        Ok(()) => {
            info!("Worker shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            logger.log_error(&e.to_string());
            if e.is_config() {
                ExitCode::from(CONFIG_EXIT_CODE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Colored output for dev, JSON for production.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("anglecut=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

async fn run(config: WorkerConfig, logger: RunLogger) -> WorkerResult<()> {
    if let Some(addr) = config.metrics_addr {
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .map_err(|e| WorkerError::metrics(e.to_string()))?;
        info!("Serving metrics on {}", addr);
    }

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let shutdown_handle = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            cancel_tx.send(true).ok();
        }
    });

    let span = logger.create_span();
    let summary = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        anglecut_worker::run(&config, &cancel_rx, &logger)
    })
    .await??;

    shutdown_handle.abort();
    info!("Summary: {}", serde_json::to_string(&summary)?);
    Ok(())
}
