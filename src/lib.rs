use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod kafka;
pub mod metrics;
pub mod models;
pub mod publisher;
pub mod routes;

use config::Config;
use context::AppContext;
use directory::{StaticDirectory, UserDirectory};
use kafka::KafkaNotificationProducer;

/// Load the user roster named in the configuration, or the built-in one.
pub fn load_directory(config: &Config) -> Result<StaticDirectory> {
    match &config.user_roster_path {
        Some(path) => StaticDirectory::from_json_file(path),
        None => Ok(StaticDirectory::builtin()),
    }
}

/// Serve the router on `listener` until `shutdown` resolves, then finish
/// in-flight requests.
pub async fn serve(
    listener: TcpListener,
    app_context: Arc<AppContext>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = routes::create_router(app_context);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("=== Kafka Notification Producer Starting ===");

    let directory: Arc<dyn UserDirectory> = Arc::new(load_directory(&config)?);

    // Unreachable brokers abort startup before the listener binds
    let producer = Arc::new(
        KafkaNotificationProducer::connect(&config.kafka)
            .await
            .context("Failed to initialize Kafka producer")?,
    );

    let app_context = Arc::new(AppContext::new(directory, producer.clone()));

    let listener = TcpListener::bind(config.listen_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_address()))?;
    tracing::info!(
        "Kafka PRODUCER started at http://{}",
        config.listen_address()
    );

    let served = serve(listener, app_context, shutdown_signal()).await;

    // Drain whatever the producer still holds, whether or not serving failed
    if let Err(e) = producer.flush(config.kafka.flush_timeout).await {
        tracing::error!(error = %e, "Kafka producer did not flush before shutdown");
    }

    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received. Shutting down...");
}
