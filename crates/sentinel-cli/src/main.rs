mod cli;
mod logging;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use cli::{Cli, Command};
use sentinel_api::{health_app, metrics_app};
use sentinel_inventory::HttpInventoryClient;
use sentinel_observability::{MetricsRegistry, Probe, ReadinessRegistry};
use sentinel_publisher::{NatsPublisher, Publisher};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            log_level,
            log_format,
            log_output,
            health_server_bindaddress,
            metrics_server_bindaddress,
        } => {
            logging::init(log_level, log_format, log_output);
            serve(config, health_server_bindaddress, metrics_server_bindaddress).await
        }
    }
}

struct BrokerProbe {
    publisher: Arc<dyn Publisher>,
}

#[async_trait]
impl Probe for BrokerProbe {
    async fn check(&self) -> Result<(), String> {
        self.publisher.health().await.map_err(|e| e.to_string())
    }
}

async fn serve(
    config_path: std::path::PathBuf,
    health_bindaddress: String,
    metrics_bindaddress: String,
) -> Result<()> {
    let config = sentinel_config::load(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path.display()))?;

    let broker_url =
        std::env::var("NATS_URL").unwrap_or_else(|_| "nats://127.0.0.1:4222".to_string());
    let publisher: Arc<dyn Publisher> = Arc::new(
        NatsPublisher::connect(&broker_url)
            .await
            .context("failed to connect to broker")?,
    );

    let inventory = Arc::new(HttpInventoryClient::new(
        config.hyperfleet_api.endpoint.clone(),
        config.hyperfleet_api.timeout,
    ));

    let prometheus_registry = Arc::new(prometheus::Registry::new());
    let metrics = Arc::new(
        MetricsRegistry::new(&prometheus_registry).context("failed to register metrics")?,
    );
    let readiness = Arc::new(ReadinessRegistry::new());
    readiness
        .register_probe(
            "broker",
            Arc::new(BrokerProbe { publisher: publisher.clone() }),
        )
        .await;

    let sentinel = Arc::new(sentinel_core::Sentinel::new(
        config,
        inventory,
        publisher.clone(),
        metrics,
        readiness.clone(),
    ));

    let token = CancellationToken::new();

    let health_router = health_app(readiness.clone());
    let metrics_router = metrics_app(prometheus_registry.clone());

    let health_listener = tokio::net::TcpListener::bind(normalize_bindaddr(&health_bindaddress))
        .await
        .with_context(|| format!("failed to bind health listener on {health_bindaddress}"))?;
    let metrics_listener = tokio::net::TcpListener::bind(normalize_bindaddr(&metrics_bindaddress))
        .await
        .with_context(|| format!("failed to bind metrics listener on {metrics_bindaddress}"))?;

    let health_token = token.clone();
    let health_task = tokio::spawn(async move {
        axum::serve(health_listener, health_router)
            .with_graceful_shutdown(async move { health_token.cancelled().await })
            .await
    });

    let metrics_token = token.clone();
    let metrics_task = tokio::spawn(async move {
        axum::serve(metrics_listener, metrics_router)
            .with_graceful_shutdown(async move { metrics_token.cancelled().await })
            .await
    });

    let loop_token = token.clone();
    let sentinel_for_loop = sentinel.clone();
    let loop_task = tokio::spawn(async move { sentinel_for_loop.run(loop_token).await });

    readiness.set_ready(true);
    info!("sentinel ready");

    let signal_token = token.clone();
    let signal_readiness = readiness.clone();
    let signal_task = tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        // Readiness flips before cancellation so /readyz starts failing
        // immediately, ahead of in-flight work observing the token.
        signal_readiness.set_ready(false);
        signal_token.cancel();
    });

    let _ = signal_task.await;

    let shutdown_result = tokio::time::timeout(Duration::from_secs(20), async {
        let _ = loop_task.await;
        let _ = health_task.await;
        let _ = metrics_task.await;
    })
    .await;

    if shutdown_result.is_err() {
        warn!("graceful shutdown window elapsed before all tasks exited");
    }

    info!("sentinel stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to install SIGTERM handler");
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM"),
        _ = tokio::signal::ctrl_c() => info!("received SIGINT"),
    }
}

fn normalize_bindaddr(addr: &str) -> String {
    if let Some(port) = addr.strip_prefix(':') {
        format!("0.0.0.0:{port}")
    } else {
        addr.to_string()
    }
}
