use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aperta_core::{
    load_config, validate_config, CsvReportSink, EngagementApi, ReportRunner, ReportSink,
    SheetsTenantStore, SnovClient, TenantStore,
};

use aperta_server::api::create_router;
use aperta_server::refresh;
use aperta_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("APERTA_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Report path: {:?}", config.report.csv_path);
    info!("Engagement API: {}", config.engagement.base_url);

    // Create tenant credential store
    let tenant_store: Arc<dyn TenantStore> = Arc::new(
        SheetsTenantStore::new(config.tenants.clone())
            .context("Failed to create tenant store")?,
    );
    info!("Tenant store initialized");

    // Create engagement API client
    let engagement: Arc<dyn EngagementApi> = Arc::new(
        SnovClient::new(config.engagement.clone())
            .context("Failed to create engagement client")?,
    );
    info!("Engagement client initialized");

    // Create report sink
    let sink: Arc<dyn ReportSink> = Arc::new(CsvReportSink::new(&config.report.csv_path));

    // Create the report runner
    let runner = Arc::new(ReportRunner::new(
        tenant_store,
        engagement,
        sink,
        &config.pipeline,
    ));

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), runner));

    // Start the campaign count refresh loop
    let (shutdown_tx, _) = broadcast::channel(1);
    let refresh_handle = refresh::spawn_count_refresh(
        Arc::clone(&state),
        Duration::from_secs(config.report.refresh_interval_secs),
        shutdown_tx.subscribe(),
    );

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop the refresh loop
    info!("Server shutting down...");
    let _ = shutdown_tx.send(());
    let _ = refresh_handle.await;
    info!("Refresh loop stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
