use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use ogc_api_processes::application::context::AppContext;
use ogc_api_processes::config;
use ogc_api_processes::infrastructure::catalog::sample_processes;
use ogc_api_processes::infrastructure::memory::InMemoryClient;
use ogc_api_processes::interface::http;
use ogc_api_processes::interface::http::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Step 1: Load configuration.
    let settings = config::load()?;

    // Step 2: Initialize structured logging.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.observability.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Step 3: Install the metrics recorder when enabled.
    let metrics = if settings.observability.enable_metrics {
        Some(PrometheusBuilder::new().install_recorder()?)
    } else {
        None
    };

    // Step 4: Build the backend and shared application context.
    let client = Arc::new(InMemoryClient::new(sample_processes()));
    let ctx = AppContext::new(client, settings.clone());
    let state = AppState {
        ctx: Arc::new(ctx),
        metrics,
    };

    // Step 5: Build the HTTP app.
    let app = http::app(state);
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Step 6: Bind and serve.
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        service = %settings.observability.service_name,
        addr = %bind_addr,
        "server_listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
