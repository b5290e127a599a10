use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use upiguard::service::ClassificationService;

mod api;
mod cli;
mod config;
mod error;
mod state;

use crate::api::create_router;
use crate::cli::CliArgs;
use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Set up logging
    let filter = if let Some(ref level) = cli_args.log_level {
        tracing_subscriber::EnvFilter::new(level)
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting upiguard server v{}", upiguard::VERSION);

    // Load configuration from CLI arguments and environment variables
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    info!("Server configuration loaded");

    // Build the classification service once; it is immutable and shared
    let service = ClassificationService::new(server_config.classifier.clone())?;
    let mode = service.mode();

    let app_state = Arc::new(AppState::new(service, server_config.clone()));

    // Create the router with all API endpoints
    let app = create_router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("UPI checker API listening on {}", addr);
    info!("AI mode: {}", mode);
    info!("Endpoints: POST /check, GET /health, docs at http://{}/docs", addr);

    if !server_config.classifier.has_credential() {
        warn!("No OPENAI_API_KEY found. Using mock classification.");
        warn!("Set OPENAI_API_KEY in the environment to enable AI classification.");
    }

    axum::serve(listener, app).await?;

    Ok(())
}
