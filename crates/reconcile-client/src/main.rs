//! POM reconcile client entry point
//!
//! Run with:
//! ```bash
//! RPC_ENDPOINT_URL=ws://localhost:8080/api/ws cargo run -p reconcile-client
//! ```
//!
//! Configuration is loaded from environment variables.

use reconcile_client::ClientApp;
use reconcile_common::{try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, code = e.error_code(), "Client stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::from_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        endpoint = %config.endpoint.url,
        "Configuration loaded"
    );

    let app = ClientApp::new(config);
    app.run().await
}
