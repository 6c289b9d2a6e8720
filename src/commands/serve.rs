//! Serve command - Starts the HTTP server.

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Storage;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    let config = apply_overrides(args, config);
    tracing::info!(config = ?config, "Starting server...");

    // Backend selection happens once, here
    let storage = Storage::from_config(&config).await?;
    tracing::info!(backend = storage.backend().as_str(), "Storage ready");

    let app = create_router(AppState::from_storage(storage), &config);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Command-line flags win over environment configuration.
fn apply_overrides(args: ServeArgs, mut config: Config) -> Config {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if args.in_memory {
        config.use_in_memory_database = true;
    }
    config
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_environment() {
        let config = Config {
            use_in_memory_database: false,
            ..Config::default()
        };
        let args = ServeArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(9000),
            in_memory: true,
        };

        let config = apply_overrides(args, config);
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
        assert!(config.use_in_memory_database);
    }

    #[test]
    fn test_no_flags_keep_environment() {
        let config = apply_overrides(ServeArgs::default(), Config::default());
        assert_eq!(config.server_port, crate::config::DEFAULT_SERVER_PORT);
        assert_eq!(
            config.use_in_memory_database,
            crate::config::DEFAULT_USE_IN_MEMORY_DATABASE
        );
    }
}
