//! Mandacaru Broker stock service
//!
//! Main entry point. Serves the `/stocks` REST API over HTTP, backed by
//! PostgreSQL or by an in-memory store depending on `STORE_BACKEND`.

use anyhow::Context;
use std::net::SocketAddr;
use stock_broker::api::create_router;
use stock_broker::config::{AppConfig, StoreBackend};
use stock_broker::database::{create_pool, run_migrations};
use stock_broker::{AppError, AppState};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    init_tracing(&config);

    info!("Stock broker service starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("Store backend: {}", config.store);

    let app_state = build_state(&config).await?;
    let app = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server on {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Stock broker service shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "stock_broker={},sqlx=warn,tower_http=info",
            config.log_level
        )
        .into()
    });

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn build_state(config: &AppConfig) -> Result<AppState, AppError> {
    match (config.store, &config.database) {
        (StoreBackend::Postgres, Some(db)) => {
            info!("Connecting to database...");
            let pool = create_pool(db).await.map_err(|e| {
                error!("Failed to create database pool: {}", e);
                AppError::Database(e)
            })?;
            info!("Database connection pool created (max connections: {})", db.max_connections);

            info!("Running database migrations...");
            run_migrations(&pool, Some(db.migrations_path.as_str()))
                .await
                .map_err(|e| {
                    error!("Database migration failed: {}", e);
                    AppError::Database(e)
                })?;
            info!("Database migrations completed successfully");

            Ok(AppState::with_pool(pool))
        }
        (StoreBackend::Postgres, None) => Err(AppError::Config(
            "postgres store selected without database configuration".to_string(),
        )),
        (StoreBackend::Memory, _) => {
            warn!("Using in-memory store; records are lost on shutdown");
            Ok(AppState::in_memory())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving rather than shutting down immediately
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, shutting down gracefully...");
}
