//! Application lifespan: start up, serving and shutdown.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::server::{
    config::Config,
    database::{connect::get_connection_uri, DatabaseManager},
    error::Error,
    logger::start_logger,
    model::app::AppState,
    router::build_app,
};

/// Connects to the configured database, if any, and applies migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseManager, Error> {
    let manager = DatabaseManager::new();

    match config.database.provider {
        Some(provider) => {
            tracing::info!("Database provider: {}", provider);

            let uri = get_connection_uri(provider, &config.database);
            manager.init_database(&uri, config.database.echo).await?;
        }
        None => tracing::info!("No database provider configured, running without a database"),
    }

    Ok(manager)
}

/// Runs the backend until a shutdown signal is received.
///
/// # Returns
/// - `Ok(())` - The server shut down gracefully
/// - `Err(Error::DatabaseError)` - The database could not be initialized
/// - `Err(Error::IoError)` - The address could not be bound or serving failed
pub async fn run(config: Config) -> Result<(), Error> {
    start_logger(config.logger);
    tracing::info!("Starting backend");

    let db = connect_to_database(&config).await?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, db.clone());
    let app = build_app(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    tracing::info!("Shutting down backend");

    if db.is_initialized() {
        if let Err(e) = db.stop_database().await {
            tracing::error!("Failed to close database connection: {}", e);
        }
    }

    served?;

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
