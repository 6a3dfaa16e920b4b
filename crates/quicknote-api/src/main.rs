//! quicknote-api server binary.

use std::sync::Arc;

use tracing::{info, warn};

use quicknote_api::{build_router, telemetry, AppState, ServerConfig, StorageBackend};
use quicknote_core::NoteRepository;
use quicknote_db::{log_pool_metrics, Database, MemoryNoteRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = telemetry::init_tracing();

    let config = ServerConfig::from_env();

    let notes: Arc<dyn NoteRepository> = match config.storage {
        StorageBackend::Postgres => {
            info!(
                subsystem = "db",
                max_connections = config.pool.max_connections,
                "Connecting to database"
            );
            let db = Database::connect_with_config(&config.database_url, config.pool.clone())
                .await?;
            db.migrate().await?;
            info!(subsystem = "db", "Migrations applied");
            log_pool_metrics(db.pool());
            db.note_repository()
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; notes are lost on restart");
            Arc::new(MemoryNoteRepository::new())
        }
    };

    let app = build_router(AppState::new(notes), &config);

    let addr = config.socket_addr()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
}
