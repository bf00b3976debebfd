mod config;

use std::sync::Arc;

use tracing::{info, warn};

use medium_api::auth::{AppState, AppStateInner};
use medium_store::{MemoryStore, SqliteStore, Store};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medium=debug,medium_api=debug,medium_store=info,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.uses_placeholder_secret() {
        warn!("MEDIUM_JWT_SECRET is unset or a placeholder; tokens can be forged. Set it before deploying.");
    }

    let store: Arc<dyn Store> = match &config.db_path {
        Some(path) => Arc::new(SqliteStore::open(path)?),
        None => {
            info!("No MEDIUM_DB_PATH set; users and posts live in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let state: AppState = Arc::new(AppStateInner {
        store,
        jwt_secret: config.jwt_secret.clone(),
        token_ttl_secs: config.token_ttl_secs,
    });

    let app = medium_api::router(state, config.body_limit);

    let addr = config.addr()?;
    info!("Medium server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
