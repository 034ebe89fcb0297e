use crate::config::BlogConfig;
use crate::database::BlogRepository;
use crate::database::sqlite::{SqliteRepository, connect};
use std::sync::Arc;
use tracing::{info, warn};

pub mod config;
mod database;
mod domain;
mod error;
mod features;
mod logging;
mod pagination;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn BlogRepository>,
    pub config: Arc<BlogConfig>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    // load centralized config
    let config = BlogConfig::from_env();
    logging::init_logging(config.log_format);

    // connect to our db, creating and migrating it when needed
    let pool = connect(&config.database_url, config.max_connections).await?;
    info!(database_url = %config.database_url, "database ready");

    let app_state = AppState {
        repo: Arc::new(SqliteRepository::new(pool.clone())),
        config: Arc::new(config.clone()),
    };

    let app = features::app_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, public_url = %config.public_url, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("server closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
