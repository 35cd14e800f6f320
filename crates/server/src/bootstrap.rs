use std::sync::Arc;

use axum::Router;
use listo_core::config::{AppConfig, ConfigError, LoadOptions};
use listo_core::FulfillmentEngine;
use listo_db::{
    connect_with_settings, migrations, DbPool, SqlWatchlistRepository, WatchlistRepository,
};
use thiserror::Error;
use tracing::info;

use crate::webhook::{self, WebhookState};
use crate::writer::WatchlistWriter;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub repository: Arc<dyn WatchlistRepository>,
    pub writer: WatchlistWriter,
    pub engine: FulfillmentEngine,
}

impl Application {
    pub fn webhook_router(&self) -> Router {
        webhook::router(
            &self.config.server.webhook_path,
            WebhookState::new(self.engine.clone(), self.writer.clone()),
        )
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "watchlist store connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let repository: Arc<dyn WatchlistRepository> =
        Arc::new(SqlWatchlistRepository::new(db_pool.clone()));
    let writer = WatchlistWriter::new(repository.clone(), config.watchlist.collection.clone());
    let engine = FulfillmentEngine::new(config.fulfillment.clone());

    info!(
        event_name = "system.bootstrap.ready",
        correlation_id = "bootstrap",
        collection = %writer.collection(),
        append_version = config.fulfillment.append_version,
        "fulfillment runtime initialized"
    );

    Ok(Application { config, db_pool, repository, writer, engine })
}
