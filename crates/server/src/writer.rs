use std::sync::Arc;

use listo_core::WatchlistEntry;
use listo_db::WatchlistRepository;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Persists watchlist entries off the response path. Each submission runs on
/// its own task; the outcome is only logged.
#[derive(Clone)]
pub struct WatchlistWriter {
    repository: Arc<dyn WatchlistRepository>,
    collection: Arc<str>,
}

impl WatchlistWriter {
    pub fn new(repository: Arc<dyn WatchlistRepository>, collection: impl Into<String>) -> Self {
        let collection: String = collection.into();
        Self { repository, collection: Arc::from(collection) }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Spawns the write and returns immediately. No timeout, retry or
    /// cancellation; callers normally drop the handle.
    pub fn submit(&self, entry: WatchlistEntry, correlation_id: &str) -> JoinHandle<()> {
        let repository = Arc::clone(&self.repository);
        let collection = Arc::clone(&self.collection);
        let correlation_id = correlation_id.to_string();

        tokio::spawn(async move {
            let title = entry.title.clone();
            match repository.create(&collection, entry).await {
                Ok(record) => info!(
                    event_name = "watchlist.entry.created",
                    correlation_id = %correlation_id,
                    collection = %record.collection,
                    record_id = %record.id.0,
                    title = %record.entry.title,
                    kind = %record.entry.kind,
                    "watchlist entry written"
                ),
                Err(source) => error!(
                    event_name = "watchlist.entry.failed",
                    correlation_id = %correlation_id,
                    collection = %collection,
                    title = %title,
                    error = %source,
                    "watchlist entry could not be written"
                ),
            }
        })
    }
}
