use async_trait::async_trait;
use thiserror::Error;

use listo_core::domain::watchlist::{WatchlistEntry, WatchlistRecord};

pub mod memory;
pub mod watchlist;

pub use memory::InMemoryWatchlistRepository;
pub use watchlist::SqlWatchlistRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Append-only document store for watchlist entries. Every `create` makes a
/// new record; nothing deduplicates repeated titles.
#[async_trait]
pub trait WatchlistRepository: Send + Sync {
    async fn create(
        &self,
        collection: &str,
        entry: WatchlistEntry,
    ) -> Result<WatchlistRecord, RepositoryError>;

    async fn list(&self, collection: &str) -> Result<Vec<WatchlistRecord>, RepositoryError>;

    async fn count(&self, collection: &str) -> Result<u64, RepositoryError>;
}
