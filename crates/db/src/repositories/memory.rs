use tokio::sync::RwLock;

use listo_core::domain::watchlist::{WatchlistEntry, WatchlistRecord};

use super::{RepositoryError, WatchlistRepository};

#[derive(Default)]
pub struct InMemoryWatchlistRepository {
    records: RwLock<Vec<WatchlistRecord>>,
}

#[async_trait::async_trait]
impl WatchlistRepository for InMemoryWatchlistRepository {
    async fn create(
        &self,
        collection: &str,
        entry: WatchlistEntry,
    ) -> Result<WatchlistRecord, RepositoryError> {
        let record = WatchlistRecord::create(collection, entry);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self, collection: &str) -> Result<Vec<WatchlistRecord>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|record| record.collection == collection).cloned().collect())
    }

    async fn count(&self, collection: &str) -> Result<u64, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|record| record.collection == collection).count() as u64)
    }
}
