use chrono::{DateTime, Utc};
use sqlx::Row;

use listo_core::domain::watchlist::{
    WatchlistEntry, WatchlistEntryId, WatchlistRecord,
};

use super::{RepositoryError, WatchlistRepository};
use crate::DbPool;

pub struct SqlWatchlistRepository {
    pool: DbPool,
}

impl SqlWatchlistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<WatchlistRecord, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let collection: String =
        row.try_get("collection").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let title: String = row.try_get("title").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let kind: String = row.try_get("type").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at_str: String =
        row.try_get("created_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("created_at `{created_at_str}`: {e}")))?;

    Ok(WatchlistRecord {
        id: WatchlistEntryId(id),
        collection,
        entry: WatchlistEntry { title, kind },
        created_at,
    })
}

#[async_trait::async_trait]
impl WatchlistRepository for SqlWatchlistRepository {
    async fn create(
        &self,
        collection: &str,
        entry: WatchlistEntry,
    ) -> Result<WatchlistRecord, RepositoryError> {
        let record = WatchlistRecord::create(collection, entry);

        sqlx::query(
            "INSERT INTO watchlist_entry (id, collection, title, type, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.id.0)
        .bind(&record.collection)
        .bind(&record.entry.title)
        .bind(&record.entry.kind)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self, collection: &str) -> Result<Vec<WatchlistRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, collection, title, type, created_at
             FROM watchlist_entry WHERE collection = ?
             ORDER BY created_at, rowid",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }

    async fn count(&self, collection: &str) -> Result<u64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM watchlist_entry WHERE collection = ?")
                .bind(collection)
                .fetch_one(&self.pool)
                .await?;

        u64::try_from(count).map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}
