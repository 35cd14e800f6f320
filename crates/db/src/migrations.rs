use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use super::run_pending;
    use crate::connect_with_settings;

    #[tokio::test]
    async fn migrations_create_watchlist_table() {
        let pool =
            connect_with_settings("sqlite::memory:", 1, 5).await.expect("pool should connect");

        run_pending(&pool).await.expect("migrations should apply");
        run_pending(&pool).await.expect("re-running migrations is a no-op");

        let table: String = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'watchlist_entry'",
        )
        .fetch_one(&pool)
        .await
        .expect("watchlist_entry table should exist");
        assert_eq!(table, "watchlist_entry");

        pool.close().await;
    }
}
