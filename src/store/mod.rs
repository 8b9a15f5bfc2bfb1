//! Key/value persistence over a single SQLite table.
//!
//! Every value is a JSON text snapshot stored under a string key. Reads and
//! writes never fail from the caller's point of view: an unreachable database
//! or a corrupt value is logged and treated as "nothing stored".

pub mod keys;

use serde::{de::DeserializeOwned, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("malformed data under {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug)]
pub struct Store {
    db_pool: SqlitePool,
}

impl Store {
    pub async fn open(db_pool: SqlitePool) -> Result<Store, sqlx::Error> {
        sqlx::query("CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)")
            .execute(&db_pool)
            .await?;

        Ok(Store { db_pool })
    }

    async fn try_read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key=?")
            .bind(key)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn try_write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO kv (key,value) VALUES (?,?) ON CONFLICT(key) DO UPDATE SET value=excluded.value")
            .bind(key)
            .bind(value)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }

    pub async fn read(&self, key: &str) -> Option<String> {
        match self.try_read(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "read failed, treating as empty");
                None
            }
        }
    }

    /// Returns whether the value actually landed.
    pub async fn write(&self, key: &str, value: &str) -> bool {
        match self.try_write(key, value).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key, %err, "write skipped");
                false
            }
        }
    }

    pub async fn remove(&self, key: &str) {
        let result = sqlx::query("DELETE FROM kv WHERE key=?")
            .bind(key)
            .execute(&self.db_pool)
            .await;

        if let Err(err) = result {
            tracing::warn!(key, %err, "remove skipped");
        }
    }

    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key).await?;

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(source) => {
                let err = StoreError::Malformed { key: key.to_owned(), source };
                tracing::warn!(%err, "discarding persisted value");
                None
            }
        }
    }

    pub async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => self.write(key, &raw).await,
            Err(err) => {
                tracing::warn!(key, %err, "could not serialize, write skipped");
                false
            }
        }
    }

    /// Round-trips a trivial query; used by the health probe.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.db_pool).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    pub(crate) async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    pub(crate) async fn memory_store() -> Store {
        Store::open(memory_pool().await).await.unwrap()
    }

    #[tokio::test]
    async fn write_then_read() {
        let store = memory_store().await;
        assert_eq!(store.read("missing").await, None);

        assert!(store.write("greeting", "\"hi\"").await);
        assert!(store.write("greeting", "\"hello\"").await);
        assert_eq!(store.read("greeting").await.as_deref(), Some("\"hello\""));

        store.remove("greeting").await;
        assert_eq!(store.read("greeting").await, None);
    }

    #[tokio::test]
    async fn corrupt_json_reads_as_absent() {
        let store = memory_store().await;
        store.write("jobs_store_v1", "[{not json").await;

        let jobs: Option<Vec<String>> = store.read_json("jobs_store_v1").await;
        assert!(jobs.is_none());
    }

    #[tokio::test]
    async fn closed_pool_degrades_quietly() {
        let pool = memory_pool().await;
        let store = Store::open(pool.clone()).await.unwrap();
        pool.close().await;

        assert_eq!(store.read("user").await, None);
        assert!(!store.write("user", "{}").await);
        store.remove("user").await;
        assert!(store.ping().await.is_err());
    }
}
