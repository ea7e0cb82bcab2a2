use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::error::AppError;

/// Key -> serialized value storage. Every save rewrites the whole value.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn save(&self, key: &str, value: &str) -> Result<(), AppError>;
}

pub struct SqliteRecordStore {
    db: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;
        Ok(value)
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO records (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.records
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqliteRecordStore {
        // One connection: every in-memory connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        let store = SqliteRecordStore::new(pool);
        store.migrate().await.expect("Failed to run migrations");
        store
    }

    #[tokio::test]
    async fn test_missing_key_loads_none() {
        let store = setup_test_db().await;
        let value = store.load("nothing").await.expect("Failed to load");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_value() {
        let store = setup_test_db().await;

        store.save("k", "[1,2,3]").await.expect("Failed to save");
        store.save("k", "[]").await.expect("Failed to save");

        let value = store.load("k").await.expect("Failed to load");
        assert_eq!(value.as_deref(), Some("[]"));
        store.ping().await.expect("ping");
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryRecordStore::new();
        store.save("a", "1").await.expect("Failed to save");
        assert_eq!(store.load("a").await.expect("load").as_deref(), Some("1"));
        assert!(store.load("b").await.expect("load").is_none());
    }
}
