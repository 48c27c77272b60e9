//! Redis-backed audit store.

use async_trait::async_trait;
use driftlog_core::{AuditStore, StoreError};
use redis::AsyncCommands;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Audit store backed by a Redis instance.
///
/// Entries are stored as JSON strings under `{table}:{id}`, where the id
/// is taken from the record itself when present.
pub struct RedisAuditStore {
    conn: redis::aio::ConnectionManager,
}

impl RedisAuditStore {
    /// Connect to Redis at the given URL.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self { conn })
    }

    /// Build the storage key for a record within a table.
    fn entry_key(table: &str, item: &Value) -> String {
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        format!("{}:{}", table, id)
    }
}

#[async_trait]
impl AuditStore for RedisAuditStore {
    async fn put(&self, table: &str, item: Value) -> Result<(), StoreError> {
        let key = Self::entry_key(table, &item);
        let serialized = serde_json::to_string(&item)?;

        debug!("AUDIT PUT {}", key);

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&key, serialized)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}
