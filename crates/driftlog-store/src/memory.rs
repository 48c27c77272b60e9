//! In-memory audit store for local runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use driftlog_core::{AuditStore, StoreError};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

/// Audit store keeping all entries in process memory.
#[derive(Default)]
pub struct MemoryAuditStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries written to a table so far, in arrival order.
    pub async fn entries(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn put(&self, table: &str, item: Value) -> Result<(), StoreError> {
        debug!("AUDIT PUT {} (memory)", table);

        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(item);

        Ok(())
    }
}
