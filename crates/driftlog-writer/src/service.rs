//! Audit writer service: transforms change notifications into audit
//! entries and fans them out to the audit store.

use std::sync::Arc;

use driftlog_core::{AuditEntry, AuditStore, ChangeBatch};
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::WriterError;

/// Configuration for the audit writer.
#[derive(Debug, Clone)]
pub struct AuditWriterConfig {
    /// Name of the audit table entries are written under.
    pub table: String,
}

/// Result of one audit entry write attempt.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub entry_id: Uuid,
    pub item_key: Option<Value>,
    pub success: bool,
    pub error_message: Option<String>,
}

/// Writes one audit entry per change notification to the audit store.
///
/// Holds no state across batches; the store client and table name are
/// passed in at construction.
pub struct AuditWriter {
    store: Arc<dyn AuditStore>,
    config: AuditWriterConfig,
}

impl AuditWriter {
    /// Create a new audit writer over the given store.
    pub fn new(store: Arc<dyn AuditStore>, config: AuditWriterConfig) -> Self {
        Self { store, config }
    }

    /// Process one batch of change notifications.
    ///
    /// Every notification yields exactly one write attempt. All writes
    /// are issued at once and settled with a single join; no ordering is
    /// guaranteed between them. An individual store failure is logged and
    /// captured in its outcome, never propagated.
    pub async fn write_batch(
        &self,
        batch: &ChangeBatch,
    ) -> Result<Vec<WriteOutcome>, WriterError> {
        let mut writes = Vec::with_capacity(batch.records.len());

        for record in &batch.records {
            let entry = AuditEntry::for_change(record);
            let item = serde_json::to_value(&entry).map_err(WriterError::Serialization)?;
            writes.push(self.put_entry(entry, item));
        }

        Ok(join_all(writes).await)
    }

    async fn put_entry(&self, entry: AuditEntry, item: Value) -> WriteOutcome {
        debug!(
            "Writing audit entry {} to table {}",
            entry.id, self.config.table
        );

        match self.store.put(&self.config.table, item).await {
            Ok(()) => WriteOutcome {
                entry_id: entry.id,
                item_key: entry.item_key,
                success: true,
                error_message: None,
            },
            Err(e) => {
                error!("Audit store put error for entry {}: {}", entry.id, e);
                WriteOutcome {
                    entry_id: entry.id,
                    item_key: entry.item_key,
                    success: false,
                    error_message: Some(e.to_string()),
                }
            }
        }
    }
}
