//! Normalized audit entry persisted for each change notification.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::events::{ChangeKind, ChangeRecord};

/// Attribute name recorded on every entry. The source table tracks a
/// single `value` attribute, so this is constant for now.
pub const TRACKED_ATTRIBUTE: &str = "value";

/// One audit entry, built transiently and written exactly once.
///
/// Serializes with the audit store's wire field names (`itemKey`,
/// `modificationTime`, ...); optional fields are omitted when absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Freshly generated per entry; reprocessing the same notification
    /// yields a different id (no idempotence).
    pub id: Uuid,
    /// Identifier of the source record, from `after.key` with a
    /// fallback to `before.key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_key: Option<Value>,
    /// Timestamp of processing, not of the original change.
    pub modification_time: DateTime<Utc>,
    pub updated_attribute: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

impl AuditEntry {
    /// Build the audit entry for one change notification.
    ///
    /// CREATE captures the entire after-record as `new_value`; UPDATE
    /// captures `before.value` and `after.value`; any other kind yields
    /// a minimal entry with no value fields.
    pub fn for_change(record: &ChangeRecord) -> Self {
        let item_key = record
            .after
            .get("key")
            .or_else(|| record.before.get("key"))
            .cloned();

        let (old_value, new_value) = match record.kind {
            ChangeKind::Create => (None, Some(Value::Object(record.after.clone()))),
            ChangeKind::Update => (
                record.before.get("value").cloned(),
                record.after.get("value").cloned(),
            ),
            ChangeKind::Other => (None, None),
        };

        Self {
            id: Uuid::new_v4(),
            item_key,
            modification_time: Utc::now(),
            updated_attribute: TRACKED_ATTRIBUTE,
            old_value,
            new_value,
        }
    }
}
