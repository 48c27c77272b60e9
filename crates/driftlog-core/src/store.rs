//! Audit store trait implemented by persistence backends.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by an audit store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value persistence service accepting arbitrary structured records
/// by table name.
///
/// Implementations must not retry internally; the writer treats every
/// failure as final and logs it.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist one record under the given table name.
    async fn put(&self, table: &str, item: Value) -> Result<(), StoreError>;
}
