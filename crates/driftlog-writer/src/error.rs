//! Error types for the audit writer.

use thiserror::Error;

/// Batch-level failures.
///
/// Per-entry store failures are captured in
/// [`WriteOutcome`](crate::WriteOutcome) and never surface here.
#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Malformed change batch: {0}")]
    MalformedBatch(serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),
}
