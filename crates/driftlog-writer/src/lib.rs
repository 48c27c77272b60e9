//! # driftlog-writer
//!
//! Audit writer for change notification batches.
//!
//! This crate provides functionality for:
//! - Deriving one normalized audit entry per change notification
//! - Fanning out independent writes to the audit store
//! - Capturing per-entry write failures without failing the batch
//! - An HTTP ingestion endpoint for delivered batches

mod error;
mod handlers;
mod service;

pub use error::WriterError;
pub use handlers::{configure_routes, WriterApiDoc, WriterState};
pub use service::{AuditWriter, AuditWriterConfig, WriteOutcome};
