//! driftlog-core: shared domain model for the Driftlog audit pipeline.
//!
//! Defines the change notification types delivered by the change source,
//! the normalized audit entry persisted for each change, and the
//! [`AuditStore`] trait implemented by store backends.

pub mod entry;
pub mod events;
pub mod store;

pub use entry::{AuditEntry, TRACKED_ATTRIBUTE};
pub use events::{ChangeBatch, ChangeKind, ChangeRecord};
pub use store::{AuditStore, StoreError};
