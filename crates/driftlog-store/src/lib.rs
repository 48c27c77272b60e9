//! driftlog-store: audit store backends for the Driftlog audit pipeline.
//!
//! Provides a Redis-backed [`AuditStore`](driftlog_core::AuditStore)
//! implementation for production use and an in-memory implementation for
//! local runs and tests.

pub mod memory;
pub mod redis_store;

pub use memory::MemoryAuditStore;
pub use redis_store::RedisAuditStore;
