//! The stowage context object
//!
//! Owns the entity store, the audit log and the simulated clock, and is the
//! single gate through which every engine operation runs. Components are
//! implemented as `impl Stowage` blocks in their own modules; nothing in the
//! crate touches the shared state without going through this struct.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::audit::{AuditAction, AuditEntry, AuditLog};
use crate::clock::SimClock;
use crate::error::StowageError;
use crate::store::EntityStore;

/// Shared handle for concurrent use: mutating operations take the write
/// lock, Search/Export/Logs the read lock.
pub type SharedStowage = Arc<RwLock<Stowage>>;

/// In-memory stowage engine state.
#[derive(Debug, Default)]
pub struct Stowage {
    pub(crate) store: EntityStore,
    pub(crate) log: AuditLog,
    pub(crate) clock: SimClock,
}

impl Stowage {
    /// Create an engine whose simulated clock starts now.
    pub fn new() -> Self {
        Stowage {
            store: EntityStore::new(),
            log: AuditLog::new(),
            clock: SimClock::default(),
        }
    }

    /// Create an engine with a fixed simulated start time.
    ///
    /// Useful for tests that reason about expiry relative to a known instant.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Stowage {
            store: EntityStore::new(),
            log: AuditLog::new(),
            clock: SimClock::starting_at(start),
        }
    }

    /// Wrap the engine for shared use across connections.
    pub fn into_shared(self) -> SharedStowage {
        Arc::new(RwLock::new(self))
    }

    /// Current simulated instant.
    pub fn simulated_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn container_count(&self) -> usize {
        self.store.containers.len()
    }

    pub fn item_count(&self) -> usize {
        self.store.items.len()
    }

    /// Audit log retrieval: filter by action tag, then keep the most recent
    /// `limit` entries, in chronological order.
    pub fn logs(&self, action: Option<&str>, limit: Option<usize>) -> Vec<AuditEntry> {
        self.log.query(action, limit)
    }

    /// Record a startup marker. Called once by the process entry point.
    pub fn record_startup(&mut self, details: impl Into<String>) {
        self.log.record(AuditAction::Startup, details);
    }

    /// Record an `ERROR` audit entry for a failed mutating operation.
    pub(crate) fn audit_failure(&mut self, operation: &str, err: &StowageError) {
        self.log
            .record(AuditAction::Error, format!("{operation} failed: {err}"));
    }
}
