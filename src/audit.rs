//! Audit logging for stowage operations
//!
//! Append-only, time-ordered record of engine actions. Entries are immutable
//! once appended; append order is chronological order. The log also mirrors
//! each entry to `tracing` for live diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Action tag for an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// Automatic batch allocation placed an item.
    Placement,
    /// Explicit placement of an item at caller-chosen coordinates.
    Place,
    /// Item retrieved (unassigned) from its container.
    Retrieve,
    /// Item disposed of and removed from the store.
    Waste,
    /// Simulated clock advanced.
    Time,
    /// Bulk import merged records into the store.
    Import,
    /// A mutating operation failed.
    Error,
    /// Process startup.
    Startup,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Placement => "PLACEMENT",
            AuditAction::Place => "PLACE",
            AuditAction::Retrieve => "RETRIEVE",
            AuditAction::Waste => "WASTE",
            AuditAction::Time => "TIME",
            AuditAction::Import => "IMPORT",
            AuditAction::Error => "ERROR",
            AuditAction::Startup => "STARTUP",
        }
    }
}

/// Single audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Wall-clock timestamp (RFC 3339 on the wire).
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub details: String,
}

/// Append-only audit log with filtered, limited retrieval.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        AuditLog {
            entries: Vec::new(),
        }
    }

    /// Append an entry, timestamped now.
    pub fn record(&mut self, action: AuditAction, details: impl Into<String>) {
        let details = details.into();
        info!(action = action.as_str(), "{details}");
        self.entries.push(AuditEntry {
            timestamp: Utc::now(),
            action,
            details,
        });
    }

    /// Retrieve entries, newest-N, in chronological order.
    ///
    /// The action filter applies before the limit, so `limit` counts matching
    /// entries only. A limit of zero means zero entries; pass `None` for no
    /// limit.
    pub fn query(&self, action: Option<&str>, limit: Option<usize>) -> Vec<AuditEntry> {
        let filtered: Vec<&AuditEntry> = self
            .entries
            .iter()
            .filter(|e| action.map_or(true, |a| e.action.as_str() == a))
            .collect();

        let skip = match limit {
            Some(n) if n < filtered.len() => filtered.len() - n,
            _ => 0,
        };
        filtered.into_iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
