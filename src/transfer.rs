//! Bulk import and export
//!
//! Import merges externally supplied records into the store with overwrite
//! semantics; export takes a shallow snapshot. Unlike batch allocation,
//! import keeps whatever placement fields the records carry.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::audit::AuditAction;
use crate::error::StowageError;
use crate::model::{Container, Item};
use crate::stowage::Stowage;

/// Counts reported by an import: records attempted (including any the
/// request layer skipped for a missing id) and store totals after the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub containers_imported: usize,
    pub items_imported: usize,
    pub total_containers: usize,
    pub total_items: usize,
}

/// Which stores an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    #[default]
    All,
    Containers,
    Items,
}

impl FromStr for ExportScope {
    type Err = StowageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ExportScope::All),
            "containers" => Ok(ExportScope::Containers),
            "items" => Ok(ExportScope::Items),
            other => Err(StowageError::MalformedInput(format!(
                "Unknown export type: {other} (expected all, containers or items)"
            ))),
        }
    }
}

/// Shallow snapshot of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
}

impl Stowage {
    /// Merge supplied records into the store (last-write-wins per id).
    ///
    /// `attempted` carries the raw record counts from the request, so the
    /// summary matches what the caller sent even when some records were
    /// dropped during decoding.
    pub fn import(
        &mut self,
        containers: Vec<Container>,
        items: Vec<Item>,
        attempted: (usize, usize),
    ) -> ImportSummary {
        let (containers_attempted, items_attempted) = attempted;

        for container in containers {
            let id = container.container_id.clone();
            self.store.containers.put(id, container);
        }
        for item in items {
            let id = item.item_id.clone();
            self.store.items.put(id, item);
        }

        self.log.record(
            AuditAction::Import,
            format!("Imported {containers_attempted} containers and {items_attempted} items"),
        );

        ImportSummary {
            containers_imported: containers_attempted,
            items_imported: items_attempted,
            total_containers: self.store.containers.len(),
            total_items: self.store.items.len(),
        }
    }

    /// Snapshot current records. Read-only; no audit entry.
    pub fn export(&self, scope: ExportScope) -> ExportSnapshot {
        let containers = match scope {
            ExportScope::All | ExportScope::Containers => {
                Some(self.store.containers.values().cloned().collect())
            }
            ExportScope::Items => None,
        };
        let items = match scope {
            ExportScope::All | ExportScope::Items => {
                Some(self.store.items.values().cloned().collect())
            }
            ExportScope::Containers => None,
        };
        ExportSnapshot { containers, items }
    }
}
