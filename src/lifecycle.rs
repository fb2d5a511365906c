//! Item lifecycle: retrieval and disposal

use serde::{Deserialize, Serialize};

use crate::audit::AuditAction;
use crate::error::{Result, StowageError};
use crate::model::Position;
use crate::stowage::Stowage;

/// What an item was retrieved from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retrieval {
    pub item_id: String,
    pub container_id: String,
    pub position: Position,
}

/// Receipt for a disposed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disposal {
    pub item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    /// Always `"removed"`.
    pub status: String,
}

impl Stowage {
    /// Take an item out of its container.
    ///
    /// Returns the assignment it held. Fails `NotFound` for an unknown item
    /// and `InvalidState` for an unplaced one; afterwards the item has no
    /// container and no position.
    pub fn retrieve(&mut self, item_id: &str) -> Result<Retrieval> {
        match self.retrieve_inner(item_id) {
            Ok(retrieval) => Ok(retrieval),
            Err(err) => {
                self.audit_failure("Retrieve", &err);
                Err(err)
            }
        }
    }

    fn retrieve_inner(&mut self, item_id: &str) -> Result<Retrieval> {
        let item = self
            .store
            .items
            .get_mut(item_id)
            .ok_or_else(|| StowageError::ItemNotFound(item_id.to_string()))?;

        let (container_id, position) = match (item.container_id.take(), item.position.take()) {
            (Some(container_id), Some(position)) => (container_id, position),
            (container_id, position) => {
                // Nothing captured; restore whichever half was present so a
                // failed retrieval leaves the record untouched.
                item.container_id = container_id;
                item.position = position;
                return Err(StowageError::NotPlaced(item_id.to_string()));
            }
        };

        self.log.record(
            AuditAction::Retrieve,
            format!("Item {item_id} retrieved from container {container_id}"),
        );

        Ok(Retrieval {
            item_id: item_id.to_string(),
            container_id,
            position,
        })
    }

    /// Remove an item from the system entirely, placed or not.
    pub fn dispose(&mut self, item_id: &str) -> Result<Disposal> {
        match self.dispose_inner(item_id) {
            Ok(disposal) => Ok(disposal),
            Err(err) => {
                self.audit_failure("Waste management", &err);
                Err(err)
            }
        }
    }

    fn dispose_inner(&mut self, item_id: &str) -> Result<Disposal> {
        let removed = self
            .store
            .items
            .remove(item_id)
            .ok_or_else(|| StowageError::ItemNotFound(item_id.to_string()))?;

        let details = match &removed.container_id {
            Some(container_id) => {
                format!("Item {item_id} removed from system and container {container_id}")
            }
            None => format!("Item {item_id} removed from system"),
        };
        self.log.record(AuditAction::Waste, details);

        Ok(Disposal {
            item_id: item_id.to_string(),
            container_id: removed.container_id,
            status: "removed".to_string(),
        })
    }
}
