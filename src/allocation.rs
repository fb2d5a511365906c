//! Allocation engine
//!
//! Two placement paths share the position math but differ in policy:
//!
//! - **Batch allocation** walks unplaced items in store order and assigns each
//!   to the first container whose zone matches the item's preferred zone and
//!   that has a free box for it. Occupancy is derived from currently placed
//!   items, so retrieval and disposal free space with no separate index to
//!   keep in sync.
//! - **Explicit placement** trusts the caller: it requires both records to
//!   exist, then overwrites the item's placement at the given coordinates
//!   without capacity or overlap checks.

use serde::{Deserialize, Serialize};

use crate::audit::AuditAction;
use crate::error::{Result, StowageError};
use crate::model::{Container, Coordinates, Item, Placement, Position};
use crate::stowage::Stowage;

/// Tolerance for bound checks on fractional dimensions.
const EPSILON: f64 = 1e-9;

/// An item the batch pass could not place for lack of space.
///
/// Only reported when at least one container matched the item's zone; items
/// with no matching container at all are skipped silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedItem {
    pub item_id: String,
    pub reason: String,
}

/// Result of one batch allocation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAllocation {
    pub placements: Vec<Placement>,
    pub unplaced: Vec<UnplacedItem>,
}

/// Find a free start corner for a box of `dims` inside `container`, avoiding
/// every box in `occupied`.
///
/// Candidate anchors are the container origin plus, for each occupant, the
/// three corners obtained by projecting its far corner along one axis.
/// Candidates are tried lowest-first (z, then y, then x), so the search fills
/// the container floor before stacking.
fn find_free_spot(
    container: &Container,
    dims: Coordinates,
    occupied: &[Position],
) -> Option<Coordinates> {
    let mut anchors: Vec<Coordinates> = vec![[0.0, 0.0, 0.0]];
    for slot in occupied {
        let s = slot.start_coordinates;
        let e = slot.end_coordinates;
        anchors.push([e[0], s[1], s[2]]);
        anchors.push([s[0], e[1], s[2]]);
        anchors.push([s[0], s[1], e[2]]);
    }
    anchors.sort_by(|a, b| {
        (a[2], a[1], a[0])
            .partial_cmp(&(b[2], b[1], b[0]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let bounds = [container.width, container.depth, container.height];
    'anchor: for anchor in anchors {
        let candidate = Position::from_start(anchor, dims);
        for (axis, bound) in bounds.iter().enumerate() {
            if let Some(bound) = bound {
                if candidate.end_coordinates[axis] > bound + EPSILON {
                    continue 'anchor;
                }
            }
        }
        if occupied.iter().any(|slot| candidate.overlaps(slot)) {
            continue;
        }
        return Some(anchor);
    }
    None
}

impl Stowage {
    /// Positions of all items currently placed in `container_id`.
    fn occupied_positions(&self, container_id: &str) -> Vec<Position> {
        self.store
            .items
            .values()
            .filter(|item| item.container_id.as_deref() == Some(container_id))
            .filter_map(|item| item.position.clone())
            .collect()
    }

    /// Upsert supplied definitions, then assign every unplaced item to the
    /// first zone-matching container with free space.
    ///
    /// Supplied items enter the store unplaced, except that re-supplying an
    /// item whose stored record is already placed keeps the existing
    /// placement. Items with no zone-matching container, or already placed,
    /// are skipped silently; items whose matching containers are all full are
    /// reported in `unplaced` rather than failing the batch.
    pub fn allocate_batch(
        &mut self,
        containers: Vec<Container>,
        items: Vec<Item>,
    ) -> BatchAllocation {
        for container in containers {
            let id = container.container_id.clone();
            self.store.containers.put(id, container);
        }
        for mut item in items {
            let id = item.item_id.clone();
            match self.store.items.get(&id) {
                Some(existing) if existing.is_placed() => {
                    item.container_id = existing.container_id.clone();
                    item.position = existing.position.clone();
                }
                _ => {
                    item.container_id = None;
                    item.position = None;
                }
            }
            self.store.items.put(id, item);
        }

        let unplaced_ids: Vec<String> = self
            .store
            .items
            .iter()
            .filter(|(_, item)| !item.is_placed())
            .map(|(id, _)| id.clone())
            .collect();

        let mut placements = Vec::new();
        let mut unplaced = Vec::new();

        for item_id in unplaced_ids {
            let (dims, zone) = match self.store.items.get(&item_id) {
                Some(item) => match &item.preferred_zone {
                    Some(zone) => (item.dimensions(), zone.clone()),
                    None => continue,
                },
                None => continue,
            };

            let candidates: Vec<String> = self
                .store
                .containers
                .iter()
                .filter(|(_, c)| c.zone == zone)
                .map(|(id, _)| id.clone())
                .collect();
            if candidates.is_empty() {
                continue;
            }

            let mut assigned = None;
            for container_id in candidates {
                let occupied = self.occupied_positions(&container_id);
                let container = match self.store.containers.get(&container_id) {
                    Some(c) => c,
                    None => continue,
                };
                if let Some(start) = find_free_spot(container, dims, &occupied) {
                    assigned = Some((container_id, Position::from_start(start, dims)));
                    break;
                }
            }

            match assigned {
                Some((container_id, position)) => {
                    if let Some(item) = self.store.items.get_mut(&item_id) {
                        item.container_id = Some(container_id.clone());
                        item.position = Some(position.clone());
                    }
                    self.log.record(
                        AuditAction::Placement,
                        format!("Item {item_id} placed in container {container_id}"),
                    );
                    placements.push(Placement {
                        item_id,
                        container_id,
                        position,
                    });
                }
                None => {
                    let err = StowageError::NoCapacity {
                        item_id: item_id.clone(),
                        zone,
                    };
                    unplaced.push(UnplacedItem {
                        item_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        BatchAllocation {
            placements,
            unplaced,
        }
    }

    /// Place an item in a container at caller-chosen start coordinates.
    ///
    /// Overwrites any current placement of the item. The end coordinates are
    /// the start plus the item's dimensions (default 1 per missing axis).
    pub fn place(
        &mut self,
        item_id: &str,
        container_id: &str,
        start: Option<Coordinates>,
    ) -> Result<Placement> {
        match self.place_inner(item_id, container_id, start) {
            Ok(placement) => Ok(placement),
            Err(err) => {
                self.audit_failure("Place", &err);
                Err(err)
            }
        }
    }

    fn place_inner(
        &mut self,
        item_id: &str,
        container_id: &str,
        start: Option<Coordinates>,
    ) -> Result<Placement> {
        if !self.store.items.contains(item_id) {
            return Err(StowageError::ItemNotFound(item_id.to_string()));
        }
        if !self.store.containers.contains(container_id) {
            return Err(StowageError::ContainerNotFound(container_id.to_string()));
        }

        let start = start.unwrap_or([0.0, 0.0, 0.0]);
        let item = self
            .store
            .items
            .get_mut(item_id)
            .ok_or_else(|| StowageError::ItemNotFound(item_id.to_string()))?;
        let position = Position::from_start(start, item.dimensions());
        item.container_id = Some(container_id.to_string());
        item.position = Some(position.clone());

        self.log.record(
            AuditAction::Place,
            format!("Item {item_id} placed in container {container_id} at {start:?}"),
        );

        Ok(Placement {
            item_id: item_id.to_string(),
            container_id: container_id.to_string(),
            position,
        })
    }
}
