//! Record types for containers, items and placements
//!
//! All wire-facing structs use camelCase field names to stay compatible with
//! the existing API payloads.

use serde::{Deserialize, Serialize};

/// 3D point inside a container, in container-local units.
pub type Coordinates = [f64; 3];

/// Axis-aligned bounding box of a placed item within its container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub start_coordinates: Coordinates,
    pub end_coordinates: Coordinates,
}

impl Position {
    /// Build a position from a start corner and item dimensions.
    pub fn from_start(start: Coordinates, dims: Coordinates) -> Self {
        Position {
            start_coordinates: start,
            end_coordinates: [start[0] + dims[0], start[1] + dims[1], start[2] + dims[2]],
        }
    }

    /// Strict-interior overlap test; boxes sharing only a face do not overlap.
    pub fn overlaps(&self, other: &Position) -> bool {
        (0..3).all(|axis| {
            self.start_coordinates[axis] < other.end_coordinates[axis]
                && other.start_coordinates[axis] < self.end_coordinates[axis]
        })
    }
}

/// Storage container record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub container_id: String,

    /// Logical region used for zone-match placement.
    #[serde(default)]
    pub zone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared bounding volume; a missing axis is unconstrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Container {
    pub fn new(container_id: impl Into<String>, zone: impl Into<String>) -> Self {
        Container {
            container_id: container_id.into(),
            zone: zone.into(),
            name: None,
            description: None,
            width: None,
            depth: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: f64, depth: f64, height: f64) -> Self {
        self.width = Some(width);
        self.depth = Some(depth);
        self.height = Some(height);
        self
    }
}

/// Cargo item record.
///
/// `container_id` and `position` are present together or not at all: an item
/// is either placed (both set) or unplaced (both absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,

    /// Zone preference consulted only by the automatic allocation pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_zone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    #[serde(default)]
    pub perishable: bool,

    /// Stored as supplied; parsed lazily by the expiry sweep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    /// Set only by the time simulator; "expired" is never cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Item {
    pub fn new(item_id: impl Into<String>) -> Self {
        Item {
            item_id: item_id.into(),
            name: None,
            description: None,
            width: None,
            depth: None,
            height: None,
            mass: None,
            preferred_zone: None,
            container_id: None,
            position: None,
            perishable: false,
            expiry_date: None,
            status: None,
        }
    }

    pub fn with_preferred_zone(mut self, zone: impl Into<String>) -> Self {
        self.preferred_zone = Some(zone.into());
        self
    }

    pub fn with_dimensions(mut self, width: f64, depth: f64, height: f64) -> Self {
        self.width = Some(width);
        self.depth = Some(depth);
        self.height = Some(height);
        self
    }

    pub fn with_expiry(mut self, expiry_date: impl Into<String>) -> Self {
        self.perishable = true;
        self.expiry_date = Some(expiry_date.into());
        self
    }

    /// Item dimensions with the default-1 rule applied to missing axes.
    pub fn dimensions(&self) -> Coordinates {
        [
            self.width.unwrap_or(1.0),
            self.depth.unwrap_or(1.0),
            self.height.unwrap_or(1.0),
        ]
    }

    pub fn is_placed(&self) -> bool {
        self.container_id.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.status.as_deref() == Some("expired")
    }
}

/// Result of assigning an item to a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub item_id: String,
    pub container_id: String,
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let item = Item::new("I1");
        assert_eq!(item.dimensions(), [1.0, 1.0, 1.0]);

        let item = Item::new("I2").with_dimensions(2.0, 3.0, 4.0);
        assert_eq!(item.dimensions(), [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_position_from_start() {
        let pos = Position::from_start([1.0, 1.0, 0.0], [2.0, 2.0, 1.0]);
        assert_eq!(pos.start_coordinates, [1.0, 1.0, 0.0]);
        assert_eq!(pos.end_coordinates, [3.0, 3.0, 1.0]);
    }

    #[test]
    fn test_overlap_strict_interior() {
        let a = Position::from_start([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = Position::from_start([1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        let c = Position::from_start([2.0, 0.0, 0.0], [1.0, 1.0, 1.0]);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Shares the x=2 face only.
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let item = Item::new("I1").with_preferred_zone("A");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemId"], "I1");
        assert_eq!(json["preferredZone"], "A");
        assert!(json.get("containerId").is_none());

        let parsed: Item = serde_json::from_value(serde_json::json!({
            "itemId": "I2",
            "preferredZone": "B",
            "width": 2,
            "perishable": true,
            "expiryDate": "2025-01-01T00:00:00"
        }))
        .unwrap();
        assert_eq!(parsed.item_id, "I2");
        assert_eq!(parsed.width, Some(2.0));
        assert!(parsed.perishable);
        assert_eq!(parsed.expiry_date.as_deref(), Some("2025-01-01T00:00:00"));
    }
}
