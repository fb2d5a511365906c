//! Request layer types
//!
//! Wire-facing request and response shapes consumed by the HTTP front end.
//! Decoding structured payloads into engine input types happens here; the
//! engine itself never sees raw JSON. Responses use the established envelope:
//! `{"success": true, ...payload}` or `{"success": false, "error": msg}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::allocation::BatchAllocation;
use crate::audit::AuditEntry;
use crate::clock::TimeAdvance;
use crate::error::StowageError;
use crate::lifecycle::{Disposal, Retrieval};
use crate::model::{Container, Coordinates, Item, Placement};
use crate::search::SearchResults;
use crate::transfer::{ExportSnapshot, ImportSummary};

/// Body for the batch placement endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacementRequest {
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Body for retrieval and disposal endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub item_id: Option<String>,
}

impl ItemRequest {
    /// The item id, or `MissingField` when the body omitted it.
    pub fn item_id(&self) -> Result<&str, StowageError> {
        self.item_id
            .as_deref()
            .ok_or(StowageError::MissingField("itemId"))
    }
}

/// Body for the explicit placement endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRequest {
    pub item_id: Option<String>,
    pub container_id: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Body for the time simulation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeRequest {
    pub hours: Option<f64>,
}

/// Body for the bulk import endpoint.
///
/// Records are kept as raw values so a record missing its id can be skipped
/// individually instead of failing the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub containers: Vec<Value>,
    #[serde(default)]
    pub items: Vec<Value>,
}

/// Decode import records leniently.
///
/// Returns the decodable records and the count attempted; records that fail
/// to decode (typically a missing id) are silently dropped, matching the
/// documented import contract.
pub fn decode_records<T: serde::de::DeserializeOwned>(records: Vec<Value>) -> (Vec<T>, usize) {
    let attempted = records.len();
    let decoded = records
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    (decoded, attempted)
}

/// Failure envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacementResponse {
    pub success: bool,
    pub placements: Vec<Placement>,
    pub unplaced: Vec<crate::allocation::UnplacedItem>,
}

impl From<BatchAllocation> for PlacementResponse {
    fn from(result: BatchAllocation) -> Self {
        PlacementResponse {
            success: true,
            placements: result.placements,
            unplaced: result.unplaced,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: SearchResults,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrieveResponse {
    pub success: bool,
    pub retrieval: Retrieval,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceResponse {
    pub success: bool,
    pub placement: Placement,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteResponse {
    pub success: bool,
    pub waste_management: Disposal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    pub success: bool,
    pub time_simulation: TimeAdvance,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub import: ImportSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    pub export: ExportSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogsResponse {
    pub success: bool,
    pub logs: Vec<AuditEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_records_skips_idless() {
        let records = vec![
            json!({"itemId": "I1", "name": "Ration"}),
            json!({"name": "no id here"}),
            json!({"itemId": "I2"}),
        ];
        let (items, attempted): (Vec<Item>, usize) = decode_records(records);
        assert_eq!(attempted, 3);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_id, "I1");
    }

    #[test]
    fn test_item_request_missing_field() {
        let req: ItemRequest = serde_json::from_value(json!({})).unwrap();
        let err = req.item_id().unwrap_err();
        assert!(matches!(err, StowageError::MissingField("itemId")));

        let req: ItemRequest = serde_json::from_value(json!({"itemId": "I1"})).unwrap();
        assert_eq!(req.item_id().unwrap(), "I1");
    }

    #[test]
    fn test_place_request_decodes_coordinates() {
        let req: PlaceRequest = serde_json::from_value(json!({
            "itemId": "I1",
            "containerId": "C1",
            "coordinates": [1, 1, 0]
        }))
        .unwrap();
        assert_eq!(req.coordinates, Some([1.0, 1.0, 0.0]));
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Item I1 not found")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Item I1 not found");
    }

    #[test]
    fn test_waste_response_key() {
        let body = serde_json::to_value(WasteResponse {
            success: true,
            waste_management: Disposal {
                item_id: "I1".into(),
                container_id: None,
                status: "removed".into(),
            },
        })
        .unwrap();
        assert!(body.get("wasteManagement").is_some());
        assert_eq!(body["wasteManagement"]["status"], "removed");
    }
}
