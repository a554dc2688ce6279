//! Wire types for the matching service result bundle.
//!
//! Every field the display reads is optional or defaulted: a missing value
//! degrades to a placeholder downstream instead of failing deserialization.
//! Field names follow the service's camelCase JSON; the database endpoints
//! emit spreadsheet column names (`PigmentID`, `OrderID`, ...), which are
//! accepted as aliases.

use serde::{Deserialize, Serialize};

/// A pigment sample with its stock on hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pigment {
    #[serde(default, alias = "PigmentID")]
    pub id: String,
    #[serde(default, rename = "L")]
    pub l: f64,
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default, alias = "HexColor")]
    pub hex: Option<String>,
    #[serde(default, alias = "AvailableTonnage")]
    pub available_tonnage: Option<f64>,
}

/// An outstanding customer order as loaded from the order database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, alias = "OrderID")]
    pub order_id: String,
    #[serde(default, alias = "CustomerName")]
    pub customer_name: Option<String>,
    #[serde(default, rename = "L")]
    pub l: f64,
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default, alias = "RequiredTonnage")]
    pub required_tonnage: Option<f64>,
    #[serde(default, alias = "Priority")]
    pub priority: Option<String>,
    #[serde(default, alias = "HexColor")]
    pub hex_color: Option<String>,
}

/// One order as it appears in a method list or in the consensus list.
///
/// Method lists carry `rank` plus their own metric (`deltaE`, `similarity`
/// or `distance`); consensus entries carry the three per-method ranks and
/// the per-method metrics under prefixed names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMatch {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, rename = "L")]
    pub l: Option<f64>,
    #[serde(default)]
    pub a: Option<f64>,
    #[serde(default)]
    pub b: Option<f64>,
    #[serde(default)]
    pub hex_color: Option<String>,
    #[serde(default)]
    pub required_tonnage: Option<f64>,
    #[serde(default)]
    pub priority: Option<String>,

    /// Position under the list's own method (method lists only)
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub euclidean_rank: Option<u32>,
    #[serde(default)]
    pub cosine_rank: Option<u32>,
    #[serde(default)]
    pub knn_rank: Option<u32>,

    #[serde(default)]
    pub delta_e: Option<f64>,
    #[serde(default)]
    pub euclidean_delta_e: Option<f64>,
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub cosine_similarity: Option<f64>,
    #[serde(default, alias = "normalizedDistance")]
    pub distance: Option<f64>,
    #[serde(default)]
    pub knn_distance: Option<f64>,
    #[serde(default)]
    pub match_percentage: Option<f64>,
}

/// Per-order allocation of the available stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentDetail {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub required: Option<f64>,
    #[serde(default)]
    pub can_fulfill: Option<f64>,
    /// Raw status label; see [`crate::FulfillmentStatus::from_label`]
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub fulfillment_percentage: Option<f64>,
}

/// Inventory analysis for the consensus top orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecommendation {
    /// `success`, `warning` or `critical`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub available_tonnage: Option<f64>,
    #[serde(default)]
    pub total_required: Option<f64>,
    #[serde(default)]
    pub shortage: Option<f64>,
    #[serde(default)]
    pub production_recommendation: Option<f64>,
    #[serde(default)]
    pub high_priority_required: Option<f64>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub fulfillment_details: Vec<FulfillmentDetail>,
}

/// Complete response of `POST /api/match/pigment-to-orders`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBundle {
    #[serde(default)]
    pub success: bool,
    /// Failure reason reported alongside `success: false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub pigment: Option<Pigment>,
    #[serde(default)]
    pub consensus: Vec<OrderMatch>,
    #[serde(default)]
    pub euclidean: Vec<OrderMatch>,
    #[serde(default)]
    pub cosine: Vec<OrderMatch>,
    #[serde(default)]
    pub knn: Vec<OrderMatch>,
    #[serde(default)]
    pub production_recommendation: Option<ProductionRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_parses_service_payload() {
        let json = r##"{
            "success": true,
            "pigment": {"id": "PIG-0001", "L": 52.1, "a": 10.0, "b": -4.5, "hex": "#8a7f88", "availableTonnage": 40.0},
            "consensus": [
                {"orderId": "ORD-2024-0007", "customerName": "ColorMax", "L": 50.0, "a": 9.0, "b": -5.0,
                 "euclideanRank": 1, "cosineRank": null, "knnRank": 2, "euclideanDeltaE": 1.234,
                 "cosineAngular": null, "knnDistance": 0.21, "methodsMatched": 2, "avgRank": 1.5, "consensusScore": 198.5}
            ],
            "euclidean": [{"rank": 1, "orderId": "ORD-2024-0007", "deltaE": 1.234, "matchPercentage": 88.4}],
            "cosine": [{"rank": 1, "orderId": "ORD-2024-0003", "similarity": 0.9987, "angularDistance": 2.9}],
            "knn": [{"rank": 1, "orderId": "ORD-2024-0007", "normalizedDistance": 0.21, "rawDistance": 1.23}],
            "productionRecommendation": {
                "status": "warning", "summary": "Partial fulfillment possible.",
                "availableTonnage": 40.0, "totalRequired": 55.5, "shortage": 15.5,
                "fulfillmentDetails": [{"orderId": "ORD-2024-0007", "status": "Cannot Fulfill", "fulfillmentPercentage": 0}]
            }
        }"##;

        let bundle: MatchBundle = serde_json::from_str(json).unwrap();

        assert!(bundle.success);
        assert_eq!(bundle.pigment.as_ref().unwrap().id, "PIG-0001");
        assert_eq!(bundle.consensus[0].euclidean_rank, Some(1));
        assert_eq!(bundle.consensus[0].cosine_rank, None);
        assert_eq!(bundle.knn[0].distance, Some(0.21));
        let rec = bundle.production_recommendation.unwrap();
        assert_eq!(rec.shortage, Some(15.5));
        assert!(rec.action_items.is_empty());
        assert_eq!(
            rec.fulfillment_details[0].status.as_deref(),
            Some("Cannot Fulfill")
        );
    }

    #[test]
    fn test_empty_object_is_a_failed_bundle() {
        let bundle: MatchBundle = serde_json::from_str("{}").unwrap();
        assert!(!bundle.success);
        assert!(bundle.consensus.is_empty());
        assert!(bundle.production_recommendation.is_none());
    }

    #[test]
    fn test_database_rows_use_column_aliases() {
        let pigment: Pigment = serde_json::from_str(
            r##"{"PigmentID": "PIG-0002", "L": 60.0, "a": 1.0, "b": 2.0, "AvailableTonnage": 12.5, "HexColor": "#999999"}"##,
        )
        .unwrap();
        assert_eq!(pigment.id, "PIG-0002");
        assert_eq!(pigment.available_tonnage, Some(12.5));
        assert_eq!(pigment.hex.as_deref(), Some("#999999"));

        let order: Order = serde_json::from_str(
            r#"{"OrderID": "ORD-2024-0001", "CustomerName": "Acme Corp", "L": 30.0, "a": 0.0, "b": 0.0, "RequiredTonnage": 8.0, "Priority": "High"}"#,
        )
        .unwrap();
        assert_eq!(order.order_id, "ORD-2024-0001");
        assert_eq!(order.priority.as_deref(), Some("High"));
    }
}
