//! Test fixtures: matching service payloads.

use serde_json::{json, Value};

pub mod pigments {
    /// Pigment with a full result bundle in [`super::full_bundle`]
    pub const STOCKED: &str = "PIG-0001";

    /// Pigment the mock service reports as unknown
    pub const UNKNOWN: &str = "PIG-9999";
}

/// Pigment database rows as the service emits them
pub fn pigment_rows() -> Value {
    json!([
        {"PigmentID": "PIG-0001", "L": 52.5, "a": 10.25, "b": -3.0,
         "HexColor": "#8a7b80", "AvailableTonnage": 80.0},
        {"PigmentID": "PIG-0002", "L": 70.0, "a": -5.0, "b": 20.0,
         "HexColor": "#a9b083", "AvailableTonnage": 15.5}
    ])
}

/// Order database rows; ORD-1004 is missing on purpose
pub fn order_rows() -> Value {
    json!([
        {"OrderID": "ORD-1001", "CustomerName": "Acme Paints", "L": 52.0, "a": 10.0, "b": -3.2,
         "RequiredTonnage": 40.0, "Priority": "High", "HexColor": "#897a7f"},
        {"OrderID": "ORD-1002", "CustomerName": "Blue Ridge Coatings", "L": 50.0, "a": 12.0, "b": -1.0,
         "RequiredTonnage": 35.0, "Priority": "Medium", "HexColor": "#85757a"},
        {"OrderID": "ORD-1003", "CustomerName": "Cobalt & Co", "L": 55.0, "a": 8.0, "b": -6.0,
         "RequiredTonnage": 25.0, "Priority": "Low", "HexColor": "#8f8189"}
    ])
}

/// Bundle with four consensus entries, all three method lists and a
/// production recommendation that is 20 t short.
pub fn full_bundle() -> Value {
    json!({
        "success": true,
        "pigment": {"id": "PIG-0001", "L": 52.5, "a": 10.25, "b": -3.0,
                    "hex": "#8a7b80", "availableTonnage": 80.0},
        "consensus": [
            {"orderId": "ORD-1001", "customerName": "Acme Paints", "hexColor": "#897a7f",
             "L": 52.0, "a": 10.0, "b": -3.2, "requiredTonnage": 40.0, "priority": "High",
             "euclideanRank": 1, "cosineRank": 2, "knnRank": 1,
             "euclideanDeltaE": 0.58, "cosineSimilarity": 0.9998, "knnDistance": 0.12,
             "methodsMatched": 3, "avgRank": 1.33, "consensusScore": 2.67},
            {"orderId": "ORD-1002", "customerName": "Blue Ridge Coatings", "hexColor": "#85757a",
             "L": 50.0, "a": 12.0, "b": -1.0, "requiredTonnage": 35.0, "priority": "Medium",
             "euclideanRank": 2, "cosineRank": 1, "knnRank": 3,
             "euclideanDeltaE": 3.66, "cosineSimilarity": 0.9999, "knnDistance": 0.71},
            {"orderId": "ORD-1003", "customerName": "Cobalt & Co", "hexColor": "#8f8189",
             "requiredTonnage": 25.0, "priority": "Low",
             "euclideanRank": 3, "knnRank": 2, "euclideanDeltaE": 4.2, "knnDistance": 0.4},
            {"orderId": "ORD-1004", "customerName": "Dune Pigments",
             "cosineRank": 3, "cosineSimilarity": 0.97}
        ],
        "euclidean": [
            {"rank": 1, "orderId": "ORD-1001", "customerName": "Acme Paints", "deltaE": 0.58,
             "requiredTonnage": 40.0, "matchPercentage": 94.4},
            {"rank": 2, "orderId": "ORD-1002", "customerName": "Blue Ridge Coatings", "deltaE": 3.66,
             "requiredTonnage": 35.0},
            {"rank": 3, "orderId": "ORD-1003", "customerName": "Cobalt & Co", "deltaE": 4.2,
             "requiredTonnage": 25.0}
        ],
        "cosine": [
            {"rank": 1, "orderId": "ORD-1002", "similarity": 0.9999},
            {"rank": 2, "orderId": "ORD-1001", "similarity": 0.9998},
            {"rank": 3, "orderId": "ORD-1004", "similarity": 0.97}
        ],
        "knn": [
            {"rank": 1, "orderId": "ORD-1001", "normalizedDistance": 0.12},
            {"rank": 2, "orderId": "ORD-1003", "normalizedDistance": 0.4},
            {"rank": 3, "orderId": "ORD-1002", "normalizedDistance": 0.71}
        ],
        "productionRecommendation": {
            "status": "warning",
            "summary": "Available stock covers 80% of top-match demand.",
            "availableTonnage": 80.0,
            "totalRequired": 100.0,
            "shortage": 20.0,
            "canFulfillAll": false,
            "productionRecommendation": 25.0,
            "highPriorityRequired": 40.0,
            "actionItems": ["Produce 25.0 tonnes", "Notify Blue Ridge Coatings"],
            "fulfillmentDetails": [
                {"orderId": "ORD-1001", "customerName": "Acme Paints", "required": 40.0,
                 "canFulfill": 40.0, "status": "Full", "priority": "High", "fulfillmentPercentage": 100.0},
                {"orderId": "ORD-1002", "customerName": "Blue Ridge Coatings", "required": 35.0,
                 "canFulfill": 35.0, "status": "Full", "priority": "Medium", "fulfillmentPercentage": 100.0},
                {"orderId": "ORD-1003", "customerName": "Cobalt & Co", "required": 25.0,
                 "canFulfill": 5.0, "status": "Partial", "priority": "Low", "fulfillmentPercentage": 20.0}
            ]
        }
    })
}

/// Bundle for a pigment with no matches at all
pub fn empty_bundle() -> Value {
    json!({
        "success": true,
        "consensus": [],
        "euclidean": [],
        "cosine": [],
        "knn": []
    })
}
