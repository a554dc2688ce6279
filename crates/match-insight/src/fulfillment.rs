//! Inventory coverage and per-order fulfillment classification.
//!
//! Values from the production recommendation are consumed as given. In
//! particular the status follows the sign of `shortage` even when it
//! disagrees with `totalRequired - availableTonnage`.

use serde::Serialize;

use crate::bundle::{FulfillmentDetail, ProductionRecommendation};
use crate::scale::{self, Band, Severity};

/// Overall coverage reading of a production recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    /// Available over required tonnage, clamped to `0..=100`
    pub utilization_percent: f64,
    pub status_label: &'static str,
    pub status_severity: Severity,
    /// Banner color
    pub status_color: &'static str,
}

impl CoverageSummary {
    pub fn has_shortage(&self) -> bool {
        self.status_severity != Severity::Success
    }
}

/// Coverage percentage; no demand counts as fully covered.
pub fn utilization_percent(rec: &ProductionRecommendation) -> f64 {
    let required = rec.total_required.unwrap_or(0.0);
    if required > 0.0 {
        let available = rec.available_tonnage.unwrap_or(0.0);
        (available / required * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    }
}

/// Derive the coverage banner from a production recommendation.
///
/// No shortage means sufficient stock; otherwise the coverage table decides
/// between partial coverage (at least half) and low stock.
pub fn summarize_coverage(rec: &ProductionRecommendation) -> CoverageSummary {
    let utilization = utilization_percent(rec);
    let band: &Band = if rec.shortage.unwrap_or(0.0) <= 0.0 {
        &scale::SUFFICIENT_STOCK
    } else {
        scale::COVERAGE
            .band_for(utilization)
            .unwrap_or(&scale::COVERAGE.bands[0])
    };

    CoverageSummary {
        utilization_percent: utilization,
        status_label: band.label,
        status_severity: band.severity,
        status_color: band.color,
    }
}

/// Fulfillment classification of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentStatus {
    Full,
    Partial,
    None,
}

impl FulfillmentStatus {
    /// Only the exact labels `Full` and `Partial` are recognized; anything
    /// else, including a missing label, is `None`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Full") => FulfillmentStatus::Full,
            Some("Partial") => FulfillmentStatus::Partial,
            _ => FulfillmentStatus::None,
        }
    }

    /// Pill class used by the fulfillment table
    pub fn css_class(self) -> &'static str {
        match self {
            FulfillmentStatus::Full => "full",
            FulfillmentStatus::Partial => "partial",
            FulfillmentStatus::None => "none",
        }
    }
}

impl FulfillmentDetail {
    pub fn fulfillment_status(&self) -> FulfillmentStatus {
        FulfillmentStatus::from_label(self.status.as_deref())
    }
}

/// Order counts per fulfillment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentTally {
    pub full_count: usize,
    pub partial_count: usize,
    pub none_count: usize,
}

pub fn tally_fulfillment(details: &[FulfillmentDetail]) -> FulfillmentTally {
    details
        .iter()
        .fold(FulfillmentTally::default(), |mut tally, detail| {
            match detail.fulfillment_status() {
                FulfillmentStatus::Full => tally.full_count += 1,
                FulfillmentStatus::Partial => tally.partial_count += 1,
                FulfillmentStatus::None => tally.none_count += 1,
            }
            tally
        })
}
