//! Qualitative banding of method scores.

use serde::Serialize;

use crate::method::Method;
use crate::scale::Severity;

/// Qualitative reading of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub label: &'static str,
    pub severity: Severity,
    /// Swatch color for the badge
    pub color: &'static str,
}

/// Label `score` with the method's threshold table.
///
/// Returns `None` when the score is absent or not a number.
pub fn classify(method: Method, score: Option<f64>) -> Option<Interpretation> {
    let band = method.scale().band_for(score?)?;
    Some(Interpretation {
        label: band.label,
        severity: band.severity,
        color: band.color,
    })
}

/// One tile of a method's reference legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub range: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// Reference legend for a method tab, best band first.
pub fn legend(method: Method) -> Vec<LegendEntry> {
    method
        .scale()
        .best_first()
        .into_iter()
        .map(|band| LegendEntry {
            range: band.range,
            label: band.label,
            color: band.color,
        })
        .collect()
}
