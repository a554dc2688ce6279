//! Threshold tables mapping scores to qualitative labels.
//!
//! Each table is an ascending list of [`Band`]s evaluated first-match-wins.
//! New bands are added here without touching selection or assembly code.

use serde::Serialize;

/// Display severity, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Stylesheet variable the display layer colors banners with
    pub fn css_var(self) -> &'static str {
        match self {
            Severity::Success => "var(--success)",
            Severity::Warning => "var(--warning)",
            Severity::Danger => "var(--danger)",
        }
    }
}

/// One row of a threshold table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Upper bound of the band
    pub upper: f64,
    /// Whether `upper` itself belongs to this band
    pub inclusive: bool,
    /// Range text shown in the reference legend
    pub range: &'static str,
    pub label: &'static str,
    pub severity: Severity,
    /// Swatch color for badges and legend tiles
    pub color: &'static str,
}

impl Band {
    const fn new(
        upper: f64,
        inclusive: bool,
        range: &'static str,
        label: &'static str,
        severity: Severity,
        color: &'static str,
    ) -> Self {
        Self {
            upper,
            inclusive,
            range,
            label,
            severity,
            color,
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        if self.inclusive {
            score <= self.upper
        } else {
            score < self.upper
        }
    }
}

/// A threshold table plus the direction in which scores improve.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    pub bands: &'static [Band],
    /// `true` for similarities, `false` for distances
    pub higher_is_better: bool,
}

impl Scale {
    /// First band containing `score`; `None` for NaN.
    pub fn band_for(&self, score: f64) -> Option<&'static Band> {
        self.bands.iter().find(|band| band.contains(score))
    }

    /// Bands ordered best first, as the reference legend lists them.
    pub fn best_first(&self) -> Vec<&'static Band> {
        if self.higher_is_better {
            self.bands.iter().rev().collect()
        } else {
            self.bands.iter().collect()
        }
    }
}

const GREEN: &str = "#34c759";
const LIGHT_GREEN: &str = "#30d158";
const ORANGE: &str = "#ff9500";
const RED: &str = "#ff3b30";

/// Euclidean ΔE in L*a*b* space.
pub const EUCLIDEAN: Scale = Scale {
    bands: &[
        Band::new(1.0, false, "<1", "Imperceptible", Severity::Success, GREEN),
        Band::new(2.0, false, "1-2", "Very Slight", Severity::Success, LIGHT_GREEN),
        Band::new(3.5, false, "2-3.5", "Noticeable", Severity::Warning, ORANGE),
        Band::new(5.0, false, "3.5-5", "Significant", Severity::Danger, RED),
        Band::new(f64::INFINITY, true, "\u{2265}5", "Large", Severity::Danger, RED),
    ],
    higher_is_better: false,
};

/// Cosine similarity between L*a*b* vectors.
pub const COSINE: Scale = Scale {
    bands: &[
        Band::new(0.95, false, "<0.95", "Moderate", Severity::Warning, ORANGE),
        Band::new(0.99, true, "0.95-0.99", "Good", Severity::Success, LIGHT_GREEN),
        Band::new(f64::INFINITY, true, ">0.99", "Excellent", Severity::Success, GREEN),
    ],
    higher_is_better: true,
};

/// Standardized nearest-neighbor distance.
pub const KNN: Scale = Scale {
    bands: &[
        Band::new(0.5, false, "<0.5", "Excellent", Severity::Success, GREEN),
        Band::new(1.0, true, "0.5-1", "Good", Severity::Success, LIGHT_GREEN),
        Band::new(f64::INFINITY, true, ">1", "Moderate", Severity::Warning, ORANGE),
    ],
    higher_is_better: false,
};

/// Inventory coverage percentage, applied only while a shortage exists.
pub const COVERAGE: Scale = Scale {
    bands: &[
        Band::new(50.0, false, "<50%", "Low Stock", Severity::Danger, "var(--danger)"),
        Band::new(f64::INFINITY, true, "\u{2265}50%", "Partial Coverage", Severity::Warning, "var(--warning)"),
    ],
    higher_is_better: true,
};

/// Status used when there is no shortage at all.
pub const SUFFICIENT_STOCK: Band = Band::new(
    f64::INFINITY,
    true,
    "no shortage",
    "Sufficient Stock",
    Severity::Success,
    "var(--success)",
);
