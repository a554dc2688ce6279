//! Render-ready dashboard view assembled from a match bundle.
//!
//! Assembly is a pure function of the bundle and the assembler settings:
//! the same input always serializes to the same bytes.

use std::collections::HashSet;

use serde::Serialize;

use crate::bundle::{MatchBundle, Order, OrderMatch, Pigment, ProductionRecommendation};
use crate::classify::{classify, legend, Interpretation, LegendEntry};
use crate::color_space::{color_space, order_point, ColorPoint, ColorSpace};
use crate::consensus::{partition, rank_class, Medal, DEFAULT_TOP_N};
use crate::format::{fixed_or_dash, rank_label, to_fixed, PLACEHOLDER};
use crate::fulfillment::{summarize_coverage, tally_fulfillment, CoverageSummary, FulfillmentTally};
use crate::method::{select_headline_method, HeadlineMetric, Method};

/// Swatch shown when an entry has no color of its own.
const FALLBACK_SWATCH: &str = "#888";

/// Which results tab an order card is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Consensus,
    Euclidean,
    Cosine,
    Knn,
}

impl Tab {
    pub fn description(self) -> &'static str {
        match self {
            Tab::Consensus => "Orders ranked by combined agreement across all matching methods.",
            Tab::Euclidean => "Delta E measures perceptual color difference in LAB space.",
            Tab::Cosine => "Angular similarity between color vectors.",
            Tab::Knn => "K-Nearest Neighbors with normalized color distances.",
        }
    }

    /// Heading of the tab's colour space plot
    pub fn plot_title(self) -> &'static str {
        match self {
            Tab::Consensus => "Consensus Distance",
            Tab::Euclidean => "Euclidean Distance",
            Tab::Cosine => "Cosine Distance",
            Tab::Knn => "Knn Distance",
        }
    }

    fn method(self) -> Option<Method> {
        match self {
            Tab::Consensus => None,
            Tab::Euclidean => Some(Method::Euclidean),
            Tab::Cosine => Some(Method::Cosine),
            Tab::Knn => Some(Method::Knn),
        }
    }
}

/// Complete dashboard for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub pigment: Option<PigmentBadge>,
    /// `"Found N matching orders"`
    pub match_notice: String,
    pub consensus: ConsensusTab,
    pub euclidean: MethodTab,
    pub cosine: MethodTab,
    pub knn: MethodTab,
    pub production: Option<ProductionPanel>,
    /// Consensus order ids missing from the loaded order catalog
    pub unresolved_orders: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PigmentBadge {
    pub id: String,
    pub hex: String,
    pub lab: String,
    /// Stock on hand, e.g. `"120.0 t"`
    pub stock: Option<String>,
}

/// Identity and color of an order, formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: String,
    pub customer_name: String,
    pub priority: Option<String>,
    pub hex_color: String,
    pub l: String,
    pub a: String,
    pub b: String,
}

/// One method's rank for an order on the consensus tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankChip {
    pub method: Method,
    pub label: &'static str,
    pub initial: &'static str,
    /// `"#n"` or `"#-"`
    pub rank: String,
    /// The method ranked this order at all
    pub active: bool,
    /// The method placed this order in its top three
    pub top: bool,
}

/// Value shown in the metric column of an order card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDisplay {
    pub value: String,
    pub label: &'static str,
    pub unit: &'static str,
}

/// Large card for a top-tier consensus match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopMatchCard {
    pub rank: usize,
    pub medal: Option<Medal>,
    pub medal_gradient: Option<&'static str>,
    pub order: OrderSummary,
    pub headline: HeadlineMetric,
    /// Always the Euclidean ΔE reading, whatever method headlines
    pub interpretation: Option<Interpretation>,
    pub rank_chips: Vec<RankChip>,
    pub tonnage: String,
}

/// Compact expandable card used for the consensus remainder and the
/// method tabs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCard {
    pub rank: usize,
    pub rank_class: &'static str,
    pub order: OrderSummary,
    pub metric: MetricDisplay,
    pub interpretation: Option<Interpretation>,
    /// Only populated on the consensus tab
    pub rank_chips: Vec<RankChip>,
    pub tonnage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusTab {
    pub description: &'static str,
    pub top: Vec<TopMatchCard>,
    pub rest: Vec<OrderCard>,
    /// `"N more"`, present when `rest` is non-empty
    pub rest_label: Option<String>,
    /// No matches at all; the display shows an explicit empty state
    pub empty: bool,
    pub color_space: ColorSpace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodTab {
    pub method: Method,
    pub description: &'static str,
    pub legend: Vec<LegendEntry>,
    pub cards: Vec<OrderCard>,
    /// `"N results"`
    pub count_label: String,
    pub empty: bool,
    pub color_space: ColorSpace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentRow {
    pub order_id: String,
    pub customer_name: String,
    pub required: String,
    pub fulfillable: String,
    pub status: String,
    pub status_class: &'static str,
    /// Progress bar width in percent
    pub progress: f64,
    pub progress_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub number: usize,
    pub text: String,
}

/// Inventory banner, figures, fulfillment table and suggested actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPanel {
    /// Service verdict (`success`, `warning`, `critical`), also the banner
    /// icon class
    pub status_tag: String,
    pub coverage: CoverageSummary,
    /// `"80% coverage"`
    pub coverage_text: String,
    pub summary: String,
    pub available: String,
    pub required: String,
    /// Shortage and recommended production, only while short of stock
    pub shortage: Option<String>,
    pub recommended: Option<String>,
    pub fulfillment: Vec<FulfillmentRow>,
    pub tally: FulfillmentTally,
    pub action_items: Vec<ActionItem>,
    pub high_priority_alert: Option<String>,
}

/// Builds [`DashboardView`]s.
///
/// ```
/// use match_insight::{Assembler, MatchBundle};
///
/// let view = Assembler::new().top_n(3).assemble(&MatchBundle::default());
/// assert!(view.consensus.empty);
/// ```
#[derive(Debug, Clone)]
pub struct Assembler {
    top_n: usize,
    known_orders: Option<HashSet<String>>,
    order_points: Vec<ColorPoint>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            known_orders: None,
            order_points: Vec::new(),
        }
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the consensus top tier.
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// The loaded order catalog. Its ids are used to report consensus
    /// entries that reference unknown orders; its colors form the point
    /// cloud of every colour space plot.
    pub fn order_catalog<'a, I>(mut self, orders: I) -> Self
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut known = HashSet::new();
        self.order_points.clear();
        for order in orders {
            known.insert(order.order_id.clone());
            self.order_points.push(order_point(order));
        }
        self.known_orders = Some(known);
        self
    }

    pub fn assemble(&self, bundle: &MatchBundle) -> DashboardView {
        let pigment = bundle.pigment.as_ref();
        DashboardView {
            pigment: pigment.map(pigment_badge),
            match_notice: format!("Found {} matching orders", bundle.consensus.len()),
            consensus: self.consensus_tab(pigment, &bundle.consensus),
            euclidean: self.method_tab(Tab::Euclidean, pigment, &bundle.euclidean),
            cosine: self.method_tab(Tab::Cosine, pigment, &bundle.cosine),
            knn: self.method_tab(Tab::Knn, pigment, &bundle.knn),
            production: bundle
                .production_recommendation
                .as_ref()
                .map(production_panel),
            unresolved_orders: self.unresolved(&bundle.consensus),
        }
    }

    fn plot(&self, tab: Tab, pigment: Option<&Pigment>, entries: &[OrderMatch]) -> ColorSpace {
        color_space(tab.plot_title(), &self.order_points, pigment, entries)
    }

    fn consensus_tab(&self, pigment: Option<&Pigment>, entries: &[OrderMatch]) -> ConsensusTab {
        let tiers = partition(entries, self.top_n);
        let empty = tiers.is_empty();
        let rest_label = (!tiers.rest.is_empty()).then(|| format!("{} more", tiers.rest.len()));

        ConsensusTab {
            description: Tab::Consensus.description(),
            top: tiers
                .top
                .into_iter()
                .map(|placed| top_match_card(placed.rank, placed.item))
                .collect(),
            rest: tiers
                .rest
                .into_iter()
                .map(|placed| order_card(Tab::Consensus, placed.rank, placed.item))
                .collect(),
            rest_label,
            empty,
            color_space: self.plot(Tab::Consensus, pigment, entries),
        }
    }

    fn method_tab(&self, tab: Tab, pigment: Option<&Pigment>, entries: &[OrderMatch]) -> MethodTab {
        let method = tab.method().unwrap_or(Method::Euclidean);
        let cards: Vec<OrderCard> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let rank = entry
                    .rank
                    .filter(|&r| r > 0)
                    .map_or(index + 1, |r| r as usize);
                order_card(tab, rank, entry)
            })
            .collect();

        MethodTab {
            method,
            description: tab.description(),
            legend: legend(method),
            count_label: format!("{} results", cards.len()),
            empty: cards.is_empty(),
            cards,
            color_space: self.plot(tab, pigment, entries),
        }
    }

    fn unresolved(&self, entries: &[OrderMatch]) -> Vec<String> {
        let Some(known) = &self.known_orders else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        entries
            .iter()
            .map(|entry| entry.order_id.as_str())
            .filter(|id| !known.contains(*id) && seen.insert(*id))
            .map(str::to_string)
            .collect()
    }
}

fn pigment_badge(pigment: &Pigment) -> PigmentBadge {
    PigmentBadge {
        id: pigment.id.clone(),
        hex: pigment
            .hex
            .clone()
            .unwrap_or_else(|| FALLBACK_SWATCH.to_string()),
        lab: format!(
            "L:{} a:{} b:{}",
            to_fixed(pigment.l, 1),
            to_fixed(pigment.a, 1),
            to_fixed(pigment.b, 1)
        ),
        stock: pigment.available_tonnage.map(|t| tonnes(Some(t), 1)),
    }
}

fn text_or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

fn order_summary(entry: &OrderMatch) -> OrderSummary {
    OrderSummary {
        order_id: entry.order_id.clone(),
        customer_name: text_or_dash(entry.customer_name.as_deref()),
        priority: entry.priority.clone().filter(|p| !p.is_empty()),
        hex_color: entry
            .hex_color
            .clone()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| FALLBACK_SWATCH.to_string()),
        l: fixed_or_dash(entry.l, 1),
        a: fixed_or_dash(entry.a, 1),
        b: fixed_or_dash(entry.b, 1),
    }
}

fn rank_chips(entry: &OrderMatch) -> Vec<RankChip> {
    Method::PRIORITY
        .into_iter()
        .map(|method| {
            let rank = method.rank_of(entry);
            RankChip {
                method,
                label: method.label(),
                initial: method.initial(),
                rank: rank_label(rank),
                active: rank.is_some(),
                top: rank.is_some_and(|r| r <= 3),
            }
        })
        .collect()
}

/// The inline badge reads Euclidean ΔE only: the consensus ΔE on the
/// consensus tab, the list's own ΔE on the Euclidean tab, nothing elsewhere.
fn euclidean_badge(tab: Tab, entry: &OrderMatch) -> Option<Interpretation> {
    let delta_e = match tab {
        Tab::Consensus => entry.euclidean_delta_e,
        Tab::Euclidean => entry.delta_e,
        Tab::Cosine | Tab::Knn => None,
    };
    classify(Method::Euclidean, delta_e)
}

fn metric_display(tab: Tab, entry: &OrderMatch) -> MetricDisplay {
    match tab {
        Tab::Euclidean => MetricDisplay {
            value: fixed_or_dash(entry.delta_e, Method::Euclidean.decimals()),
            label: "Delta E",
            unit: "dE",
        },
        Tab::Cosine => MetricDisplay {
            value: fixed_or_dash(entry.similarity, Method::Cosine.decimals()),
            label: "Similarity",
            unit: "",
        },
        Tab::Knn => MetricDisplay {
            value: fixed_or_dash(entry.distance, Method::Knn.decimals()),
            label: "Distance",
            unit: "",
        },
        Tab::Consensus => {
            let headline = select_headline_method(entry);
            MetricDisplay {
                value: headline.value,
                label: headline.label,
                unit: headline.unit,
            }
        }
    }
}

fn top_match_card(rank: usize, entry: &OrderMatch) -> TopMatchCard {
    let medal = Medal::for_rank(rank);
    TopMatchCard {
        rank,
        medal,
        medal_gradient: medal.map(Medal::gradient),
        order: order_summary(entry),
        headline: select_headline_method(entry),
        interpretation: euclidean_badge(Tab::Consensus, entry),
        rank_chips: rank_chips(entry),
        tonnage: fixed_or_dash(entry.required_tonnage, 1),
    }
}

fn order_card(tab: Tab, rank: usize, entry: &OrderMatch) -> OrderCard {
    OrderCard {
        rank,
        rank_class: rank_class(rank),
        order: order_summary(entry),
        metric: metric_display(tab, entry),
        interpretation: euclidean_badge(tab, entry),
        rank_chips: if tab == Tab::Consensus {
            rank_chips(entry)
        } else {
            Vec::new()
        },
        tonnage: fixed_or_dash(entry.required_tonnage, 2),
    }
}

fn tonnes(value: Option<f64>, digits: usize) -> String {
    format!("{} t", fixed_or_dash(value, digits))
}

fn production_panel(rec: &ProductionRecommendation) -> ProductionPanel {
    let coverage = summarize_coverage(rec);
    let short = rec.shortage.is_some_and(|s| s > 0.0);

    let fulfillment = rec
        .fulfillment_details
        .iter()
        .map(|detail| {
            let progress = detail
                .fulfillment_percentage
                .filter(|p| p.is_finite())
                .unwrap_or(0.0);
            FulfillmentRow {
                order_id: detail.order_id.clone(),
                customer_name: text_or_dash(detail.customer_name.as_deref()),
                required: tonnes(detail.required, 2),
                fulfillable: tonnes(detail.can_fulfill, 2),
                status: text_or_dash(detail.status.as_deref()),
                status_class: detail.fulfillment_status().css_class(),
                progress: progress.clamp(0.0, 100.0),
                progress_text: format!("{}%", fixed_or_dash(detail.fulfillment_percentage, 0)),
            }
        })
        .collect();

    ProductionPanel {
        status_tag: rec
            .status
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "success".to_string()),
        coverage_text: format!("{}% coverage", to_fixed(coverage.utilization_percent, 0)),
        coverage,
        summary: text_or_dash(rec.summary.as_deref()),
        available: tonnes(rec.available_tonnage, 1),
        required: tonnes(rec.total_required, 1),
        shortage: short.then(|| tonnes(rec.shortage, 1)),
        recommended: short.then(|| tonnes(rec.production_recommendation, 1)),
        fulfillment,
        tally: tally_fulfillment(&rec.fulfillment_details),
        action_items: rec
            .action_items
            .iter()
            .enumerate()
            .map(|(index, text)| ActionItem {
                number: index + 1,
                text: text.clone(),
            })
            .collect(),
        high_priority_alert: rec
            .high_priority_required
            .filter(|&t| t > 0.0)
            .map(|t| format!("High-priority orders need {} tonnes.", to_fixed(t, 2))),
    }
}
