//! L*a*b* scatter data for the per-tab colour space plot.
//!
//! Every catalog order is a faint point; the pigment and the tab's first
//! three matches are drawn on top, each match linked to the pigment.

use serde::Serialize;

use crate::bundle::{Order, OrderMatch, Pigment};

/// Matches highlighted per tab.
pub const HIGHLIGHTS: usize = 3;

const PLACES: [&str; HIGHLIGHTS] = ["1st", "2nd", "3rd"];
/// Gold, silver, bronze
const RINGS: [&str; HIGHLIGHTS] = ["#fbbf24", "#9ca3af", "#d97706"];

const ORDER_COLOR: &str = "#ccc";
const PIGMENT_COLOR: &str = "#6366f1";
const MATCH_COLOR: &str = "#10b981";

/// One plotted L*a*b* coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPoint {
    pub label: String,
    pub l: f64,
    pub a: f64,
    pub b: f64,
    pub color: String,
}

/// A top match drawn over the order cloud.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorHighlight {
    /// `"1st"`, `"2nd"` or `"3rd"`
    pub place: &'static str,
    pub ring: &'static str,
    pub point: ColorPoint,
    /// A line joins this match to the pigment
    pub linked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSpace {
    pub title: String,
    pub orders: Vec<ColorPoint>,
    pub pigment: Option<ColorPoint>,
    pub highlights: Vec<ColorHighlight>,
}

pub fn order_point(order: &Order) -> ColorPoint {
    ColorPoint {
        label: order.order_id.clone(),
        l: order.l,
        a: order.a,
        b: order.b,
        color: non_empty(order.hex_color.as_deref(), ORDER_COLOR),
    }
}

fn non_empty(color: Option<&str>, fallback: &str) -> String {
    color
        .filter(|c| !c.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Build the plot for one tab.
///
/// Matches without a full L*a*b* triple keep their place but are not drawn,
/// so the 2nd match stays "2nd" even when the 1st lacks coordinates.
pub fn color_space(
    title: impl Into<String>,
    orders: &[ColorPoint],
    pigment: Option<&Pigment>,
    matches: &[OrderMatch],
) -> ColorSpace {
    let pigment = pigment.map(|p| ColorPoint {
        label: "PIGMENT".to_string(),
        l: p.l,
        a: p.a,
        b: p.b,
        color: non_empty(p.hex.as_deref(), PIGMENT_COLOR),
    });
    let linked = pigment.is_some();

    let highlights = matches
        .iter()
        .take(HIGHLIGHTS)
        .enumerate()
        .filter_map(|(index, entry)| {
            let (l, a, b) = (entry.l?, entry.a?, entry.b?);
            Some(ColorHighlight {
                place: PLACES[index],
                ring: RINGS[index],
                point: ColorPoint {
                    label: format!("{}: {}", PLACES[index], entry.order_id),
                    l,
                    a,
                    b,
                    color: non_empty(entry.hex_color.as_deref(), MATCH_COLOR),
                },
                linked,
            })
        })
        .collect();

    ColorSpace {
        title: title.into(),
        orders: orders.to_vec(),
        pigment,
        highlights,
    }
}
