//! match-insight: classification and presentation aggregation for
//! pigment-to-order match results
//!
//! The matching service scores every customer order against a pigment with
//! three methods (Euclidean ΔE, cosine similarity, K-nearest-neighbor
//! distance), merges them into a consensus list and adds a production
//! recommendation. This crate turns that raw bundle into what an operator
//! reads:
//!
//! - [`select_headline_method`] picks which method's score an order shows
//! - [`classify`] labels a score with its method's threshold table
//! - [`partition`] splits the consensus list into a medal tier and the rest
//! - [`summarize_coverage`] and [`tally_fulfillment`] read the inventory side
//! - [`color_space`] places the catalog, the pigment and each tab's top
//!   matches in L*a*b*
//! - [`Assembler`] combines all of it into a [`DashboardView`]
//!
//! Everything here is synchronous and pure. Missing or malformed values
//! never fail; they degrade to the `"-"` placeholder, rank
//! [`UNRANKED`](method::UNRANKED), or no label.
//!
//! # Example
//!
//! ```
//! use match_insight::{Assembler, MatchBundle};
//!
//! let bundle: MatchBundle = serde_json::from_str(r#"{
//!     "success": true,
//!     "consensus": [{"orderId": "ORD-1", "euclideanRank": 1, "euclideanDeltaE": 0.42}]
//! }"#).unwrap();
//!
//! let view = Assembler::new().assemble(&bundle);
//! assert_eq!(view.consensus.top[0].headline.value, "0.42");
//! assert_eq!(view.consensus.top[0].interpretation.unwrap().label, "Imperceptible");
//! ```

pub mod assemble;
pub mod bundle;
pub mod classify;
pub mod color_space;
pub mod consensus;
pub mod format;
pub mod fulfillment;
pub mod method;
pub mod scale;


pub use assemble::{
    ActionItem, Assembler, ConsensusTab, DashboardView, FulfillmentRow, MethodTab,
    MetricDisplay, OrderCard, OrderSummary, PigmentBadge, ProductionPanel, RankChip, Tab,
    TopMatchCard,
};
pub use bundle::{FulfillmentDetail, MatchBundle, Order, OrderMatch, Pigment, ProductionRecommendation};
pub use classify::{classify, legend, Interpretation, LegendEntry};
pub use color_space::{ColorHighlight, ColorPoint, ColorSpace};
pub use consensus::{partition, Medal, Partition, Placed, DEFAULT_TOP_N};
pub use fulfillment::{
    summarize_coverage, tally_fulfillment, CoverageSummary, FulfillmentStatus, FulfillmentTally,
};
pub use method::{select_headline_method, HeadlineMetric, Method, UNRANKED};
pub use scale::Severity;
