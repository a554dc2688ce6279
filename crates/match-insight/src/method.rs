//! Matching methods and headline metric selection.

use serde::{Deserialize, Serialize};

use crate::bundle::OrderMatch;
use crate::format::{fixed_or_dash, to_fixed, PLACEHOLDER};
use crate::scale::{self, Scale};

/// Rank assumed for a method that did not rank an order.
pub const UNRANKED: u32 = 999;

/// The three matching methods, in tie-break priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Euclidean,
    Cosine,
    Knn,
}

impl Method {
    /// Tie-break priority: an earlier method wins an equal rank.
    pub const PRIORITY: [Method; 3] = [Method::Euclidean, Method::Cosine, Method::Knn];

    pub fn label(self) -> &'static str {
        match self {
            Method::Euclidean => "Euclidean",
            Method::Cosine => "Cosine",
            Method::Knn => "KNN",
        }
    }

    /// One-letter label used on compact rank chips
    pub fn initial(self) -> &'static str {
        match self {
            Method::Euclidean => "E",
            Method::Cosine => "C",
            Method::Knn => "K",
        }
    }

    /// Unit suffix of the headline value
    pub fn unit(self) -> &'static str {
        match self {
            Method::Euclidean => "dE",
            Method::Cosine => "sim",
            Method::Knn => "dist",
        }
    }

    /// Fractional digits the method's score is displayed with
    pub fn decimals(self) -> usize {
        match self {
            Method::Euclidean => 2,
            Method::Cosine => 4,
            Method::Knn => 3,
        }
    }

    pub fn scale(self) -> &'static Scale {
        match self {
            Method::Euclidean => &scale::EUCLIDEAN,
            Method::Cosine => &scale::COSINE,
            Method::Knn => &scale::KNN,
        }
    }

    /// The consensus rank this method gave the order, if any.
    ///
    /// A zero rank is not a valid position and counts as unranked.
    pub fn rank_of(self, entry: &OrderMatch) -> Option<u32> {
        let rank = match self {
            Method::Euclidean => entry.euclidean_rank,
            Method::Cosine => entry.cosine_rank,
            Method::Knn => entry.knn_rank,
        };
        rank.filter(|&r| r > 0)
    }

    /// Rank used for comparison, with [`UNRANKED`] for missing ranks
    pub fn effective_rank(self, entry: &OrderMatch) -> u32 {
        self.rank_of(entry).unwrap_or(UNRANKED)
    }

    /// The method's score for the order: the consensus-prefixed field
    /// first, then the plain field a method list carries.
    pub fn score_of(self, entry: &OrderMatch) -> Option<f64> {
        match self {
            Method::Euclidean => entry.euclidean_delta_e.or(entry.delta_e),
            Method::Cosine => entry.cosine_similarity.or(entry.similarity),
            Method::Knn => entry.knn_distance.or(entry.distance),
        }
    }

    /// Whether the order carries anything at all for this method
    fn is_candidate(self, entry: &OrderMatch) -> bool {
        self.rank_of(entry).is_some() || self.score_of(entry).is_some()
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Euclidean => "euclidean",
            Method::Cosine => "cosine",
            Method::Knn => "knn",
        })
    }
}

/// The metric shown as an order's headline value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineMetric {
    /// Winning method; `None` for the match-percentage fallback
    pub method: Option<Method>,
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    pub rank: Option<u32>,
}

/// Pick the method that ranked `entry` best and format its score.
///
/// Missing ranks count as [`UNRANKED`]; equal ranks resolve in
/// [`Method::PRIORITY`] order. An entry with no rank and no score for any
/// method falls back to its match percentage.
pub fn select_headline_method(entry: &OrderMatch) -> HeadlineMetric {
    if !Method::PRIORITY.iter().any(|m| m.is_candidate(entry)) {
        return HeadlineMetric {
            method: None,
            label: "Match",
            value: fixed_or_dash(entry.match_percentage, 0),
            unit: "%",
            rank: None,
        };
    }

    // min_by_key keeps the first of equal minima, so PRIORITY order decides ties
    let best = Method::PRIORITY
        .into_iter()
        .min_by_key(|m| m.effective_rank(entry))
        .unwrap_or(Method::Euclidean);

    HeadlineMetric {
        method: Some(best),
        label: best.label(),
        value: best
            .score_of(entry)
            .map_or_else(|| PLACEHOLDER.to_string(), |v| to_fixed(v, best.decimals())),
        unit: best.unit(),
        rank: best.rank_of(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(e: Option<u32>, c: Option<u32>, k: Option<u32>) -> OrderMatch {
        OrderMatch {
            order_id: "ORD-1".into(),
            euclidean_rank: e,
            cosine_rank: c,
            knn_rank: k,
            euclidean_delta_e: Some(1.2345),
            cosine_similarity: Some(0.998765),
            knn_distance: Some(0.41234),
            ..Default::default()
        }
    }

    #[test]
    fn test_lowest_rank_wins() {
        let m = select_headline_method(&ranked(Some(3), Some(1), Some(2)));
        assert_eq!(m.method, Some(Method::Cosine));
        assert_eq!(m.value, "0.9988");
        assert_eq!(m.unit, "sim");
        assert_eq!(m.rank, Some(1));

        let m = select_headline_method(&ranked(Some(3), Some(2), Some(1)));
        assert_eq!(m.method, Some(Method::Knn));
        assert_eq!(m.value, "0.412");
        assert_eq!(m.label, "KNN");
    }

    #[test]
    fn test_ties_follow_priority() {
        let m = select_headline_method(&ranked(Some(1), Some(1), Some(1)));
        assert_eq!(m.method, Some(Method::Euclidean));
        assert_eq!(m.value, "1.23");

        let m = select_headline_method(&ranked(Some(2), Some(1), Some(1)));
        assert_eq!(m.method, Some(Method::Cosine));
    }

    #[test]
    fn test_missing_ranks_are_unranked() {
        let m = select_headline_method(&ranked(None, None, Some(3)));
        assert_eq!(m.method, Some(Method::Knn));
        assert_eq!(m.rank, Some(3));

        // all unranked but scores present: every rank is 999, euclidean wins
        let m = select_headline_method(&ranked(None, None, None));
        assert_eq!(m.method, Some(Method::Euclidean));
        assert_eq!(m.rank, None);
    }

    #[test]
    fn test_zero_rank_counts_as_missing() {
        let m = select_headline_method(&ranked(Some(0), Some(4), None));
        assert_eq!(m.method, Some(Method::Cosine));
    }

    #[test]
    fn test_winner_without_score_shows_placeholder() {
        let entry = OrderMatch {
            cosine_rank: Some(1),
            ..Default::default()
        };
        let m = select_headline_method(&entry);
        assert_eq!(m.method, Some(Method::Cosine));
        assert_eq!(m.value, "-");
    }

    #[test]
    fn test_plain_method_fields_are_used_as_fallback() {
        let entry = OrderMatch {
            euclidean_rank: Some(1),
            delta_e: Some(0.5),
            ..Default::default()
        };
        assert_eq!(select_headline_method(&entry).value, "0.50");
    }

    #[test]
    fn test_no_candidate_falls_back_to_match_percentage() {
        let entry = OrderMatch {
            match_percentage: Some(87.6),
            ..Default::default()
        };
        let m = select_headline_method(&entry);
        assert_eq!(m.method, None);
        assert_eq!(m.label, "Match");
        assert_eq!(m.value, "88");
        assert_eq!(m.unit, "%");
        assert_eq!(m.rank, None);

        let m = select_headline_method(&OrderMatch::default());
        assert_eq!(m.value, "-");
    }

    #[test]
    fn test_method_display_and_serde_agree() {
        for method in Method::PRIORITY {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{method}\""));
        }
    }
}
