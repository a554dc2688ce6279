//! Tiered split of the consensus list.
//!
//! The matching service already orders the list; nothing here sorts.

use serde::Serialize;

/// Number of consensus entries promoted to the top tier by default.
pub const DEFAULT_TOP_N: usize = 3;

/// Medal for the first three places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn gradient(self) -> &'static str {
        match self {
            Medal::Gold => "linear-gradient(135deg, #FFD700, #FFA500)",
            Medal::Silver => "linear-gradient(135deg, #C0C0C0, #A8A8A8)",
            Medal::Bronze => "linear-gradient(135deg, #CD7F32, #8B4513)",
        }
    }
}

/// Row badge class for a displayed rank
pub fn rank_class(rank: usize) -> &'static str {
    match rank {
        1 => "r1",
        2 => "r2",
        3 => "r3",
        _ => "r-default",
    }
}

/// An item with its 1-based display rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placed<T> {
    pub rank: usize,
    pub item: T,
}

/// Top tier and remainder of a ranked list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition<T> {
    pub top: Vec<Placed<T>>,
    pub rest: Vec<Placed<T>>,
}

impl<T> Partition<T> {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.rest.is_empty()
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.rest.len()
    }
}

/// Split `items` into the first `top_n` and the rest, numbering ranks
/// continuously from 1.
///
/// A short list lands entirely in `top` without padding.
pub fn partition<T>(items: impl IntoIterator<Item = T>, top_n: usize) -> Partition<T> {
    let mut top = Vec::new();
    let mut rest = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        let placed = Placed {
            rank: index + 1,
            item,
        };
        if index < top_n {
            top.push(placed);
        } else {
            rest.push(placed);
        }
    }
    Partition { top, rest }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks<T>(placed: &[Placed<T>]) -> Vec<usize> {
        placed.iter().map(|p| p.rank).collect()
    }

    #[test]
    fn test_split_keeps_order_and_continues_ranks() {
        let p = partition(["e1", "e2", "e3", "e4", "e5"], 3);
        assert_eq!(p.top.iter().map(|p| p.item).collect::<Vec<_>>(), ["e1", "e2", "e3"]);
        assert_eq!(ranks(&p.top), [1, 2, 3]);
        assert_eq!(p.rest.iter().map(|p| p.item).collect::<Vec<_>>(), ["e4", "e5"]);
        assert_eq!(ranks(&p.rest), [4, 5]);
        assert_eq!(p.len(), 5);
    }

    #[test]
    fn test_short_list_is_all_top() {
        let p = partition(vec![10, 20], 3);
        assert_eq!(ranks(&p.top), [1, 2]);
        assert!(p.rest.is_empty());
    }

    #[test]
    fn test_empty_list() {
        let p = partition(Vec::<u8>::new(), 3);
        assert!(p.is_empty());
    }

    #[test]
    fn test_zero_top_n_puts_everything_in_rest() {
        let p = partition([1, 2], 0);
        assert!(p.top.is_empty());
        assert_eq!(ranks(&p.rest), [1, 2]);
    }

    #[test]
    fn test_medals_and_rank_classes() {
        assert_eq!(Medal::for_rank(1), Some(Medal::Gold));
        assert_eq!(Medal::for_rank(3), Some(Medal::Bronze));
        assert_eq!(Medal::for_rank(4), None);
        assert_eq!(rank_class(2), "r2");
        assert_eq!(rank_class(7), "r-default");
    }
}
