//! Deck consistency: how committed the deck is to redundant copies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::deck::card::Card;

/// Number of distinct cards played exactly 1, 2, 3 or 4+ times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplesHistogram {
    pub singletons: u32,
    pub two_ofs: u32,
    pub three_ofs: u32,
    pub four_plus: u32,
}

/// Consistency statistics for a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyStats {
    pub unique_card_count: u32,
    pub total_card_count: u32,
    pub multiples: MultiplesHistogram,

    /// `round(100 * (4*four_plus + 3*three_ofs + 2*two_ofs) / total)`, in `[0, 100]`.
    pub consistency_score: u32,
}

/// Group by exact name and score redundancy.
pub fn analyze_deck_consistency(cards: &[Card]) -> ConsistencyStats {
    let mut copies: HashMap<&str, u32> = HashMap::new();
    for card in cards {
        *copies.entry(card.name.as_str()).or_insert(0) += 1;
    }

    let mut multiples = MultiplesHistogram::default();
    for count in copies.values() {
        match count {
            1 => multiples.singletons += 1,
            2 => multiples.two_ofs += 1,
            3 => multiples.three_ofs += 1,
            _ => multiples.four_plus += 1,
        }
    }

    let total = cards.len() as u32;
    let weighted = 4 * multiples.four_plus + 3 * multiples.three_ofs + 2 * multiples.two_ofs;
    let consistency_score = if total == 0 {
        0
    } else {
        ((100.0 * weighted as f64 / total as f64).round() as u32).min(100)
    };

    ConsistencyStats {
        unique_card_count: copies.len() as u32,
        total_card_count: total,
        multiples,
        consistency_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copies(name: &str, n: usize) -> Vec<Card> {
        (0..n).map(|_| Card::new(name, 1.0, "Instant")).collect()
    }

    #[test]
    fn test_all_four_ofs_scores_full() {
        let mut cards = copies("a", 4);
        cards.extend(copies("b", 4));
        let stats = analyze_deck_consistency(&cards);
        assert_eq!(stats.multiples.four_plus, 2);
        assert_eq!(stats.consistency_score, 100);
        assert_eq!(stats.unique_card_count, 2);
    }

    #[test]
    fn test_singletons_score_zero() {
        let cards: Vec<Card> = (0..10)
            .map(|i| Card::new(format!("card {i}"), 1.0, "Instant"))
            .collect();
        let stats = analyze_deck_consistency(&cards);
        assert_eq!(stats.multiples.singletons, 10);
        assert_eq!(stats.consistency_score, 0);
    }

    #[test]
    fn test_mixed_histogram() {
        let mut cards = copies("four", 4);
        cards.extend(copies("three", 3));
        cards.extend(copies("two", 2));
        cards.extend(copies("one", 1));
        let stats = analyze_deck_consistency(&cards);
        assert_eq!(
            stats.multiples,
            MultiplesHistogram {
                singletons: 1,
                two_ofs: 1,
                three_ofs: 1,
                four_plus: 1,
            }
        );
        // (4 + 3 + 2) / 10 cards
        assert_eq!(stats.consistency_score, 90);
    }

    #[test]
    fn test_many_copies_capped_at_four_weight() {
        // 20 copies of one card: 4 / 20 = 20
        let stats = analyze_deck_consistency(&copies("Relentless Rats", 20));
        assert_eq!(stats.consistency_score, 20);
    }

    #[test]
    fn test_empty_deck() {
        let stats = analyze_deck_consistency(&[]);
        assert_eq!(stats, ConsistencyStats::default());
    }
}
