//! Mana curve extraction.

use serde::{Deserialize, Serialize};

use crate::core::deck::card::Card;

/// Number of curve buckets: mana values 0..=6 plus a "7 or more" bucket.
pub const CURVE_BUCKETS: usize = 8;

/// Mana curve of a deck.
///
/// `distribution[i]` counts cards with mana value `i`; the last bucket
/// holds everything at 7 or above. Lands count in bucket 0, so the
/// distribution always sums to the number of resolved cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManaCurve {
    pub distribution: [u32; CURVE_BUCKETS],

    /// Cards whose type line contains "Creature".
    pub creature_count: u32,

    /// Non-land cards that are not creatures.
    pub non_creature_count: u32,

    pub land_count: u32,

    /// Mean mana value over non-land cards, rounded to two decimals.
    /// Zero when the deck has no non-land cards.
    pub avg_mana_value: f64,
}

impl ManaCurve {
    /// Total number of cards counted.
    pub fn total(&self) -> u32 {
        self.distribution.iter().sum()
    }

    /// Non-land card count.
    pub fn spell_count(&self) -> u32 {
        self.total() - self.land_count
    }
}

/// Bucket each card's mana value and tally creature/non-creature/land.
pub fn compute_mana_curve(cards: &[Card]) -> ManaCurve {
    let mut curve = ManaCurve::default();
    let mut nonland_total = 0.0;
    let mut nonland_count = 0u32;

    for card in cards {
        curve.distribution[card.curve_bucket()] += 1;

        if card.is_land() {
            curve.land_count += 1;
            continue;
        }

        if card.is_creature() {
            curve.creature_count += 1;
        } else {
            curve.non_creature_count += 1;
        }

        if card.mana_value.is_finite() {
            nonland_total += card.mana_value.max(0.0);
        }
        nonland_count += 1;
    }

    curve.avg_mana_value = if nonland_count == 0 {
        0.0
    } else {
        round2(nonland_total / nonland_count as f64)
    };

    curve
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
