//! Color identity extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::deck::card::{Card, Color};

/// Union of the deck's color identities.
///
/// Colorless and land-only decks produce an empty set; downstream stages
/// treat that as "colorless/unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorIdentity {
    /// Colors present, sorted WUBRG.
    pub colors: Vec<Color>,

    /// Number of cards whose identity includes each present color.
    pub counts: BTreeMap<Color, u32>,
}

impl ColorIdentity {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Colors concatenated as symbols, e.g. "UW" becomes "WU".
    pub fn key(&self) -> String {
        self.colors.iter().map(|c| c.symbol()).collect()
    }

    /// The most represented color, ties broken by WUBRG order.
    pub fn dominant(&self) -> Option<Color> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(color, _)| *color)
    }
}

/// Union every card's color identity and count occurrences per color.
pub fn get_color_identity(cards: &[Card]) -> ColorIdentity {
    let mut counts: BTreeMap<Color, u32> = BTreeMap::new();
    for card in cards {
        for color in &card.color_identity {
            *counts.entry(*color).or_insert(0) += 1;
        }
    }

    ColorIdentity {
        colors: counts.keys().copied().collect(),
        counts,
    }
}
