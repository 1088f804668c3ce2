//! Card-type tallies.

use serde::{Deserialize, Serialize};

use crate::core::deck::card::{Card, CardType};

/// Count of cards per type category. Categories are non-exclusive: an
/// artifact creature increments both `artifact` and `creature`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTypeCounts {
    pub creature: u32,
    pub instant: u32,
    pub sorcery: u32,
    pub enchantment: u32,
    pub artifact: u32,
    pub planeswalker: u32,
    pub land: u32,
}

impl CardTypeCounts {
    /// Count for one category.
    pub fn get(&self, card_type: CardType) -> u32 {
        match card_type {
            CardType::Creature => self.creature,
            CardType::Instant => self.instant,
            CardType::Sorcery => self.sorcery,
            CardType::Enchantment => self.enchantment,
            CardType::Artifact => self.artifact,
            CardType::Planeswalker => self.planeswalker,
            CardType::Land => self.land,
        }
    }

    fn increment(&mut self, card_type: CardType) {
        let slot = match card_type {
            CardType::Creature => &mut self.creature,
            CardType::Instant => &mut self.instant,
            CardType::Sorcery => &mut self.sorcery,
            CardType::Enchantment => &mut self.enchantment,
            CardType::Artifact => &mut self.artifact,
            CardType::Planeswalker => &mut self.planeswalker,
            CardType::Land => &mut self.land,
        };
        *slot += 1;
    }
}

/// Test each card's type line against all seven categories.
pub fn analyze_card_types(cards: &[Card]) -> CardTypeCounts {
    let mut counts = CardTypeCounts::default();
    for card in cards {
        for card_type in CardType::ALL {
            if card.has_type(card_type) {
                counts.increment(card_type);
            }
        }
    }
    counts
}
