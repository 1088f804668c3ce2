//! Test Fixtures
//!
//! Provides shared cards, decks and engine wiring for tests that need a
//! realistic card pool without a card database on disk.

use std::sync::Arc;

use crate::core::deck::{
    ArchetypeLearner, Card, CardResolver, Color, DeckAnalyzer, InMemoryCardSource,
    InMemoryModelStore,
};

// =============================================================================
// Card Fixtures
// =============================================================================

/// A basic land of the given color.
pub fn basic_land(color: Color) -> Card {
    let name = match color {
        Color::White => "Plains",
        Color::Blue => "Island",
        Color::Black => "Swamp",
        Color::Red => "Mountain",
        Color::Green => "Forest",
    };
    Card::new(name, 0.0, format!("Basic Land — {name}"))
}

/// Every card the fixture decks reference.
pub fn card_pool() -> Vec<Card> {
    vec![
        Card::new("Goblin Guide", 1.0, "Creature — Goblin Scout")
            .with_colors(&[Color::Red])
            .with_mana_cost("{R}")
            .with_oracle_text("Haste"),
        Card::new("Monastery Swiftspear", 1.0, "Creature — Human Monk")
            .with_colors(&[Color::Red])
            .with_mana_cost("{R}")
            .with_oracle_text("Haste\nProwess"),
        Card::new("Bloodrage Brawler", 2.0, "Creature — Minotaur Warrior")
            .with_colors(&[Color::Red])
            .with_mana_cost("{1}{R}")
            .with_oracle_text("First strike"),
        Card::new("Lightning Bolt", 1.0, "Instant")
            .with_colors(&[Color::Red])
            .with_mana_cost("{R}")
            .with_oracle_text("Lightning Bolt deals 3 damage to any target."),
        Card::new("Counterspell", 2.0, "Instant")
            .with_colors(&[Color::Blue])
            .with_mana_cost("{U}{U}")
            .with_oracle_text("Counter target spell."),
        Card::new("Divination", 3.0, "Sorcery")
            .with_colors(&[Color::Blue])
            .with_mana_cost("{2}{U}")
            .with_oracle_text("Draw two cards."),
        Card::new("Think Twice", 2.0, "Instant")
            .with_colors(&[Color::Blue])
            .with_mana_cost("{1}{U}")
            .with_oracle_text("Draw a card.\nFlashback {2}{U}"),
        Card::new("Fact or Fiction", 4.0, "Instant")
            .with_colors(&[Color::Blue])
            .with_mana_cost("{3}{U}")
            .with_oracle_text(
                "Reveal the top five cards of your library. Put one pile into your hand. You draw a card for each card in that pile.",
            ),
        Card::new("Murder", 3.0, "Instant")
            .with_colors(&[Color::Black])
            .with_mana_cost("{1}{B}{B}")
            .with_oracle_text("Destroy target creature."),
        Card::new("Negate", 2.0, "Instant")
            .with_colors(&[Color::Blue])
            .with_mana_cost("{1}{U}")
            .with_oracle_text("Counter target noncreature spell."),
        Card::new("Fog", 1.0, "Instant")
            .with_colors(&[Color::Green])
            .with_mana_cost("{G}")
            .with_oracle_text("Prevent all combat damage that would be dealt this turn."),
        Card::new("Eldrazi Drone", 1.0, "Creature — Eldrazi Drone").with_stats("1", "1"),
        basic_land(Color::Red),
        basic_land(Color::Blue),
        basic_land(Color::Black),
    ]
}

// =============================================================================
// Deck Fixtures
// =============================================================================

fn copies(name: &str, n: usize) -> impl Iterator<Item = String> + '_ {
    std::iter::repeat(name.to_string()).take(n)
}

/// Sixty-card mono-red creature deck.
pub fn mono_red_aggro() -> Vec<String> {
    copies("Goblin Guide", 12)
        .chain(copies("Monastery Swiftspear", 12))
        .chain(copies("Bloodrage Brawler", 8))
        .chain(copies("Lightning Bolt", 8))
        .chain(copies("Mountain", 20))
        .collect()
}

/// Sixty-card blue draw-go deck.
pub fn mono_blue_control() -> Vec<String> {
    copies("Counterspell", 10)
        .chain(copies("Divination", 8))
        .chain(copies("Think Twice", 8))
        .chain(copies("Fact or Fiction", 8))
        .chain(copies("Negate", 2))
        .chain(copies("Island", 24))
        .collect()
}

/// Colorless creatures and lands only.
pub fn colorless_deck() -> Vec<String> {
    copies("Eldrazi Drone", 20)
        .chain(copies("Mountain", 20))
        .collect()
}

// =============================================================================
// Engine Fixtures
// =============================================================================

/// Analyzer over [`card_pool`] with an in-memory model store.
pub fn create_test_analyzer() -> DeckAnalyzer {
    let source = Arc::new(InMemoryCardSource::new(card_pool()));
    let learner = ArchetypeLearner::new(Arc::new(InMemoryModelStore::new()));
    DeckAnalyzer::new(CardResolver::new(source), Arc::new(learner))
}
