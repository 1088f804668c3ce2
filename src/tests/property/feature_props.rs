//! Property tests for feature extraction
//!
//! Tests invariants:
//! - Curve distribution sums to the deck size
//! - Color identity is a subset of WUBRG in canonical order
//! - Consistency, manabase and health scores are bounded
//! - Feature extraction is deterministic

use proptest::prelude::*;

use crate::core::deck::{calculate_deck_health, analyze_cards, Card, Color, FeatureProfile};

// ============================================================================
// Generators
// ============================================================================

fn arb_color_set() -> impl Strategy<Value = Vec<Color>> {
    proptest::sample::subsequence(Color::ALL.to_vec(), 0..=3)
}

fn arb_type_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Creature — Human Warrior".to_string()),
        Just("Instant".to_string()),
        Just("Sorcery".to_string()),
        Just("Enchantment".to_string()),
        Just("Artifact".to_string()),
        Just("Artifact Creature — Golem".to_string()),
        Just("Legendary Planeswalker — Jace".to_string()),
        Just("Land".to_string()),
        Just("Basic Land — Forest".to_string()),
    ]
}

fn arb_oracle_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Haste".to_string()),
        Just("Lifelink".to_string()),
        Just("Draw two cards.".to_string()),
        Just("Sacrifice a creature: Scry 1.".to_string()),
        Just("Return target creature card from your graveyard to your hand.".to_string()),
        Just("Put a +1/+1 counter on target creature.".to_string()),
        Just("Prowess".to_string()),
        Just("{T}: Add {G} or {U}.".to_string()),
    ]
}

fn arb_mana_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => (0u32..10).prop_map(f64::from),
        1 => Just(0.5),
        1 => Just(16.0),
    ]
}

fn arb_card(name: String) -> impl Strategy<Value = Card> {
    (arb_mana_value(), arb_type_line(), arb_oracle_text(), arb_color_set()).prop_map(
        move |(mv, type_line, text, colors)| {
            Card::new(name.clone(), mv, type_line)
                .with_oracle_text(text)
                .with_colors(&colors)
        },
    )
}

/// A pool of distinct cards and a deck drawn from it, so decks contain
/// repeated copies of identical cards the way real lists do.
fn arb_deck() -> impl Strategy<Value = Vec<Card>> {
    (1usize..15)
        .prop_flat_map(|size| {
            let pool: Vec<_> = (0..size).map(|i| arb_card(format!("Card {i}"))).collect();
            (pool, prop::collection::vec(0..size, 0..80))
        })
        .prop_map(|(pool, picks)| picks.into_iter().map(|i| pool[i].clone()).collect())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Every card lands in exactly one curve bucket
    #[test]
    fn prop_curve_sums_to_deck_size(deck in arb_deck()) {
        let profile = FeatureProfile::extract(&deck);
        prop_assert_eq!(profile.curve.total() as usize, deck.len());
        prop_assert_eq!(
            profile.curve.land_count + profile.curve.creature_count + profile.curve.non_creature_count,
            deck.len() as u32
        );
    }

    /// Property: Colors are a sorted subset of WUBRG without duplicates
    #[test]
    fn prop_colors_subset_of_wubrg(deck in arb_deck()) {
        let profile = FeatureProfile::extract(&deck);
        let colors = profile.colors();

        prop_assert!(colors.len() <= 5);
        prop_assert!(colors.windows(2).all(|w| w[0].index() < w[1].index()));
        for color in colors {
            prop_assert!(deck.iter().any(|c| c.color_identity.contains(color)));
        }
    }

    /// Property: Scores and averages stay within their documented ranges
    #[test]
    fn prop_scores_bounded(deck in arb_deck()) {
        let profile = FeatureProfile::extract(&deck);
        let health = calculate_deck_health(&profile);

        prop_assert!(profile.consistency.consistency_score <= 100);
        prop_assert!(profile.manabase.quality_score <= 100);
        prop_assert!(health.score <= 100);
        prop_assert!(profile.avg_mana_value() >= 0.0);
        prop_assert!(profile.avg_mana_value().is_finite());
    }

    /// Property: Feature extraction is deterministic
    #[test]
    fn prop_extraction_deterministic(deck in arb_deck()) {
        prop_assert_eq!(FeatureProfile::extract(&deck), FeatureProfile::extract(&deck));
        prop_assert_eq!(analyze_cards(&deck), analyze_cards(&deck));
    }

    /// Property: Card order does not change the profile
    #[test]
    fn prop_extraction_order_insensitive(deck in arb_deck()) {
        let mut reversed = deck.clone();
        reversed.reverse();
        prop_assert_eq!(FeatureProfile::extract(&deck), FeatureProfile::extract(&reversed));
    }

    /// Property: Health grade agrees with the score
    #[test]
    fn prop_health_grade_matches_score(deck in arb_deck()) {
        let health = calculate_deck_health(&FeatureProfile::extract(&deck));
        let expected = crate::core::deck::Grade::from_score(health.score);
        prop_assert_eq!(health.grade, expected);
        prop_assert!(!health.feedback.is_empty());
    }
}
