//! Property tests for archetype classification and clustering
//!
//! Tests invariants:
//! - Labels are never empty and their family agrees with the label
//! - The aggro guard is evaluated before the control guard
//! - Colorless decks skip the color-pair families
//! - k-means output is bounded by k and deterministic per seed

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::core::deck::learner::kmeans::squared_distance;
use crate::core::deck::learner::{
    build_feature_vector, kmeans, nearest_centroid, KMeansConfig, FEATURE_DIMENSIONS,
};
use crate::core::deck::{classify_archetype, ArchetypeFamily, Color, FeatureProfile, SynergyTag};

// ============================================================================
// Generators
// ============================================================================

fn arb_colors() -> impl Strategy<Value = Vec<Color>> {
    proptest::sample::subsequence(Color::ALL.to_vec(), 0..=5)
}

fn arb_tags() -> impl Strategy<Value = BTreeSet<SynergyTag>> {
    proptest::sample::subsequence(SynergyTag::ALL.to_vec(), 0..=4)
        .prop_map(|tags| tags.into_iter().collect())
}

/// A profile with the fields classification reads filled in directly.
fn arb_profile() -> impl Strategy<Value = FeatureProfile> {
    (
        0u32..600,
        0u32..40,
        0u32..20,
        0u32..20,
        arb_colors(),
        arb_tags(),
    )
        .prop_map(|(avg_centi, creatures, instants, sorceries, colors, tags)| {
            let mut profile = FeatureProfile::default();
            profile.curve.avg_mana_value = f64::from(avg_centi) / 100.0;
            profile.card_types.creature = creatures;
            profile.card_types.instant = instants;
            profile.card_types.sorcery = sorceries;
            profile.colors.colors = colors;
            profile.synergies = tags;
            profile
        })
}

fn arb_points() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(
        prop::collection::vec(0.0f64..20.0, FEATURE_DIMENSIONS),
        1..30,
    )
}

// ============================================================================
// Classification Properties
// ============================================================================

proptest! {
    /// Property: Every profile gets a non-empty, stable label
    #[test]
    fn prop_label_never_empty(profile in arb_profile()) {
        let archetype = classify_archetype(&profile);
        prop_assert!(!archetype.as_str().is_empty());
        prop_assert_eq!(&archetype, &classify_archetype(&profile));
        prop_assert_eq!(archetype.family(), ArchetypeFamily::from_label(archetype.as_str()));
    }

    /// Property: A colored deck passing the aggro guard is aggro, even with card draw
    #[test]
    fn prop_aggro_guard_wins(
        mut profile in arb_profile(),
        color in proptest::sample::select(Color::ALL.to_vec()),
    ) {
        profile.curve.avg_mana_value = profile.curve.avg_mana_value.min(2.5);
        profile.card_types.creature = profile.spell_count() + 1;
        profile.synergies.insert(SynergyTag::CardDraw);
        if profile.colors().is_empty() {
            profile.colors.colors = vec![color];
        }

        let archetype = classify_archetype(&profile);
        prop_assert_eq!(archetype.family(), ArchetypeFamily::Aggro);
    }

    /// Property: Colorless decks fall through to synergy or default labels
    #[test]
    fn prop_colorless_skips_color_families(mut profile in arb_profile()) {
        profile.colors.colors.clear();

        let label = classify_archetype(&profile).as_str().to_string();
        let allowed = ["Graveyard Combo", "Artifacts", "Lifegain", "Unknown Archetype"];
        prop_assert!(allowed.contains(&label.as_str()), "unexpected label {}", label);
    }
}

// ============================================================================
// Clustering Properties
// ============================================================================

proptest! {
    /// Property: k-means yields at most k centroids of the input dimension
    #[test]
    fn prop_kmeans_bounded_by_k(points in arb_points(), k in 1usize..8) {
        let config = KMeansConfig { k, ..KMeansConfig::default() };
        let result = kmeans(&points, &config);

        prop_assert!(!result.centroids.is_empty());
        prop_assert!(result.centroids.len() <= k);
        prop_assert_eq!(result.assignments.len(), points.len());
        for centroid in &result.centroids {
            prop_assert_eq!(centroid.len(), FEATURE_DIMENSIONS);
            prop_assert!(centroid.iter().all(|v| v.is_finite()));
        }
        for idx in &result.assignments {
            prop_assert!(*idx < result.centroids.len());
        }
    }

    /// Property: The same seed and input always produce the same model
    #[test]
    fn prop_kmeans_deterministic(points in arb_points(), seed in any::<u64>()) {
        let config = KMeansConfig { k: 3, max_iterations: 50, seed };
        prop_assert_eq!(kmeans(&points, &config), kmeans(&points, &config));
    }

    /// Property: A centroid is its own nearest centroid (up to duplicates)
    #[test]
    fn prop_centroid_is_nearest_to_itself(points in arb_points()) {
        let result = kmeans(&points, &KMeansConfig::default());
        for centroid in &result.centroids {
            let idx = nearest_centroid(centroid, &result.centroids);
            prop_assert!(idx.is_some());
            let nearest = &result.centroids[idx.unwrap()];
            prop_assert_eq!(squared_distance(centroid, nearest), 0.0);
        }
    }

    /// Property: Feature vectors always have the fixed layout
    #[test]
    fn prop_feature_vector_layout(profile in arb_profile()) {
        let vector = build_feature_vector(&profile);
        prop_assert_eq!(vector.len(), FEATURE_DIMENSIONS);
        for (color, flag) in Color::ALL.iter().zip(&vector) {
            let expected = if profile.colors.contains(*color) { 1.0 } else { 0.0 };
            prop_assert_eq!(*flag, expected);
        }
    }
}
