//! Analyzer tests over the shared card pool.

use super::common::*;
use crate::core::deck::{ArchetypeFamily, ClusterAssignment, MetaDeck, SideboardPurpose};

#[tokio::test]
async fn test_mono_red_aggro_profile() {
    let result = create_test_analyzer()
        .analyze(mono_red_aggro().as_slice())
        .await
        .unwrap();

    assert_eq!(result.archetype.as_str(), "Mono-Red Aggro");
    assert_eq!(result.archetype.family(), ArchetypeFamily::Aggro);
    assert_eq!(result.mana_curve.total(), 60);
    assert_eq!(result.mana_curve.land_count, 20);
    assert_eq!(result.mana_curve.avg_mana_value, 1.2);
    assert!(result.unresolved.is_empty());
    assert_eq!(result.matchups.favorable, vec!["Control", "Combo"]);
}

#[tokio::test]
async fn test_blue_control_profile() {
    let result = create_test_analyzer()
        .analyze(mono_blue_control().as_slice())
        .await
        .unwrap();

    assert_eq!(result.archetype.family(), ArchetypeFamily::Control);
    assert_eq!(result.card_types.creature, 0);
    assert!(result.recommendations.contains("Aggro"));
}

#[tokio::test]
async fn test_colorless_deck_is_unknown() {
    let result = create_test_analyzer()
        .analyze(colorless_deck().as_slice())
        .await
        .unwrap();

    assert!(result.colors.is_empty());
    assert!(result.synergies.is_empty());
    assert_eq!(result.mana_curve.creature_count, 20);
    assert_eq!(result.mana_curve.avg_mana_value, 1.0);
    assert!(result.archetype.is_unknown());
}

#[tokio::test]
async fn test_sideboard_against_main_deck() {
    let analyzer = create_test_analyzer();
    let main = analyzer.analyze(mono_red_aggro().as_slice()).await.unwrap();
    let sideboard = ["Murder", "Murder", "Murder", "Counterspell", "Counterspell", "Fog"];

    let analysis = analyzer
        .analyze_sideboard(&sideboard, &main)
        .await
        .unwrap();
    assert_eq!(analysis.total_cards, 6);
    assert_eq!(analysis.purposes.get(SideboardPurpose::Removal).len(), 3);
    assert_eq!(analysis.purposes.get(SideboardPurpose::Counterspells).len(), 2);
    assert_eq!(analysis.purposes.get(SideboardPurpose::Other), ["Fog"]);
    assert_eq!(analysis.coverage, 83.3);
    assert!(analysis
        .recommendations
        .iter()
        .any(|r| r.contains("Murder") && r.contains("Counterspell")));

    let empty: [&str; 0] = [];
    assert!(analyzer.analyze_sideboard(&empty, &main).await.is_none());
}

#[tokio::test]
async fn test_learn_then_classify() {
    let analyzer = create_test_analyzer();
    assert_eq!(
        analyzer.classify_deck(mono_red_aggro().as_slice()).await.unwrap(),
        ClusterAssignment::Unknown
    );

    let references = vec![
        MetaDeck::new("Burn", mono_red_aggro()),
        MetaDeck::new("Draw-Go", mono_blue_control()),
        MetaDeck::new("Drones", colorless_deck()),
    ];
    let outcome = analyzer.learn_clusters(&references).await.unwrap();
    assert_eq!(outcome.decks_used, 3);
    assert_eq!(outcome.k, 3);

    let red = analyzer.classify_deck(mono_red_aggro().as_slice()).await.unwrap();
    let blue = analyzer.classify_deck(mono_blue_control().as_slice()).await.unwrap();
    assert!(red.index().is_some());
    assert_ne!(red, blue);
}
