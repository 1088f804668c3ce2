//! Deck analysis facade.
//!
//! [`DeckAnalyzer`] wires resolution, feature extraction, classification
//! and learning together behind four operations: `analyze`,
//! `analyze_sideboard`, `classify_deck` and `learn_clusters`.
//! [`analyze_cards`] runs the pure part of `analyze` on cards the caller
//! already resolved.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::card::{Card, Color};
use super::classifier::{classify_archetype, Archetype};
use super::error::{DeckError, Result};
use super::features::{
    CardTypeCounts, ConsistencyStats, FeatureProfile, ManaCurve, ManabaseAnalysis, SynergyTag,
};
use super::health::{calculate_deck_health, DeckHealth};
use super::learner::{ArchetypeLearner, ClusterAssignment, LearnOutcome};
use super::matchup::{generate_matchup_analysis, MatchupAnalysis};
use super::meta::{compare_to_meta, MetaComparison, MetaDeck};
use super::recommend::generate_recommendations;
use super::resolver::CardResolver;
use super::sideboard::{analyze_sideboard, SideboardAnalysis};

// ============================================================================
// AnalysisResult
// ============================================================================

/// Full analysis of a main deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub archetype: Archetype,
    pub colors: Vec<Color>,
    pub mana_curve: ManaCurve,
    pub card_types: CardTypeCounts,
    pub synergies: BTreeSet<SynergyTag>,
    pub consistency: ConsistencyStats,
    pub manabase: ManabaseAnalysis,
    pub matchups: MatchupAnalysis,
    pub deck_health: DeckHealth,
    pub recommendations: String,

    /// Input names that did not resolve, duplicates preserved.
    #[serde(default)]
    pub unresolved: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaComparison>,
}

/// Analyse already-resolved cards. Pure and deterministic.
pub fn analyze_cards(cards: &[Card]) -> AnalysisResult {
    let profile = FeatureProfile::extract(cards);
    let archetype = classify_archetype(&profile);
    let matchups = generate_matchup_analysis(&archetype);
    let deck_health = calculate_deck_health(&profile);
    let recommendations = generate_recommendations(&profile, &archetype, &matchups);

    let FeatureProfile {
        curve,
        colors,
        card_types,
        synergies,
        consistency,
        manabase,
    } = profile;

    AnalysisResult {
        archetype,
        colors: colors.colors,
        mana_curve: curve,
        card_types,
        synergies,
        consistency,
        manabase,
        matchups,
        deck_health,
        recommendations,
        unresolved: Vec::new(),
        meta: None,
    }
}

// ============================================================================
// DeckAnalyzer
// ============================================================================

pub struct DeckAnalyzer {
    resolver: CardResolver,
    learner: Arc<ArchetypeLearner>,
    meta_decks: Option<Vec<MetaDeck>>,
}

impl DeckAnalyzer {
    pub fn new(resolver: CardResolver, learner: Arc<ArchetypeLearner>) -> Self {
        Self {
            resolver,
            learner,
            meta_decks: None,
        }
    }

    /// Builder method to compare analysed decks against a metagame.
    pub fn with_meta_decks(mut self, meta_decks: Vec<MetaDeck>) -> Self {
        self.meta_decks = Some(meta_decks);
        self
    }

    pub fn resolver(&self) -> &CardResolver {
        &self.resolver
    }

    pub fn learner(&self) -> &Arc<ArchetypeLearner> {
        &self.learner
    }

    /// Resolve and analyse a main deck.
    ///
    /// Only an empty name list is rejected. Unresolved names are dropped
    /// and listed in the result; a deck with nothing resolved yields a
    /// zero-valued analysis.
    #[instrument(skip_all, fields(cards = names.len()))]
    pub async fn analyze<S: AsRef<str>>(&self, names: &[S]) -> Result<AnalysisResult> {
        if names.is_empty() {
            return Err(DeckError::EmptyInput);
        }

        let resolved = self.resolver.resolve_deck(names).await;
        let mut result = analyze_cards(&resolved.cards);
        result.unresolved = resolved.unresolved;

        if let Some(meta) = &self.meta_decks {
            result.meta = Some(compare_to_meta(names, meta));
        }

        log::info!(
            "Analysed deck: {} cards, archetype '{}', health {}",
            names.len(),
            result.archetype,
            result.deck_health.score
        );
        Ok(result)
    }

    /// Resolve and classify a sideboard against its main-deck analysis.
    ///
    /// `None` when the sideboard is empty or nothing in it resolves.
    pub async fn analyze_sideboard<S: AsRef<str>>(
        &self,
        names: &[S],
        main: &AnalysisResult,
    ) -> Option<SideboardAnalysis> {
        if names.is_empty() {
            return None;
        }
        let resolved = self.resolver.resolve_deck(names).await;
        analyze_sideboard(&resolved.cards, &main.archetype, &main.colors)
    }

    /// Assign a deck to its nearest learned cluster.
    #[instrument(skip_all, fields(cards = names.len()))]
    pub async fn classify_deck<S: AsRef<str>>(&self, names: &[S]) -> Result<ClusterAssignment> {
        if names.is_empty() {
            return Err(DeckError::EmptyInput);
        }
        let resolved = self.resolver.resolve_deck(names).await;
        let profile = FeatureProfile::extract(&resolved.cards);
        Ok(self.learner.classify(&profile).await)
    }

    /// Resolve reference decks and relearn the cluster model.
    #[instrument(skip_all, fields(decks = decks.len()))]
    pub async fn learn_clusters(&self, decks: &[MetaDeck]) -> Result<LearnOutcome> {
        let mut profiles = Vec::with_capacity(decks.len());
        for deck in decks {
            let resolved = self.resolver.resolve_deck(deck.key_cards.as_slice()).await;
            profiles.push((deck.name.clone(), FeatureProfile::extract(&resolved.cards)));
        }
        self.learner.learn(profiles).await
    }
}
