//! Deck Analysis Engine
//!
//! Turns a list of card names into a structured deck profile: mana curve,
//! colors, card types, synergy tags, consistency, manabase quality, a
//! rule-based archetype label, matchup and health heuristics, advisory
//! text, and (optionally) a learned cluster assignment.
//!
//! # Architecture
//!
//! ```text
//!   card names
//!       |
//!       v
//!   +---------------+     +-----------------+
//!   | CardResolver  |---->| ResolutionCache |
//!   +---------------+     +-----------------+
//!       |   CardSource
//!       v
//!   ResolvedDeck (cards + unresolved)
//!       |
//!       v
//!   FeatureProfile ----> classify_archetype ----> matchups / health
//!       |                                              |
//!       +----> ArchetypeLearner (k-means)              v
//!                  |                            recommendations
//!                  v
//!              ModelStore
//! ```
//!
//! Feature extraction, classification, health scoring and
//! recommendations are pure functions. Only resolution and the learner
//! touch shared state.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use deckscope::core::deck::prelude::*;
//!
//! let source = Arc::new(InMemoryCardSource::from_json_file("cards.json")?);
//! let store = Arc::new(JsonFileModelStore::new("learned_archetypes.json"));
//! let analyzer = DeckAnalyzer::new(
//!     CardResolver::new(source),
//!     Arc::new(ArchetypeLearner::new(store)),
//! );
//!
//! let result = analyzer.analyze(&["Lightning Bolt", "Mountain"]).await?;
//! println!("{}", result.archetype);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod analyzer;
pub mod cache;
pub mod card;
pub mod classifier;
pub mod decklist;
pub mod error;
pub mod features;
pub mod health;
pub mod learner;
pub mod matchup;
pub mod meta;
pub mod recommend;
pub mod resolver;
pub mod sideboard;
pub mod source;

// ============================================================================
// Re-exports: Error Types
// ============================================================================

pub use error::{DeckError, Result};

// ============================================================================
// Re-exports: Card Model and Resolution
// ============================================================================

pub use cache::{CacheStats, Resolution, ResolutionCache};
pub use card::{Card, CardType, Color, Legality};
pub use resolver::{CardResolver, ResolvedDeck, DEFAULT_CONCURRENCY};
pub use source::{CardSource, InMemoryCardSource, DEFAULT_FUZZY_THRESHOLD};

// ============================================================================
// Re-exports: Features and Heuristics
// ============================================================================

pub use classifier::{classify_archetype, Archetype, ArchetypeFamily};
pub use features::{FeatureProfile, Grade, SynergyTag};
pub use health::{calculate_deck_health, DeckHealth};
pub use matchup::{generate_matchup_analysis, MatchupAnalysis};
pub use recommend::generate_recommendations;
pub use sideboard::{analyze_sideboard, SideboardAnalysis, SideboardPurpose, SideboardPurposes};

// ============================================================================
// Re-exports: Learning, Meta and Facade
// ============================================================================

pub use analyzer::{analyze_cards, AnalysisResult, DeckAnalyzer};
pub use decklist::{parse_decklist, Decklist};
pub use learner::{
    ArchetypeLearner, ClusterAssignment, ClusterModel, InMemoryModelStore, JsonFileModelStore,
    KMeansConfig, LearnOutcome, ModelStore,
};
pub use meta::{compare_to_meta, default_meta_decks, jaccard_similarity, MetaComparison, MetaDeck};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use super::{
        analyze_cards, parse_decklist, AnalysisResult, Archetype, ArchetypeLearner, Card,
        CardResolver, CardSource, ClusterAssignment, Color, DeckAnalyzer, DeckError,
        FeatureProfile, InMemoryCardSource, InMemoryModelStore, JsonFileModelStore, MetaDeck,
        ModelStore, Result, SideboardAnalysis,
    };
}
