//! Feature extraction over a resolved deck.
//!
//! Every extractor is a pure function of a `&[Card]` slice: no I/O, no
//! clock, no randomness. Running them twice on the same cards yields
//! identical output. Empty input yields zero-valued features, never an
//! error.
//!
//! # Module Structure
//!
//! - [`curve`]: mana-curve distribution and average mana value
//! - [`colors`]: color identity union and per-color counts
//! - [`card_types`]: non-exclusive type-line tallies
//! - [`synergy`]: rule-table driven synergy tag detection
//! - [`consistency`]: multiples histogram and consistency score
//! - [`manabase`]: land classification, pips and manabase quality

pub mod card_types;
pub mod colors;
pub mod consistency;
pub mod curve;
pub mod manabase;
pub mod synergy;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::{Card, Color};

pub use card_types::{analyze_card_types, CardTypeCounts};
pub use colors::{get_color_identity, ColorIdentity};
pub use consistency::{analyze_deck_consistency, ConsistencyStats, MultiplesHistogram};
pub use curve::{compute_mana_curve, ManaCurve, CURVE_BUCKETS};
pub use manabase::{analyze_mana_base, LandKind, LandTypeBreakdown, ManabaseAnalysis};
pub use synergy::{detect_synergies, SynergyRule, SynergyTag, SYNERGY_RULES};

// ============================================================================
// Grade
// ============================================================================

/// Letter grade shared by manabase quality and deck health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Default for Grade {
    fn default() -> Self {
        Grade::D
    }
}

impl Grade {
    /// Grade a 0-100 score: >=80 A, >=65 B, >=50 C, else D.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Grade::A,
            s if s >= 65 => Grade::B,
            s if s >= 50 => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a signed running score into `[0, 100]`.
pub(crate) fn clamp_score(score: i64) -> u32 {
    score.clamp(0, 100) as u32
}

// ============================================================================
// FeatureProfile
// ============================================================================

/// All features extracted from one resolved deck.
///
/// Every field defaults to zero/empty, which is also what an empty deck
/// produces (apart from the manabase baseline score).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProfile {
    pub curve: ManaCurve,
    pub colors: ColorIdentity,
    pub card_types: CardTypeCounts,
    pub synergies: BTreeSet<SynergyTag>,
    pub consistency: ConsistencyStats,
    pub manabase: ManabaseAnalysis,
}

impl FeatureProfile {
    /// Run every extractor over the cards.
    pub fn extract(cards: &[Card]) -> Self {
        Self {
            curve: compute_mana_curve(cards),
            colors: get_color_identity(cards),
            card_types: analyze_card_types(cards),
            synergies: detect_synergies(cards),
            consistency: analyze_deck_consistency(cards),
            manabase: analyze_mana_base(cards),
        }
    }

    #[inline]
    pub fn avg_mana_value(&self) -> f64 {
        self.curve.avg_mana_value
    }

    #[inline]
    pub fn has_synergy(&self, tag: SynergyTag) -> bool {
        self.synergies.contains(&tag)
    }

    /// Sorted (WUBRG) colors present in the deck.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors.colors
    }

    #[inline]
    pub fn creature_count(&self) -> u32 {
        self.card_types.creature
    }

    /// Instants plus sorceries.
    #[inline]
    pub fn spell_count(&self) -> u32 {
        self.card_types.instant + self.card_types.sorcery
    }

    /// Number of resolved cards the profile was built from.
    #[inline]
    pub fn total_cards(&self) -> u32 {
        self.consistency.total_card_count
    }
}
