//! Rule-based archetype classification.
//!
//! A flat, ordered decision list over a [`FeatureProfile`]. The first
//! family whose guard holds produces the final label; later families are
//! never consulted, even if they would also match.
//!
//! ```text
//! 1. Aggro     avg MV <= 2.5 and creatures >= instants + sorceries
//! 2. Control   instants + sorceries > creatures and Card Draw tag
//! 3. Midrange  2.5 <= avg MV <= 4 and creatures > 0
//! 4. Synergy   Graveyard -> Artifacts -> Lifegain
//! 5. Default   one color -> "Mono-<Color> Deck", 3+ -> "Multicolor Deck",
//!              otherwise "Unknown Archetype"
//! ```
//!
//! Families 1-3 are color-keyed and require at least one color; a
//! colorless deck falls through to the synergy and default branches.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::Color;
use super::features::{FeatureProfile, SynergyTag};

// ============================================================================
// Constants
// ============================================================================

/// Aggro requires an average mana value at or below this.
pub const AGGRO_MAX_AVG_MV: f64 = 2.5;

/// Midrange average mana value band (inclusive).
pub const MIDRANGE_MIN_AVG_MV: f64 = 2.5;
pub const MIDRANGE_MAX_AVG_MV: f64 = 4.0;

pub const UNKNOWN_ARCHETYPE: &str = "Unknown Archetype";
pub const MULTICOLOR_DECK: &str = "Multicolor Deck";

// ============================================================================
// Color-pair tables
// ============================================================================

/// Named two-color aggro decks, keyed by WUBRG-sorted symbols.
const AGGRO_PAIRS: &[(&str, &str)] = &[
    ("WU", "Azorius Tempo"),
    ("WB", "Orzhov Aggro"),
    ("WR", "Boros Aggro"),
    ("WG", "Selesnya Aggro"),
    ("UR", "Izzet Tempo"),
    ("BR", "Rakdos Aggro"),
    ("RG", "Gruul Aggro"),
];

/// Named two- and three-color control decks.
const CONTROL_COMBOS: &[(&str, &str)] = &[
    ("WU", "Azorius Control"),
    ("UB", "Dimir Control"),
    ("UR", "Izzet Control"),
    ("WB", "Orzhov Control"),
    ("WUB", "Esper Control"),
    ("UBR", "Grixis Control"),
    ("WUR", "Jeskai Control"),
    ("WUG", "Bant Control"),
    ("UBG", "Sultai Control"),
];

/// Named two-color midrange decks.
const MIDRANGE_PAIRS: &[(&str, &str)] = &[
    ("BG", "Golgari Midrange"),
    ("BR", "Rakdos Midrange"),
    ("RG", "Gruul Midrange"),
    ("UB", "Dimir Midrange"),
    ("WB", "Orzhov Midrange"),
    ("WG", "Selesnya Midrange"),
    ("UG", "Simic Midrange"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(colors, _)| *colors == key)
        .map(|(_, name)| *name)
}

// ============================================================================
// Archetype
// ============================================================================

/// Broad strategic family used for matchup lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchetypeFamily {
    Aggro,
    Control,
    Combo,
    Midrange,
    Other,
}

impl ArchetypeFamily {
    /// Family named in a label, by keyword.
    pub fn from_label(label: &str) -> Self {
        if label.contains("Aggro") || label.contains("Tempo") {
            ArchetypeFamily::Aggro
        } else if label.contains("Control") {
            ArchetypeFamily::Control
        } else if label.contains("Combo") {
            ArchetypeFamily::Combo
        } else if label.contains("Midrange") {
            ArchetypeFamily::Midrange
        } else {
            ArchetypeFamily::Other
        }
    }
}

/// A human-readable archetype label. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archetype(String);

impl Archetype {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        if label.trim().is_empty() {
            Self::unknown()
        } else {
            Self(label)
        }
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_ARCHETYPE.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn family(&self) -> ArchetypeFamily {
        ArchetypeFamily::from_label(&self.0)
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_ARCHETYPE
    }
}

impl Default for Archetype {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Archetype {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Classification
// ============================================================================

fn mono_color(colors: &[Color]) -> Option<Color> {
    match colors {
        [only] => Some(*only),
        _ => None,
    }
}

fn classify_aggro(profile: &FeatureProfile, key: &str) -> Option<String> {
    let is_aggro = profile.avg_mana_value() <= AGGRO_MAX_AVG_MV
        && profile.creature_count() >= profile.spell_count();
    if !is_aggro {
        return None;
    }

    if let Some(color) = mono_color(profile.colors()) {
        return Some(format!("Mono-{} Aggro", color.name()));
    }
    Some(lookup(AGGRO_PAIRS, key).unwrap_or("Aggro").to_string())
}

fn classify_control(profile: &FeatureProfile, key: &str) -> Option<String> {
    let is_control = profile.spell_count() > profile.creature_count()
        && profile.has_synergy(SynergyTag::CardDraw);
    if !is_control {
        return None;
    }
    Some(lookup(CONTROL_COMBOS, key).unwrap_or("Control").to_string())
}

fn classify_midrange(profile: &FeatureProfile, key: &str) -> Option<String> {
    let avg = profile.avg_mana_value();
    let is_midrange = (MIDRANGE_MIN_AVG_MV..=MIDRANGE_MAX_AVG_MV).contains(&avg)
        && profile.creature_count() > 0;
    if !is_midrange {
        return None;
    }
    Some(lookup(MIDRANGE_PAIRS, key).unwrap_or("Midrange").to_string())
}

fn classify_synergy(profile: &FeatureProfile) -> Option<String> {
    [
        (SynergyTag::Graveyard, "Graveyard Combo"),
        (SynergyTag::Artifacts, "Artifacts"),
        (SynergyTag::Lifegain, "Lifegain"),
    ]
    .iter()
    .find(|(tag, _)| profile.has_synergy(*tag))
    .map(|(_, label)| label.to_string())
}

fn classify_default(profile: &FeatureProfile) -> String {
    let colors = profile.colors();
    if let Some(color) = mono_color(colors) {
        format!("Mono-{} Deck", color.name())
    } else if colors.len() >= 3 {
        MULTICOLOR_DECK.to_string()
    } else {
        UNKNOWN_ARCHETYPE.to_string()
    }
}

/// Classify a feature profile into an archetype label.
///
/// Pure and deterministic: the same profile always yields the same label.
pub fn classify_archetype(profile: &FeatureProfile) -> Archetype {
    let key = profile.colors.key();
    let colored = !profile.colors().is_empty();

    let label = colored
        .then(|| {
            classify_aggro(profile, &key)
                .or_else(|| classify_control(profile, &key))
                .or_else(|| classify_midrange(profile, &key))
        })
        .flatten()
        .or_else(|| classify_synergy(profile))
        .unwrap_or_else(|| classify_default(profile));

    Archetype::new(label)
}
