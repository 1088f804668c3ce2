//! Sideboard purpose classification.
//!
//! Each card lands in exactly one purpose bucket. Rules are tried in
//! [`SideboardPurpose::ALL`] order against the lowercased oracle text and
//! the first match wins; cards with no text or no match go to
//! [`SideboardPurpose::Other`].

use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardType, Color};
use super::classifier::{Archetype, ArchetypeFamily};

// ============================================================================
// Constants
// ============================================================================

/// Coverage at or above which the sideboard is called well focused.
pub const WELL_FOCUSED_COVERAGE: f64 = 80.0;

/// Coverage at or above which the sideboard is called reasonably focused.
pub const FOCUSED_COVERAGE: f64 = 60.0;

/// Control decks want at least this many counterspells in the board.
pub const MIN_CONTROL_COUNTERSPELLS: usize = 2;

/// Aggro decks want at least this many removal spells in the board.
pub const MIN_AGGRO_REMOVAL: usize = 2;

// ============================================================================
// Purposes
// ============================================================================

/// What a sideboard card is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SideboardPurpose {
    Removal,
    Counterspells,
    GraveyardHate,
    ArtifactEnchantmentHate,
    HandDisruption,
    CardDraw,
    Threats,
    Protection,
    ComboHate,
    Other,
}

impl SideboardPurpose {
    /// Evaluation order. `Other` is the catch-all and always last.
    pub const ALL: [SideboardPurpose; 10] = [
        SideboardPurpose::Removal,
        SideboardPurpose::Counterspells,
        SideboardPurpose::GraveyardHate,
        SideboardPurpose::ArtifactEnchantmentHate,
        SideboardPurpose::HandDisruption,
        SideboardPurpose::CardDraw,
        SideboardPurpose::Threats,
        SideboardPurpose::Protection,
        SideboardPurpose::ComboHate,
        SideboardPurpose::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SideboardPurpose::Removal => "removal",
            SideboardPurpose::Counterspells => "counterspells",
            SideboardPurpose::GraveyardHate => "graveyard hate",
            SideboardPurpose::ArtifactEnchantmentHate => "artifact/enchantment hate",
            SideboardPurpose::HandDisruption => "hand disruption",
            SideboardPurpose::CardDraw => "card draw",
            SideboardPurpose::Threats => "threats",
            SideboardPurpose::Protection => "protection",
            SideboardPurpose::ComboHate => "combo hate",
            SideboardPurpose::Other => "other",
        }
    }
}

impl fmt::Display for SideboardPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

enum PurposeMatcher {
    Text(Regex),
    Types(&'static [CardType]),
}

fn text(pattern: &str) -> PurposeMatcher {
    // Patterns are literals exercised by the tests below.
    PurposeMatcher::Text(Regex::new(pattern).expect("invalid sideboard pattern"))
}

static PURPOSE_RULES: Lazy<Vec<(SideboardPurpose, PurposeMatcher)>> = Lazy::new(|| {
    vec![
        (
            SideboardPurpose::Removal,
            text(
                r"destroy (target|all) (creatures?|planeswalkers?)|exile target (creature|planeswalker|nonland permanent)|deals? (\d+|x) damage to (target|any target|each creature)|target creature gets -\d+/-\d+|\bfights? (target|up to one target)",
            ),
        ),
        (SideboardPurpose::Counterspells, text(r"\bcounter target\b")),
        (
            SideboardPurpose::GraveyardHate,
            text(r"exile[^.]*graveyards?|graveyards?[^.]*(exile|can't)|cards in graveyards"),
        ),
        (
            SideboardPurpose::ArtifactEnchantmentHate,
            text(
                r"(destroy|exile) (target|all|each) (artifacts?|enchantments?)|target (artifact or enchantment|noncreature artifact)",
            ),
        ),
        (
            SideboardPurpose::HandDisruption,
            text(
                r"target (player|opponent) (reveals|discards)|each opponent discards|look at target (player|opponent)'s hand",
            ),
        ),
        (
            SideboardPurpose::CardDraw,
            text(r"\bdraws? (a|an|one|two|three|four|x|\d+) (additional )?cards?\b"),
        ),
        (
            SideboardPurpose::Threats,
            PurposeMatcher::Types(&[CardType::Creature, CardType::Planeswalker]),
        ),
        (
            SideboardPurpose::Protection,
            text(r"\bhexproof\b|\bindestructible\b|protection from|can't be countered|phases? out|\bward\b"),
        ),
        (
            SideboardPurpose::ComboHate,
            text(
                r"(players|opponents|your opponents) can't|split second|can't be activated|each player can't|nonbasic lands? (are|is)",
            ),
        ),
    ]
});

/// Classify one card into its sideboard purpose.
pub fn classify_purpose(card: &Card) -> SideboardPurpose {
    let oracle = card.oracle_lower();
    if oracle.trim().is_empty() {
        return SideboardPurpose::Other;
    }

    PURPOSE_RULES
        .iter()
        .find(|(_, matcher)| match matcher {
            PurposeMatcher::Text(re) => re.is_match(&oracle),
            PurposeMatcher::Types(types) => types.iter().any(|t| card.has_type(*t)),
        })
        .map(|(purpose, _)| *purpose)
        .unwrap_or(SideboardPurpose::Other)
}

// ============================================================================
// Analysis
// ============================================================================

/// Card names per purpose bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideboardPurposes {
    pub removal: Vec<String>,
    pub counterspells: Vec<String>,
    pub graveyard_hate: Vec<String>,
    pub artifact_enchantment_hate: Vec<String>,
    pub hand_disruption: Vec<String>,
    pub card_draw: Vec<String>,
    pub threats: Vec<String>,
    pub protection: Vec<String>,
    pub combo_hate: Vec<String>,
    pub other: Vec<String>,
}

impl SideboardPurposes {
    pub fn get(&self, purpose: SideboardPurpose) -> &[String] {
        match purpose {
            SideboardPurpose::Removal => &self.removal,
            SideboardPurpose::Counterspells => &self.counterspells,
            SideboardPurpose::GraveyardHate => &self.graveyard_hate,
            SideboardPurpose::ArtifactEnchantmentHate => &self.artifact_enchantment_hate,
            SideboardPurpose::HandDisruption => &self.hand_disruption,
            SideboardPurpose::CardDraw => &self.card_draw,
            SideboardPurpose::Threats => &self.threats,
            SideboardPurpose::Protection => &self.protection,
            SideboardPurpose::ComboHate => &self.combo_hate,
            SideboardPurpose::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, purpose: SideboardPurpose) -> &mut Vec<String> {
        match purpose {
            SideboardPurpose::Removal => &mut self.removal,
            SideboardPurpose::Counterspells => &mut self.counterspells,
            SideboardPurpose::GraveyardHate => &mut self.graveyard_hate,
            SideboardPurpose::ArtifactEnchantmentHate => &mut self.artifact_enchantment_hate,
            SideboardPurpose::HandDisruption => &mut self.hand_disruption,
            SideboardPurpose::CardDraw => &mut self.card_draw,
            SideboardPurpose::Threats => &mut self.threats,
            SideboardPurpose::Protection => &mut self.protection,
            SideboardPurpose::ComboHate => &mut self.combo_hate,
            SideboardPurpose::Other => &mut self.other,
        }
    }

    /// Number of cards across all buckets.
    pub fn total(&self) -> usize {
        SideboardPurpose::ALL.iter().map(|p| self.get(*p).len()).sum()
    }

    /// Largest non-`Other` bucket, ties broken by evaluation order.
    pub fn primary(&self) -> Option<(SideboardPurpose, usize)> {
        SideboardPurpose::ALL
            .iter()
            .filter(|p| **p != SideboardPurpose::Other)
            .map(|p| (*p, self.get(*p).len()))
            .filter(|(_, n)| *n > 0)
            .fold(None, |best, (p, n)| match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((p, n)),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideboardAnalysis {
    pub total_cards: usize,
    pub purposes: SideboardPurposes,

    /// Share of cards with a recognised purpose, 0-100 with one decimal.
    pub coverage: f64,

    pub strategy: Vec<String>,
    pub recommendations: Vec<String>,
}

fn coverage_percent(purposes: &SideboardPurposes) -> f64 {
    let total = purposes.total();
    if total == 0 {
        return 0.0;
    }
    let categorized = total - purposes.other.len();
    (categorized as f64 / total as f64 * 1000.0).round() / 10.0
}

fn strategy_statements(purposes: &SideboardPurposes, coverage: f64) -> Vec<String> {
    let mut strategy = Vec::new();
    if coverage >= WELL_FOCUSED_COVERAGE {
        strategy.push("Well-focused sideboard: nearly every card has a clear job.".to_string());
    } else if coverage >= FOCUSED_COVERAGE {
        strategy.push(
            "Reasonably focused sideboard, though a few slots lack a clear purpose.".to_string(),
        );
    } else {
        strategy.push(
            "Unfocused sideboard: many cards do not answer a specific matchup.".to_string(),
        );
    }

    if let Some((purpose, count)) = purposes.primary() {
        strategy.push(format!("Primary plan: {purpose} ({count} cards)."));
    }
    strategy
}

fn archetype_recommendations(
    purposes: &SideboardPurposes,
    archetype: &Archetype,
) -> Vec<String> {
    let mut recs = Vec::new();
    match archetype.family() {
        ArchetypeFamily::Control if purposes.counterspells.len() < MIN_CONTROL_COUNTERSPELLS => {
            recs.push(format!(
                "Control decks usually want at least {MIN_CONTROL_COUNTERSPELLS} counterspells after sideboarding; consider adding more."
            ));
        }
        ArchetypeFamily::Aggro if purposes.removal.len() < MIN_AGGRO_REMOVAL => {
            recs.push(
                "Add cheap removal to clear blockers in creature mirrors.".to_string(),
            );
        }
        ArchetypeFamily::Midrange if purposes.graveyard_hate.is_empty() => {
            recs.push(
                "Midrange decks grind long games; consider graveyard hate.".to_string(),
            );
        }
        ArchetypeFamily::Combo if purposes.protection.is_empty() => {
            recs.push("Add protection for your key combo pieces.".to_string());
        }
        _ => {}
    }

    if purposes.artifact_enchantment_hate.is_empty() {
        recs.push(
            "No artifact or enchantment answers; a flexible one covers many matchups.".to_string(),
        );
    }
    recs
}

/// Classify a resolved sideboard.
///
/// Returns `None` for an empty sideboard. `main_colors` are the main
/// deck's colors; sideboard cards outside them get flagged.
pub fn analyze_sideboard(
    cards: &[Card],
    archetype: &Archetype,
    main_colors: &[Color],
) -> Option<SideboardAnalysis> {
    if cards.is_empty() {
        return None;
    }

    let mut purposes = SideboardPurposes::default();
    for card in cards {
        purposes
            .bucket_mut(classify_purpose(card))
            .push(card.name.clone());
    }

    let coverage = coverage_percent(&purposes);
    let strategy = strategy_statements(&purposes, coverage);
    let mut recommendations = archetype_recommendations(&purposes, archetype);

    let off_color: BTreeSet<&str> = cards
        .iter()
        .filter(|c| c.color_identity.iter().any(|color| !main_colors.contains(color)))
        .map(|c| c.name.as_str())
        .collect();
    if !off_color.is_empty() && !main_colors.is_empty() {
        let names: Vec<&str> = off_color.into_iter().collect();
        recommendations.push(format!(
            "These sideboard cards need colors the main deck does not play: {}.",
            names.join(", ")
        ));
    }

    log::debug!(
        "Sideboard: {} cards, coverage {:.1}%",
        cards.len(),
        coverage
    );

    Some(SideboardAnalysis {
        total_cards: cards.len(),
        purposes,
        coverage,
        strategy,
        recommendations,
    })
}
