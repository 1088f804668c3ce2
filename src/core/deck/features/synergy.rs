//! Synergy tag detection.
//!
//! Detection is a two-tier filter driven by [`SYNERGY_RULES`]:
//!
//! 1. **Corpus scan**: the lowercased oracle text and type lines of the
//!    whole deck must contain at least one of the rule's keywords.
//! 2. **Per-card count**: at least `min_cards` distinct card names must
//!    match the rule's narrower per-card pattern.
//!
//! A single card whose reminder text happens to mention a keyword passes
//! tier 1 but not tier 2, so it cannot tag the whole deck. Tags are
//! independent and any number may fire.
//!
//! Adding a rule means adding a table entry; the control flow does not
//! change.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::deck::card::{Card, CardType};

// ============================================================================
// SynergyTag
// ============================================================================

/// A detected deck theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SynergyTag {
    Lifegain,
    Prowess,
    Sacrifice,
    Graveyard,
    #[serde(rename = "Card Draw")]
    CardDraw,
    Aggro,
    Counters,
    Artifacts,
}

impl SynergyTag {
    /// Every tag, in rule order.
    pub const ALL: [SynergyTag; 8] = [
        SynergyTag::Lifegain,
        SynergyTag::Prowess,
        SynergyTag::Sacrifice,
        SynergyTag::Graveyard,
        SynergyTag::CardDraw,
        SynergyTag::Aggro,
        SynergyTag::Counters,
        SynergyTag::Artifacts,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            SynergyTag::Lifegain => "Lifegain",
            SynergyTag::Prowess => "Prowess",
            SynergyTag::Sacrifice => "Sacrifice",
            SynergyTag::Graveyard => "Graveyard",
            SynergyTag::CardDraw => "Card Draw",
            SynergyTag::Aggro => "Aggro",
            SynergyTag::Counters => "Counters",
            SynergyTag::Artifacts => "Artifacts",
        }
    }
}

impl fmt::Display for SynergyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Rule table
// ============================================================================

/// Minimum distinct matching cards per tag.
pub const MIN_LIFEGAIN_CARDS: usize = 3;
pub const MIN_PROWESS_CARDS: usize = 2;
pub const MIN_SACRIFICE_CARDS: usize = 3;
pub const MIN_GRAVEYARD_CARDS: usize = 3;
pub const MIN_CARD_DRAW_CARDS: usize = 3;
pub const MIN_AGGRO_CARDS: usize = 4;
pub const MIN_COUNTERS_CARDS: usize = 3;
pub const MIN_ARTIFACTS_CARDS: usize = 4;

/// One synergy detection rule.
pub struct SynergyRule {
    pub tag: SynergyTag,

    /// Any of these must occur somewhere in the deck corpus.
    pub corpus_keywords: &'static [&'static str],

    /// Per-card pattern over lowercased oracle text.
    pub card_pattern: Regex,

    /// A card of this type also matches, regardless of text.
    pub matching_type: Option<CardType>,

    /// Minimum number of distinct matching cards.
    pub min_cards: usize,
}

impl SynergyRule {
    fn new(
        tag: SynergyTag,
        corpus_keywords: &'static [&'static str],
        card_pattern: &str,
        min_cards: usize,
    ) -> Self {
        Self {
            tag,
            corpus_keywords,
            // Patterns are compile-time literals covered by tests.
            card_pattern: Regex::new(card_pattern).expect("invalid synergy pattern"),
            matching_type: None,
            min_cards,
        }
    }

    fn with_type(mut self, card_type: CardType) -> Self {
        self.matching_type = Some(card_type);
        self
    }

    /// Whether one card satisfies the narrow per-card predicate.
    pub fn matches_card(&self, card: &Card, oracle_lower: &str) -> bool {
        self.matching_type.is_some_and(|t| card.has_type(t))
            || self.card_pattern.is_match(oracle_lower)
    }

    /// Whether the deck corpus contains any of the rule's keywords.
    pub fn matches_corpus(&self, corpus: &str) -> bool {
        self.corpus_keywords.iter().any(|k| corpus.contains(k))
    }
}

/// The synergy rule table, evaluated independently per tag.
pub static SYNERGY_RULES: Lazy<Vec<SynergyRule>> = Lazy::new(|| {
    vec![
        SynergyRule::new(
            SynergyTag::Lifegain,
            &["gain", "lifelink"],
            r"\bgains? (\d+|x|that much|twice that much)? ?life\b|\blifelink\b",
            MIN_LIFEGAIN_CARDS,
        ),
        SynergyRule::new(
            SynergyTag::Prowess,
            &["prowess", "instant or sorcery", "noncreature spell", "magecraft"],
            r"\bprowess\b|whenever you cast an? (instant|sorcery|instant or sorcery|noncreature) spell|\bmagecraft\b",
            MIN_PROWESS_CARDS,
        ),
        SynergyRule::new(
            SynergyTag::Sacrifice,
            &["sacrifice"],
            r"\bsacrifices? (a|an|another|one|two|x|target)\b",
            MIN_SACRIFICE_CARDS,
        ),
        SynergyRule::new(
            SynergyTag::Graveyard,
            &["graveyard", "flashback", "escape", "delve", "unearth", "mill"],
            r"\b(from|in|into) (your|a|their|an opponent's|target player's) graveyard\b|\bflashback\b|\bunearth\b|\bdelve\b|\bescape\b|\bmills?\b",
            MIN_GRAVEYARD_CARDS,
        ),
        SynergyRule::new(
            SynergyTag::CardDraw,
            &["draw"],
            r"\bdraws? (a|an|one|two|three|four|x|that many|\d+) (additional )?cards?\b",
            MIN_CARD_DRAW_CARDS,
        ),
        SynergyRule::new(
            SynergyTag::Aggro,
            &["haste", "first strike", "double strike", "menace", "attacks"],
            r"\b(haste|first strike|double strike|menace)\b|whenever [^.]*\battacks\b",
            MIN_AGGRO_CARDS,
        ),
        SynergyRule::new(
            SynergyTag::Counters,
            &["+1/+1 counter", "proliferate"],
            r"\+1/\+1 counters?|\bproliferate\b",
            MIN_COUNTERS_CARDS,
        ),
        SynergyRule::new(
            SynergyTag::Artifacts,
            &["artifact"],
            r"\bartifacts?\b",
            MIN_ARTIFACTS_CARDS,
        )
        .with_type(CardType::Artifact),
    ]
});

// ============================================================================
// Detection
// ============================================================================

/// Lowercased oracle text and type lines of every card, newline-joined.
fn build_corpus(cards: &[Card]) -> String {
    let mut corpus = String::new();
    for card in cards {
        corpus.push_str(&card.oracle_lower());
        corpus.push('\n');
        corpus.push_str(&card.type_line.to_lowercase());
        corpus.push('\n');
    }
    corpus
}

/// Detect synergy tags across the deck.
pub fn detect_synergies(cards: &[Card]) -> BTreeSet<SynergyTag> {
    let corpus = build_corpus(cards);
    let lowered: Vec<(&Card, String)> = cards.iter().map(|c| (c, c.oracle_lower())).collect();

    let mut tags = BTreeSet::new();
    for rule in SYNERGY_RULES.iter() {
        if !rule.matches_corpus(&corpus) {
            continue;
        }

        let matching: HashSet<&str> = lowered
            .iter()
            .filter(|(card, text)| rule.matches_card(card, text))
            .map(|(card, _)| card.name.as_str())
            .collect();

        if matching.len() >= rule.min_cards {
            tags.insert(rule.tag);
        }
    }
    tags
}
