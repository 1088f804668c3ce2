//! Manabase analysis.
//!
//! Lands are classified by name and text heuristics:
//!
//! | Kind | Heuristic |
//! |------|-----------|
//! | basic | basic land name or "Basic" in the type line |
//! | shockland | two+ colors and "pay 2 life" |
//! | fastland | two+ colors and "two or fewer other lands" |
//! | checkland | two+ colors and "unless you control a" |
//! | dual | two+ color mana symbols (or "any color") otherwise |
//! | utility | everything else |
//!
//! Quality starts from a baseline of 50 and is adjusted for land count,
//! multicolor land sufficiency, utility-land overuse and basic ratio.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{clamp_score, Grade};
use crate::core::deck::card::{Card, Color};

// ============================================================================
// Constants
// ============================================================================

pub const MANABASE_BASELINE: i64 = 50;

/// Land counts inside this band are rewarded, outside it penalized.
pub const IDEAL_LAND_MIN: u32 = 22;
pub const IDEAL_LAND_MAX: u32 = 26;
pub const LAND_COUNT_REWARD: i64 = 15;
pub const LAND_COUNT_PENALTY: i64 = 10;

/// Multicolor decks want at least `min(2 * colors, cap)` dual lands.
pub const DUALS_PER_COLOR: u32 = 2;
pub const DUALS_CAP: u32 = 8;
pub const DUAL_REWARD: i64 = 15;
pub const DUAL_PENALTY: i64 = 10;

/// More utility lands than this costs colored-mana consistency.
pub const UTILITY_LAND_LIMIT: u32 = 3;
pub const UTILITY_PENALTY: i64 = 10;

/// Share of lands that are basics, in percent, earning the basic reward.
pub const BASIC_RATIO_MIN: f64 = 40.0;
pub const BASIC_RATIO_MAX: f64 = 70.0;
pub const BASIC_RATIO_REWARD: i64 = 10;

/// Recommended land count: this share of the deck, plus extra lands for
/// color-intensive spells.
pub const BASE_LAND_RATIO: f64 = 0.40;
pub const LANDS_PER_EXTRA_PIP: f64 = 2.0;

const BASIC_LAND_NAMES: [&str; 6] = ["Plains", "Island", "Swamp", "Mountain", "Forest", "Wastes"];

// ============================================================================
// Types
// ============================================================================

/// Classification of a single land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandKind {
    Basic,
    Dual,
    Fastland,
    Shockland,
    Checkland,
    Utility,
}

impl LandKind {
    /// Whether the land produces two or more colors.
    pub fn is_multicolor(self) -> bool {
        matches!(
            self,
            LandKind::Dual | LandKind::Fastland | LandKind::Shockland | LandKind::Checkland
        )
    }
}

/// Land counts per [`LandKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandTypeBreakdown {
    pub basic: u32,
    pub dual: u32,
    pub fastland: u32,
    pub shockland: u32,
    pub checkland: u32,
    pub utility: u32,
}

impl LandTypeBreakdown {
    fn record(&mut self, kind: LandKind) {
        match kind {
            LandKind::Basic => self.basic += 1,
            LandKind::Dual => self.dual += 1,
            LandKind::Fastland => self.fastland += 1,
            LandKind::Shockland => self.shockland += 1,
            LandKind::Checkland => self.checkland += 1,
            LandKind::Utility => self.utility += 1,
        }
    }

    /// All lands producing two or more colors.
    pub fn multicolor(&self) -> u32 {
        self.dual + self.fastland + self.shockland + self.checkland
    }
}

/// Result of manabase analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManabaseAnalysis {
    pub total_lands: u32,
    pub land_types: LandTypeBreakdown,

    /// Colored pips across non-land mana costs.
    pub color_pips: BTreeMap<Color, u32>,

    /// Lands as a percentage of the deck, one decimal.
    pub land_ratio_percent: f64,

    pub recommended_lands: u32,
    pub quality_score: u32,
    pub grade: Grade,
}

impl ManabaseAnalysis {
    /// Colors with at least one pip among non-land spells.
    pub fn active_colors(&self) -> usize {
        self.color_pips.values().filter(|&&n| n > 0).count()
    }
}

// ============================================================================
// Classification
// ============================================================================

fn is_basic(card: &Card) -> bool {
    if card.type_line.contains("Basic") {
        return true;
    }
    let name = card.name.strip_prefix("Snow-Covered ").unwrap_or(&card.name);
    BASIC_LAND_NAMES.contains(&name)
}

fn produced_colors(text: &str) -> usize {
    if text.contains("any color") {
        return Color::ALL.len();
    }
    Color::ALL
        .iter()
        .filter(|c| text.contains(c.mana_symbol()))
        .count()
}

/// Classify one land card.
pub fn classify_land(card: &Card) -> LandKind {
    if is_basic(card) {
        return LandKind::Basic;
    }

    if produced_colors(&card.oracle_text) < 2 {
        return LandKind::Utility;
    }

    let text = card.oracle_lower();
    if text.contains("pay 2 life") {
        LandKind::Shockland
    } else if text.contains("two or fewer other lands") {
        LandKind::Fastland
    } else if text.contains("unless you control a") {
        LandKind::Checkland
    } else {
        LandKind::Dual
    }
}

// ============================================================================
// Analysis
// ============================================================================

fn recommended_lands(total_cards: u32, nonland_cards: u32, total_pips: u32) -> u32 {
    if total_cards == 0 {
        return 0;
    }
    let pips_per_spell = if nonland_cards == 0 {
        0.0
    } else {
        total_pips as f64 / nonland_cards as f64
    };
    let extra = (pips_per_spell - 1.0).max(0.0) * LANDS_PER_EXTRA_PIP;
    (total_cards as f64 * BASE_LAND_RATIO + extra).round() as u32
}

fn quality_score(lands: u32, breakdown: &LandTypeBreakdown, active_colors: u32) -> u32 {
    let mut score = MANABASE_BASELINE;

    if (IDEAL_LAND_MIN..=IDEAL_LAND_MAX).contains(&lands) {
        score += LAND_COUNT_REWARD;
    } else {
        score -= LAND_COUNT_PENALTY;
    }

    if active_colors >= 2 {
        let wanted = (DUALS_PER_COLOR * active_colors).min(DUALS_CAP);
        if breakdown.multicolor() >= wanted {
            score += DUAL_REWARD;
        } else {
            score -= DUAL_PENALTY;
        }
    }

    if breakdown.utility > UTILITY_LAND_LIMIT {
        score -= UTILITY_PENALTY;
    }

    if lands > 0 {
        let basic_ratio = 100.0 * breakdown.basic as f64 / lands as f64;
        if (BASIC_RATIO_MIN..=BASIC_RATIO_MAX).contains(&basic_ratio) {
            score += BASIC_RATIO_REWARD;
        }
    }

    clamp_score(score)
}

/// Classify lands, count pips and score the manabase.
pub fn analyze_mana_base(cards: &[Card]) -> ManabaseAnalysis {
    let mut breakdown = LandTypeBreakdown::default();
    let mut pips = [0u32; 5];
    let mut lands = 0u32;

    for card in cards {
        if card.is_land() {
            lands += 1;
            breakdown.record(classify_land(card));
        } else {
            for (slot, n) in pips.iter_mut().zip(card.color_pips()) {
                *slot += n;
            }
        }
    }

    let total = cards.len() as u32;
    let color_pips: BTreeMap<Color, u32> = Color::ALL
        .iter()
        .zip(pips)
        .filter(|(_, n)| *n > 0)
        .map(|(c, n)| (*c, n))
        .collect();
    let active_colors = color_pips.len() as u32;
    let total_pips: u32 = pips.iter().sum();

    let land_ratio_percent = if total == 0 {
        0.0
    } else {
        (1000.0 * lands as f64 / total as f64).round() / 10.0
    };

    let quality_score = quality_score(lands, &breakdown, active_colors);

    ManabaseAnalysis {
        total_lands: lands,
        land_types: breakdown,
        color_pips,
        land_ratio_percent,
        recommended_lands: recommended_lands(total, total - lands, total_pips),
        quality_score,
        grade: Grade::from_score(quality_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basics(name: &str, n: usize) -> Vec<Card> {
        (0..n)
            .map(|_| Card::new(name, 0.0, format!("Basic Land — {name}")))
            .collect()
    }

    fn spells(n: usize, cost: &str) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("Spell {i}"), 2.0, "Instant").with_mana_cost(cost))
            .collect()
    }

    fn land(name: &str, text: &str) -> Card {
        Card::new(name, 0.0, "Land").with_oracle_text(text)
    }

    #[test]
    fn test_classify_basic() {
        assert_eq!(classify_land(&basics("Island", 1)[0]), LandKind::Basic);
        assert_eq!(
            classify_land(&Card::new("Snow-Covered Forest", 0.0, "Snow Land — Forest")),
            LandKind::Basic
        );
    }

    #[test]
    fn test_classify_shockland() {
        let card = land(
            "Steam Vents",
            "({T}: Add {U} or {R}.) As Steam Vents enters, you may pay 2 life. If you don't, it enters tapped.",
        );
        assert_eq!(classify_land(&card), LandKind::Shockland);
    }

    #[test]
    fn test_classify_fastland() {
        let card = land(
            "Spirebluff Canal",
            "Spirebluff Canal enters tapped unless you control two or fewer other lands. {T}: Add {U} or {R}.",
        );
        assert_eq!(classify_land(&card), LandKind::Fastland);
    }

    #[test]
    fn test_classify_checkland() {
        let card = land(
            "Sulfur Falls",
            "Sulfur Falls enters tapped unless you control an Island or a Mountain. {T}: Add {U} or {R}.",
        );
        // "unless you control an" still contains "unless you control a"
        assert_eq!(classify_land(&card), LandKind::Checkland);
    }

    #[test]
    fn test_classify_dual_and_utility() {
        assert_eq!(
            classify_land(&land("Tundra", "({T}: Add {W} or {U}.)")),
            LandKind::Dual
        );
        assert_eq!(
            classify_land(&land("City of Brass", "{T}: Add one mana of any color. City of Brass deals 1 damage to you.")),
            LandKind::Dual
        );
        assert_eq!(
            classify_land(&land("Mutavault", "{T}: Add {C}. {1}: Mutavault becomes a 2/2 creature.")),
            LandKind::Utility
        );
    }

    #[test]
    fn test_mono_color_ideal_manabase() {
        // 24 lands, 14 basics (58%), no utility, mono-red
        let mut cards = basics("Mountain", 14);
        cards.extend((0..10).map(|i| land(&format!("Rainbow {i}"), "Add one mana of any color.")));
        cards.extend(spells(36, "{1}{R}"));

        let analysis = analyze_mana_base(&cards);
        assert_eq!(analysis.total_lands, 24);
        assert_eq!(analysis.land_types.basic, 14);
        assert_eq!(analysis.active_colors(), 1);
        // 50 + 15 (lands) + 10 (basic ratio)
        assert_eq!(analysis.quality_score, 75);
        assert_eq!(analysis.grade, Grade::B);
        assert_eq!(analysis.land_ratio_percent, 40.0);
        assert_eq!(analysis.recommended_lands, 24);
    }

    #[test]
    fn test_two_color_without_duals_penalized() {
        let mut cards = basics("Island", 12);
        cards.extend(basics("Mountain", 12));
        cards.extend(spells(18, "{U}{U}"));
        cards.extend(spells(18, "{R}{R}"));

        let analysis = analyze_mana_base(&cards);
        assert_eq!(analysis.active_colors(), 2);
        // 50 + 15 (lands) - 10 (no duals), basics at 100% earn nothing
        assert_eq!(analysis.quality_score, 55);
        assert_eq!(analysis.grade, Grade::C);
        // 60 * 0.4 + (2 pips - 1) * 2
        assert_eq!(analysis.recommended_lands, 26);
    }

    #[test]
    fn test_utility_overuse_penalized() {
        let mut cards = basics("Swamp", 10);
        cards.extend((0..5).map(|i| land(&format!("Utility {i}"), "{T}: Add {C}.")));
        let analysis = analyze_mana_base(&cards);
        // 50 - 10 (lands) - 10 (utility) + 10 (basic ratio 66.7%)
        assert_eq!(analysis.quality_score, 40);
        assert_eq!(analysis.grade, Grade::D);
    }

    #[test]
    fn test_empty_deck_in_range() {
        let analysis = analyze_mana_base(&[]);
        assert_eq!(analysis.total_lands, 0);
        assert_eq!(analysis.recommended_lands, 0);
        assert_eq!(analysis.land_ratio_percent, 0.0);
        assert!(analysis.quality_score <= 100);
    }
}
