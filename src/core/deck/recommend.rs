//! Advisory text composed from an analysed deck.
//!
//! The output is plain prose. Nothing here feeds back into the structured
//! analysis, and a zero-valued profile still produces a sentence.

use super::classifier::{Archetype, ArchetypeFamily};
use super::features::{FeatureProfile, Grade};
use super::health::{CONSISTENT_THRESHOLD, INCONSISTENT_THRESHOLD};
use super::matchup::MatchupAnalysis;

pub const HIGH_CURVE_WARNING: f64 = 4.0;
pub const LOW_CURVE_WARNING: f64 = 1.5;
pub const MIN_AGGRO_CREATURES: u32 = 8;
pub const MIN_LANDS: u32 = 20;
pub const MAX_LANDS: u32 = 28;
pub const SYNERGY_PRAISE_TAGS: usize = 3;

/// Compose recommendation sentences for a deck.
pub fn generate_recommendations(
    profile: &FeatureProfile,
    archetype: &Archetype,
    matchups: &MatchupAnalysis,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    let avg = profile.avg_mana_value();

    lines.push(format!(
        "This deck plays as {archetype} with an average mana value of {avg:.2}."
    ));

    if avg > HIGH_CURVE_WARNING {
        lines.push(
            "The curve is high; consider trimming expensive cards for cheaper interaction."
                .to_string(),
        );
    } else if avg < LOW_CURVE_WARNING && profile.curve.spell_count() > 0 {
        lines.push(
            "The curve is very low; make sure the deck has enough reach in the late game."
                .to_string(),
        );
    }

    let creatures = profile.creature_count();
    if archetype.family() == ArchetypeFamily::Aggro && creatures < MIN_AGGRO_CREATURES {
        lines.push(format!(
            "Only {creatures} creatures for an aggressive deck; aim for at least {MIN_AGGRO_CREATURES}."
        ));
    }

    let lands = profile.manabase.total_lands;
    if lands < MIN_LANDS {
        lines.push(format!(
            "{lands} lands is light; most decks want between {MIN_LANDS} and {MAX_LANDS}."
        ));
    } else if lands > MAX_LANDS {
        lines.push(format!(
            "{lands} lands is heavy; most decks want between {MIN_LANDS} and {MAX_LANDS}."
        ));
    }

    let tags = &profile.synergies;
    if tags.is_empty() {
        lines.push(
            "No synergy focus was detected; build around a clear mechanical theme.".to_string(),
        );
    } else if tags.len() >= SYNERGY_PRAISE_TAGS {
        let names: Vec<&str> = tags.iter().map(|t| t.label()).collect();
        lines.push(format!("Strong synergy package: {}.", names.join(", ")));
    }

    let consistency = profile.consistency.consistency_score;
    if consistency >= CONSISTENT_THRESHOLD {
        lines.push("Good redundancy: key cards are played in multiples.".to_string());
    } else if consistency < INCONSISTENT_THRESHOLD && profile.total_cards() > 0 {
        lines.push(
            "Many singletons lower consistency; play more copies of your best cards.".to_string(),
        );
    }

    match profile.manabase.grade {
        Grade::A => lines.push("The manabase is excellent.".to_string()),
        Grade::D if lands > 0 => lines.push(
            "The manabase needs work; review land count and color sources.".to_string(),
        ),
        _ => {}
    }

    if let Some(threat) = matchups.first_challenging() {
        lines.push(format!(
            "Consider sideboard cards to tech against {threat}."
        ));
    }

    lines.join(" ")
}
