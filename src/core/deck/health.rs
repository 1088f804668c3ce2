//! Overall deck health score.
//!
//! Starts from [`HEALTH_BASELINE`], applies fixed deltas for curve shape,
//! synergy focus and consistency, then folds in a fraction of the
//! manabase quality score. Every adjustment also records a feedback line
//! so callers can show why the score moved.

use serde::{Deserialize, Serialize};

use super::features::{clamp_score, FeatureProfile, Grade};

// ============================================================================
// Constants
// ============================================================================

pub const HEALTH_BASELINE: i64 = 50;

/// Healthy average mana value band (inclusive).
pub const HEALTHY_CURVE_MIN: f64 = 1.8;
pub const HEALTHY_CURVE_MAX: f64 = 3.2;
pub const HEALTHY_CURVE_BONUS: i64 = 10;

/// Average mana value above which the curve is penalized.
pub const HEAVY_CURVE_THRESHOLD: f64 = 4.0;
pub const HEAVY_CURVE_PENALTY: i64 = 10;

pub const FOCUSED_SYNERGY_TAGS: usize = 2;
pub const SYNERGY_BONUS: i64 = 10;
pub const NO_SYNERGY_PENALTY: i64 = 10;

pub const CONSISTENT_THRESHOLD: u32 = 70;
pub const INCONSISTENT_THRESHOLD: u32 = 50;
pub const CONSISTENCY_BONUS: i64 = 10;
pub const INCONSISTENCY_PENALTY: i64 = 10;

/// Share of the manabase quality score added to health.
pub const MANABASE_WEIGHT: f64 = 0.2;

// ============================================================================
// DeckHealth
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckHealth {
    /// In `[0, 100]`.
    pub score: u32,
    pub grade: Grade,
    pub feedback: Vec<String>,
}

impl Default for DeckHealth {
    fn default() -> Self {
        Self {
            score: HEALTH_BASELINE as u32,
            grade: Grade::from_score(HEALTH_BASELINE as u32),
            feedback: Vec::new(),
        }
    }
}

/// Score a profile's overall health.
pub fn calculate_deck_health(profile: &FeatureProfile) -> DeckHealth {
    let mut score = HEALTH_BASELINE;
    let mut feedback = Vec::new();

    let avg = profile.avg_mana_value();
    if (HEALTHY_CURVE_MIN..=HEALTHY_CURVE_MAX).contains(&avg) {
        score += HEALTHY_CURVE_BONUS;
        feedback.push(format!("Mana curve is efficient (avg {avg:.2})."));
    } else if avg > HEAVY_CURVE_THRESHOLD {
        score -= HEAVY_CURVE_PENALTY;
        feedback.push(format!("Mana curve is top-heavy (avg {avg:.2})."));
    }

    let tag_count = profile.synergies.len();
    if tag_count >= FOCUSED_SYNERGY_TAGS {
        score += SYNERGY_BONUS;
        feedback.push(format!("{tag_count} synergy themes detected."));
    } else if tag_count == 0 {
        score -= NO_SYNERGY_PENALTY;
        feedback.push("No clear synergy themes detected.".to_string());
    }

    let consistency = profile.consistency.consistency_score;
    if consistency >= CONSISTENT_THRESHOLD {
        score += CONSISTENCY_BONUS;
        feedback.push(format!("High consistency ({consistency}/100)."));
    } else if consistency < INCONSISTENT_THRESHOLD {
        score -= INCONSISTENCY_PENALTY;
        feedback.push(format!("Low consistency ({consistency}/100)."));
    }

    let manabase = profile.manabase.quality_score;
    score += (manabase as f64 * MANABASE_WEIGHT).round() as i64;
    feedback.push(format!(
        "Manabase quality {manabase}/100 (grade {}).",
        profile.manabase.grade
    ));

    let score = clamp_score(score);
    DeckHealth {
        score,
        grade: Grade::from_score(score),
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::deck::features::SynergyTag;

    fn profile(avg: f64, tags: &[SynergyTag], consistency: u32, manabase: u32) -> FeatureProfile {
        let mut p = FeatureProfile::default();
        p.curve.avg_mana_value = avg;
        p.synergies = tags.iter().copied().collect();
        p.consistency.consistency_score = consistency;
        p.manabase.quality_score = manabase;
        p
    }

    #[test]
    fn test_ideal_deck() {
        let p = profile(2.4, &[SynergyTag::Aggro, SynergyTag::Prowess], 90, 100);
        let health = calculate_deck_health(&p);
        // 50 + 10 + 10 + 10 + 20
        assert_eq!(health.score, 100);
        assert_eq!(health.grade, Grade::A);
        assert_eq!(health.feedback.len(), 4);
    }

    #[test]
    fn test_poor_deck() {
        let p = profile(4.6, &[], 10, 20);
        let health = calculate_deck_health(&p);
        // 50 - 10 - 10 - 10 + 4
        assert_eq!(health.score, 24);
        assert_eq!(health.grade, Grade::D);
    }

    #[test]
    fn test_neutral_bands_do_not_move_score() {
        // avg between 3.2 and 4, one tag, consistency in [50, 70)
        let p = profile(3.6, &[SynergyTag::Lifegain], 60, 50);
        let health = calculate_deck_health(&p);
        assert_eq!(health.score, 60);
        assert_eq!(health.grade, Grade::C);
        assert_eq!(health.feedback.len(), 1);
    }

    #[test]
    fn test_empty_profile_in_range() {
        let health = calculate_deck_health(&FeatureProfile::default());
        assert!(health.score <= 100);
        // avg 0: no curve delta, no tags, consistency 0
        assert_eq!(health.score, 30);
    }
}
