//! Fixed-layout numeric feature vectors for clustering.
//!
//! ```text
//! [ W U B R G | mv0 .. mv7+ | Prowess Sacrifice Graveyard CardDraw Aggro Lifegain ]
//!   0       4   5       12    13                                            18
//! ```
//!
//! The layout is part of the persisted model: changing [`TAG_VOCABULARY`]
//! or the bucket count makes previously learned models unusable.

use crate::core::deck::card::Color;
use crate::core::deck::features::{FeatureProfile, SynergyTag, CURVE_BUCKETS};

pub const COLOR_DIMENSIONS: usize = 5;
pub const CURVE_DIMENSIONS: usize = CURVE_BUCKETS;

/// Synergy tags encoded as binary flags, in vector order.
pub const TAG_VOCABULARY: [SynergyTag; 6] = [
    SynergyTag::Prowess,
    SynergyTag::Sacrifice,
    SynergyTag::Graveyard,
    SynergyTag::CardDraw,
    SynergyTag::Aggro,
    SynergyTag::Lifegain,
];

pub const FEATURE_DIMENSIONS: usize = COLOR_DIMENSIONS + CURVE_DIMENSIONS + TAG_VOCABULARY.len();

/// Tag labels in vector order, as stored alongside a model.
pub fn vocabulary() -> Vec<String> {
    TAG_VOCABULARY.iter().map(|t| t.label().to_string()).collect()
}

/// Flatten a profile into the fixed vector layout.
pub fn build_feature_vector(profile: &FeatureProfile) -> Vec<f64> {
    let mut vector = Vec::with_capacity(FEATURE_DIMENSIONS);

    vector.extend(
        Color::ALL
            .iter()
            .map(|c| if profile.colors.contains(*c) { 1.0 } else { 0.0 }),
    );
    vector.extend(profile.curve.distribution.iter().map(|n| *n as f64));
    vector.extend(
        TAG_VOCABULARY
            .iter()
            .map(|t| if profile.has_synergy(*t) { 1.0 } else { 0.0 }),
    );

    debug_assert_eq!(vector.len(), FEATURE_DIMENSIONS);
    vector
}
