//! Key-card overlap against known metagame decks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Similarity above which a meta deck is reported as favorable.
pub const FAVORABLE_SIMILARITY: f64 = 0.4;

/// Similarity below which a meta deck is reported as challenging.
pub const CHALLENGING_SIMILARITY: f64 = 0.1;

/// A named deck identified by a handful of key cards.
///
/// Also the shape of reference decks fed to the archetype learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDeck {
    pub name: String,
    pub key_cards: Vec<String>,
}

impl MetaDeck {
    pub fn new<S: Into<String>>(name: impl Into<String>, key_cards: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            key_cards: key_cards.into_iter().map(Into::into).collect(),
        }
    }
}

/// Built-in metagame snapshot used when no other list is configured.
pub fn default_meta_decks() -> Vec<MetaDeck> {
    vec![
        MetaDeck::new(
            "Mono-Red Aggro",
            ["Play with Fire", "Kumano Faces Kakkazan", "Furnace Punisher"],
        ),
        MetaDeck::new(
            "Esper Control",
            ["Sunfall", "The Wandering Emperor", "Disdainful Stroke"],
        ),
        MetaDeck::new(
            "Domain Ramp",
            ["Herd Migration", "Topiary Stomper", "The Kami War"],
        ),
        MetaDeck::new(
            "Dimir Midrange",
            ["Go for the Throat", "Faerie Mastermind", "Sheoldred, the Apocalypse"],
        ),
        MetaDeck::new("Golgari Midrange", ["Glissa Sunslayer", "Virtue of Persistence"]),
        MetaDeck::new("Azorius Control", ["Sunfall", "Memory Deluge"]),
    ]
}

/// Jaccard similarity of two card lists, over distinct names.
///
/// Two empty lists are defined as 0.0.
pub fn jaccard_similarity<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B]) -> f64 {
    let a: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let b: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaScore {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaComparison {
    /// One score per meta deck, in input order.
    pub scores: Vec<MetaScore>,
    pub favorable: Vec<String>,
    pub challenging: Vec<String>,
}

/// Score a deck's card names against every meta deck.
pub fn compare_to_meta<S: AsRef<str>>(deck: &[S], meta: &[MetaDeck]) -> MetaComparison {
    let scores: Vec<MetaScore> = meta
        .iter()
        .map(|m| MetaScore {
            name: m.name.clone(),
            score: jaccard_similarity(deck, m.key_cards.as_slice()),
        })
        .collect();

    let favorable = scores
        .iter()
        .filter(|s| s.score > FAVORABLE_SIMILARITY)
        .map(|s| s.name.clone())
        .collect();
    let challenging = scores
        .iter()
        .filter(|s| s.score < CHALLENGING_SIMILARITY)
        .map(|s| s.name.clone())
        .collect();

    MetaComparison {
        scores,
        favorable,
        challenging,
    }
}
