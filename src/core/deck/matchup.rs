//! Static matchup table keyed by archetype family.

use serde::{Deserialize, Serialize};

use super::classifier::{Archetype, ArchetypeFamily};

/// Opponent archetypes this deck tends to beat or struggle against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupAnalysis {
    pub favorable: Vec<String>,
    pub challenging: Vec<String>,
}

impl MatchupAnalysis {
    pub fn is_empty(&self) -> bool {
        self.favorable.is_empty() && self.challenging.is_empty()
    }

    /// The first challenging opponent, if any.
    pub fn first_challenging(&self) -> Option<&str> {
        self.challenging.first().map(String::as_str)
    }
}

/// `(family, favorable, challenging)`
const MATCHUP_TABLE: &[(ArchetypeFamily, &[&str], &[&str])] = &[
    (ArchetypeFamily::Aggro, &["Control", "Combo"], &["Midrange", "Lifegain"]),
    (ArchetypeFamily::Control, &["Midrange", "Ramp"], &["Aggro", "Tempo"]),
    (ArchetypeFamily::Combo, &["Midrange", "Ramp"], &["Aggro", "Control"]),
    (ArchetypeFamily::Midrange, &["Aggro", "Tempo"], &["Control", "Combo"]),
];

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Look up the matchup lists for an archetype's family.
///
/// Archetypes outside the four known families get empty lists.
pub fn generate_matchup_analysis(archetype: &Archetype) -> MatchupAnalysis {
    let family = archetype.family();
    MATCHUP_TABLE
        .iter()
        .find(|(f, _, _)| *f == family)
        .map(|(_, favorable, challenging)| MatchupAnalysis {
            favorable: to_owned(favorable),
            challenging: to_owned(challenging),
        })
        .unwrap_or_default()
}
