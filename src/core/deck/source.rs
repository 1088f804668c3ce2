//! Card sources: where card metadata comes from.
//!
//! The engine only depends on the [`CardSource`] trait: given a card name,
//! return the card or `None`. Remote fetchers live outside this crate;
//! [`InMemoryCardSource`] serves a local card database (a JSON array of
//! Scryfall-shaped card objects) with exact, case-insensitive and fuzzy
//! name matching.

use std::collections::HashMap;
use std::path::Path;

use super::card::Card;
use super::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Minimum normalized Levenshtein similarity for a fuzzy name match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

// ============================================================================
// CardSource
// ============================================================================

/// Lookup of card metadata by name.
///
/// `Ok(None)` means the card does not exist and may be cached as such.
/// `Err(_)` means the lookup itself failed and should be retried later.
#[async_trait::async_trait]
pub trait CardSource: Send + Sync {
    /// Look up a single card by name.
    async fn lookup(&self, name: &str) -> Result<Option<Card>>;
}

// ============================================================================
// InMemoryCardSource
// ============================================================================

/// Card source backed by an in-memory card list.
pub struct InMemoryCardSource {
    /// Cards indexed by exact name.
    by_name: HashMap<String, Card>,

    /// Lowercased name -> exact name.
    by_lower: HashMap<String, String>,

    /// Fuzzy threshold; `None` disables fuzzy fallback.
    fuzzy_threshold: Option<f64>,
}

impl InMemoryCardSource {
    /// Create a source from a list of cards. Later duplicates win.
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_lower = HashMap::new();
        for card in cards {
            by_lower.insert(card.name.to_lowercase(), card.name.clone());
            by_name.insert(card.name.clone(), card);
        }
        Self {
            by_name,
            by_lower,
            fuzzy_threshold: Some(DEFAULT_FUZZY_THRESHOLD),
        }
    }

    /// Create an empty source (for testing).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load a JSON card database (array of card objects).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let cards: Vec<Card> = serde_json::from_str(&contents)?;
        log::info!("Loaded {} cards from {}", cards.len(), path.display());
        Ok(Self::new(cards))
    }

    /// Builder method to set or disable the fuzzy-match threshold.
    pub fn with_fuzzy_threshold(mut self, threshold: Option<f64>) -> Self {
        self.fuzzy_threshold = threshold.map(|t| t.clamp(0.0, 1.0));
        self
    }

    /// Number of distinct cards held.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn find(&self, name: &str) -> Option<&Card> {
        if let Some(card) = self.by_name.get(name) {
            return Some(card);
        }

        let lower = name.trim().to_lowercase();
        if let Some(exact) = self.by_lower.get(&lower) {
            return self.by_name.get(exact);
        }

        let threshold = self.fuzzy_threshold?;
        let best = self
            .by_lower
            .iter()
            .map(|(candidate, exact)| (strsim::normalized_levenshtein(&lower, candidate), exact))
            .filter(|(score, _)| *score >= threshold)
            // Ties resolve to the lexicographically smallest name so lookups are stable.
            .max_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| b.1.cmp(a.1))
            })?;

        log::debug!("Fuzzy matched '{}' to '{}' ({:.2})", name, best.1, best.0);
        self.by_name.get(best.1)
    }
}

#[async_trait::async_trait]
impl CardSource for InMemoryCardSource {
    async fn lookup(&self, name: &str) -> Result<Option<Card>> {
        Ok(self.find(name).cloned())
    }
}
