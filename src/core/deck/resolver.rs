//! Card resolution with deduplication and bounded fan-out.
//!
//! [`CardResolver`] turns a deck's card names into [`Card`]s:
//!
//! 1. Deduplicate names, keeping first-seen order
//! 2. Resolve each distinct name once (cache first, then the source),
//!    with at most `concurrency` lookups in flight
//! 3. Re-expand to the original order and multiplicity
//!
//! Dropping the returned future stops further lookups from being issued.
//!
//! # Failure Semantics
//!
//! A name with no match is a non-fatal miss: it is cached as not-found and
//! dropped from the [`ResolvedDeck`]. A source error is logged and treated
//! as a miss for this request only; it is not cached.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use super::cache::{Resolution, ResolutionCache};
use super::card::Card;
use super::source::CardSource;

// ============================================================================
// Constants
// ============================================================================

/// Default number of concurrent source lookups.
pub const DEFAULT_CONCURRENCY: usize = 8;

// ============================================================================
// ResolvedDeck
// ============================================================================

/// The successfully resolved cards of a deck, same order and multiplicity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDeck {
    /// Resolved cards, duplicates preserved.
    pub cards: Vec<Card>,

    /// Input names that did not resolve, duplicates preserved.
    pub unresolved: Vec<String>,
}

impl ResolvedDeck {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// ============================================================================
// CardResolver
// ============================================================================

/// Resolves card names through a cache and a [`CardSource`].
#[derive(Clone)]
pub struct CardResolver {
    source: Arc<dyn CardSource>,
    cache: Arc<ResolutionCache>,
    concurrency: usize,
}

impl CardResolver {
    /// Create a resolver with a fresh unbounded cache.
    pub fn new(source: Arc<dyn CardSource>) -> Self {
        Self::with_cache(source, Arc::new(ResolutionCache::new()))
    }

    /// Create a resolver sharing an existing cache.
    pub fn with_cache(source: Arc<dyn CardSource>, cache: Arc<ResolutionCache>) -> Self {
        Self {
            source,
            cache,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Builder method to set the fan-out limit (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The cache backing this resolver.
    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    /// Resolve a single card name.
    pub async fn resolve(&self, name: &str) -> Resolution {
        if let Some(cached) = self.cache.get(name).await {
            return cached;
        }

        match self.source.lookup(name).await {
            Ok(card) => {
                let resolution = Resolution::from(card);
                if !resolution.is_found() {
                    log::debug!("No card matches '{}'", name);
                }
                self.cache.put(name, resolution.clone()).await;
                resolution
            }
            Err(e) => {
                log::warn!("Card lookup failed for '{}': {}", name, e);
                Resolution::NotFound
            }
        }
    }

    /// Resolve many names; output matches input order and multiplicity.
    pub async fn resolve_many<S: AsRef<str>>(&self, names: &[S]) -> Vec<Resolution> {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| seen.insert(*name))
            .collect();

        log::debug!(
            "Resolving {} card names ({} distinct)",
            names.len(),
            unique.len()
        );

        let resolved: HashMap<&str, Resolution> = stream::iter(unique)
            .map(|name| async move { (name, self.resolve(name).await) })
            .buffered(self.concurrency)
            .collect()
            .await;

        names
            .iter()
            .map(|name| {
                resolved
                    .get(name.as_ref())
                    .cloned()
                    .unwrap_or(Resolution::NotFound)
            })
            .collect()
    }

    /// Resolve a deck, dropping names that do not resolve.
    pub async fn resolve_deck<S: AsRef<str>>(&self, names: &[S]) -> ResolvedDeck {
        let resolutions = self.resolve_many(names).await;
        let mut deck = ResolvedDeck::default();

        for (name, resolution) in names.iter().zip(resolutions) {
            match resolution {
                Resolution::Found(card) => deck.cards.push(card),
                Resolution::NotFound => deck.unresolved.push(name.as_ref().to_string()),
            }
        }

        if !deck.unresolved.is_empty() {
            log::info!(
                "{} of {} cards could not be resolved",
                deck.unresolved.len(),
                names.len()
            );
        }
        deck
    }
}
