//! Archetype learning by clustering reference decks.
//!
//! # Module Structure
//!
//! - [`vector`]: fixed feature-vector layout
//! - [`kmeans`]: seeded k-means++ clustering
//! - [`store`]: `ModelStore` trait with JSON-file and in-memory stores
//!
//! # Concurrency
//!
//! The resident model is an `Arc<ClusterModel>` behind a `RwLock`, so any
//! number of classifications read it concurrently. Learning runs are
//! serialized by a mutex and only swap the resident model after the new
//! one has been fully persisted; a classification sees either the old
//! model or the new one.

pub mod kmeans;
pub mod store;
pub mod vector;

use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tokio::sync::{Mutex, RwLock};
use tracing::instrument;

use super::error::{DeckError, Result};
use super::features::FeatureProfile;

pub use kmeans::{kmeans, nearest_centroid, KMeansConfig, KMeansResult};
pub use store::{ClusterModel, InMemoryModelStore, JsonFileModelStore, ModelStore, DEFAULT_MODEL_FILE};
pub use vector::{build_feature_vector, vocabulary, FEATURE_DIMENSIONS, TAG_VOCABULARY};

// ============================================================================
// Results
// ============================================================================

/// Outcome of classifying a deck against the learned clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterAssignment {
    /// Index of the nearest centroid.
    Cluster(usize),

    /// No model has been learned or the persisted one is unusable.
    Unknown,
}

impl ClusterAssignment {
    pub fn index(self) -> Option<usize> {
        match self {
            ClusterAssignment::Cluster(idx) => Some(idx),
            ClusterAssignment::Unknown => None,
        }
    }

    pub fn is_unknown(self) -> bool {
        self == ClusterAssignment::Unknown
    }
}

/// Serializes as `{"cluster": 2}` or `{"cluster": "Unknown"}`.
impl Serialize for ClusterAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ClusterAssignment", 1)?;
        match self {
            ClusterAssignment::Cluster(idx) => state.serialize_field("cluster", idx)?,
            ClusterAssignment::Unknown => state.serialize_field("cluster", "Unknown")?,
        }
        state.end()
    }
}

/// Summary of a learning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnOutcome {
    pub k: usize,
    pub centroids: Vec<Vec<f64>>,

    /// Reference decks that contributed a vector.
    pub decks_used: usize,

    /// Reference decks skipped for having no resolvable cards.
    pub skipped: Vec<String>,

    pub iterations: usize,
}

// ============================================================================
// ArchetypeLearner
// ============================================================================

pub struct ArchetypeLearner {
    store: Arc<dyn ModelStore>,
    model: RwLock<Option<Arc<ClusterModel>>>,
    learn_lock: Mutex<()>,
    config: KMeansConfig,
}

impl ArchetypeLearner {
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self::with_config(store, KMeansConfig::default())
    }

    pub fn with_config(store: Arc<dyn ModelStore>, config: KMeansConfig) -> Self {
        Self {
            store,
            model: RwLock::new(None),
            learn_lock: Mutex::new(()),
            config,
        }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Cluster reference deck profiles and persist the resulting model.
    ///
    /// Decks whose profile has no cards are skipped. Fails with
    /// [`DeckError::NoUsableReferenceDecks`] when every deck is skipped, in
    /// which case the existing model is left untouched.
    #[instrument(skip_all, fields(decks = decks.len()))]
    pub async fn learn(&self, decks: Vec<(String, FeatureProfile)>) -> Result<LearnOutcome> {
        let _guard = self.learn_lock.lock().await;

        let mut vectors = Vec::with_capacity(decks.len());
        let mut skipped = Vec::new();
        for (name, profile) in &decks {
            if profile.total_cards() == 0 {
                log::warn!("Skipping reference deck '{}': no resolvable cards", name);
                skipped.push(name.clone());
                continue;
            }
            vectors.push(build_feature_vector(profile));
        }

        if vectors.is_empty() {
            return Err(DeckError::NoUsableReferenceDecks {
                skipped: skipped.len(),
            });
        }

        let result = kmeans(&vectors, &self.config);
        let model = ClusterModel::new(result.centroids);
        self.store.save(&model).await?;

        let outcome = LearnOutcome {
            k: model.k,
            centroids: model.centroids.clone(),
            decks_used: vectors.len(),
            skipped,
            iterations: result.iterations,
        };
        *self.model.write().await = Some(Arc::new(model));

        log::info!(
            "Learned {} archetype clusters from {} reference decks",
            outcome.k,
            outcome.decks_used
        );
        Ok(outcome)
    }

    /// The resident model, loading it from the store on first use.
    ///
    /// A missing or unusable model is not cached, so a later learning run
    /// or an externally written file is picked up on the next call.
    pub async fn model(&self) -> Option<Arc<ClusterModel>> {
        if let Some(model) = self.model.read().await.as_ref() {
            return Some(Arc::clone(model));
        }

        let mut slot = self.model.write().await;
        if let Some(model) = slot.as_ref() {
            return Some(Arc::clone(model));
        }

        match self.store.load().await {
            Ok(Some(model)) => match model.validate() {
                Ok(()) if !model.is_empty() => {
                    let model = Arc::new(model);
                    *slot = Some(Arc::clone(&model));
                    log::debug!("Loaded cluster model with k={}", model.k);
                    Some(model)
                }
                Ok(()) => None,
                Err(e) => {
                    log::warn!("Ignoring persisted cluster model: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to load cluster model: {}", e);
                None
            }
        }
    }

    /// Assign a profile to its nearest learned centroid.
    pub async fn classify(&self, profile: &FeatureProfile) -> ClusterAssignment {
        let Some(model) = self.model().await else {
            return ClusterAssignment::Unknown;
        };

        let vector = build_feature_vector(profile);
        nearest_centroid(&vector, &model.centroids)
            .map(ClusterAssignment::Cluster)
            .unwrap_or(ClusterAssignment::Unknown)
    }
}
