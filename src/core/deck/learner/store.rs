//! Cluster model persistence.
//!
//! A model is written wholesale by each learning run. The file store
//! writes to a temporary file in the target directory and renames it
//! over the target, so readers see either the old model or the new one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::RwLock;

use super::vector::{vocabulary, FEATURE_DIMENSIONS};
use crate::core::deck::error::{DeckError, Result};

/// Default model file name.
pub const DEFAULT_MODEL_FILE: &str = "learned_archetypes.json";

// ============================================================================
// ClusterModel
// ============================================================================

/// Learned centroids plus the vector layout they were trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterModel {
    pub k: usize,
    pub centroids: Vec<Vec<f64>>,

    /// Vector length at training time. Older files without it are
    /// checked against the centroid lengths instead.
    #[serde(default)]
    pub dimensions: usize,

    #[serde(default)]
    pub vocabulary: Vec<String>,
}

impl ClusterModel {
    /// Wrap freshly learned centroids with the current layout.
    pub fn new(centroids: Vec<Vec<f64>>) -> Self {
        Self {
            k: centroids.len(),
            centroids,
            dimensions: FEATURE_DIMENSIONS,
            vocabulary: vocabulary(),
        }
    }

    /// Check that this model matches the current feature-vector layout.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions != 0 && self.dimensions != FEATURE_DIMENSIONS {
            return Err(DeckError::ModelDimensionMismatch {
                expected: FEATURE_DIMENSIONS,
                actual: self.dimensions,
            });
        }
        if let Some(bad) = self.centroids.iter().find(|c| c.len() != FEATURE_DIMENSIONS) {
            return Err(DeckError::ModelDimensionMismatch {
                expected: FEATURE_DIMENSIONS,
                actual: bad.len(),
            });
        }
        if !self.vocabulary.is_empty() && self.vocabulary != vocabulary() {
            return Err(DeckError::Config(format!(
                "model vocabulary {:?} does not match current vocabulary",
                self.vocabulary
            )));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}

// ============================================================================
// ModelStore
// ============================================================================

/// Durable storage for the single cluster model.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// The persisted model, or `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<ClusterModel>>;

    /// Replace the persisted model. Must be all-or-nothing.
    async fn save(&self, model: &ClusterModel) -> Result<()>;
}

/// JSON file store with atomic replace.
#[derive(Debug, Clone)]
pub struct JsonFileModelStore {
    path: PathBuf,
}

impl JsonFileModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persistence_error(&self, reason: impl ToString) -> DeckError {
        DeckError::ModelPersistence {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    use std::io::Write;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[async_trait]
impl ModelStore for JsonFileModelStore {
    async fn load(&self) -> Result<Option<ClusterModel>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No cluster model at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.persistence_error(e)),
        };

        let model: ClusterModel =
            serde_json::from_str(&content).map_err(|e| self.persistence_error(e))?;
        Ok(Some(model))
    }

    async fn save(&self, model: &ClusterModel) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(model)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| self.persistence_error(e))?
            .map_err(|e| self.persistence_error(e))?;

        log::info!(
            "Saved cluster model (k={}) to {}",
            model.k,
            self.path.display()
        );
        Ok(())
    }
}

/// Process-local store, mainly for tests.
#[derive(Debug, Default)]
pub struct InMemoryModelStore {
    model: RwLock<Option<ClusterModel>>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: ClusterModel) -> Self {
        Self {
            model: RwLock::new(Some(model)),
        }
    }
}

#[async_trait]
impl ModelStore for InMemoryModelStore {
    async fn load(&self) -> Result<Option<ClusterModel>> {
        Ok(self.model.read().await.clone())
    }

    async fn save(&self, model: &ClusterModel) -> Result<()> {
        *self.model.write().await = Some(model.clone());
        Ok(())
    }
}
