use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::deck::error::{DeckError, Result};
use crate::core::deck::learner::{KMeansConfig, DEFAULT_MODEL_FILE};
use crate::core::deck::{DEFAULT_CONCURRENCY, DEFAULT_FUZZY_THRESHOLD};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub resolver: ResolverConfig,
    pub learner: LearnerConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

/// Card resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum concurrent card lookups.
    pub concurrency: usize,
    /// Bound the resolution cache; `None` keeps every entry for the process lifetime.
    pub cache_capacity: Option<usize>,
    /// Minimum similarity for fuzzy name matching; `None` disables it.
    pub fuzzy_threshold: Option<f64>,
}

/// Archetype learning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    pub k: usize,
    pub max_iterations: usize,
    pub seed: u64,
    /// Override the cluster model location.
    pub model_path: Option<PathBuf>,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
    /// Default card database (JSON array of cards).
    pub card_database: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Write JSON logs here in addition to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            cache_capacity: None,
            fuzzy_threshold: Some(DEFAULT_FUZZY_THRESHOLD),
        }
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        let kmeans = KMeansConfig::default();
        Self {
            k: kmeans.k,
            max_iterations: kmeans.max_iterations,
            seed: kmeans.seed,
            model_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            log_dir: None,
        }
    }
}

impl LearnerConfig {
    pub fn kmeans(&self) -> KMeansConfig {
        KMeansConfig {
            k: self.k.max(1),
            max_iterations: self.max_iterations.max(1),
            seed: self.seed,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/deckscope/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path, failing on any error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| DeckError::Config(format!("{}: {e}", path.display())))
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("deckscope"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Cluster model file (override or inside the data directory).
    pub fn model_path(&self) -> PathBuf {
        self.learner
            .model_path
            .clone()
            .unwrap_or_else(|| self.data_dir().join(DEFAULT_MODEL_FILE))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("deckscope").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
