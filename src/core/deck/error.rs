//! Error types for the deck analysis engine.
//!
//! Feature extraction and classification never fail: unresolved cards are
//! dropped and degenerate decks produce zero-valued profiles. The variants
//! below cover the few hard failures (no input at all, model persistence)
//! plus the boundary collaborators (card sources, decklists, config).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for deck analysis operations.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Error enum for deck analysis, resolution and archetype learning.
#[derive(Error, Debug)]
pub enum DeckError {
    // =========================================================================
    // Input Errors
    // =========================================================================

    /// No card names were supplied.
    #[error("Deck is empty: at least one card name is required")]
    EmptyInput,

    /// A decklist line could not be parsed.
    #[error("Invalid decklist line {line}: {reason}")]
    Decklist {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    // =========================================================================
    // Resolution Errors
    // =========================================================================

    /// The card source failed while looking up a card.
    ///
    /// Resolution treats this as a miss for the current request only.
    #[error("Card source failed for '{name}': {reason}")]
    CardSource {
        /// Card name that was being looked up
        name: String,
        /// Description of the failure
        reason: String,
    },

    // =========================================================================
    // Learning Errors
    // =========================================================================

    /// Every reference deck was skipped, so there is nothing to cluster.
    #[error("No usable reference decks: {skipped} skipped with no resolvable cards")]
    NoUsableReferenceDecks {
        /// Number of reference decks that were skipped
        skipped: usize,
    },

    /// A feature vector or centroid does not match the model layout.
    #[error("Feature vector dimension mismatch: expected {expected}, got {actual}")]
    ModelDimensionMismatch {
        /// Dimensions of the current vector layout
        expected: usize,
        /// Dimensions actually found
        actual: usize,
    },

    // =========================================================================
    // Persistence Errors
    // =========================================================================

    /// The cluster model could not be written or read.
    #[error("Cluster model persistence failed at {}: {reason}", path.display())]
    ModelPersistence {
        /// Location of the model file
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// Atomic replace of a temporary file failed.
    #[error("Atomic persist failed: {0}")]
    Persist(#[from] tempfile::PersistError),

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeckError {
    /// Whether this error is a hard failure the caller must surface.
    ///
    /// Source failures are absorbed by the resolver; everything else is
    /// either a rejected request or a persistence problem.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DeckError::CardSource { .. })
    }
}
