//! Property-based tests for the deck engine
//!
//! This module contains property-based tests using the proptest framework.
//! Property tests verify invariants that should hold for all decks, rather
//! than testing specific lists.
//!
//! ## Running Property Tests
//!
//! Run all property tests:
//! ```sh
//! cargo test property --release
//! ```
//!
//! Run a specific property test module:
//! ```sh
//! cargo test property::feature_props --release
//! ```
//!
//! ## Test Modules
//!
//! - `feature_props`: Tests for feature extraction
//!   - Curve distribution sums to the number of cards
//!   - Colors are a sorted, duplicate-free subset of WUBRG
//!   - Every score stays within 0-100
//!   - Extraction is deterministic and order-insensitive
//!
//! - `classifier_props`: Tests for archetype classification and learning
//!   - Classification never yields an empty label
//!   - Aggro guard wins over the control guard
//!   - Colorless decks never get a color-pair archetype
//!   - k-means yields at most k centroids, all of them finite
//!   - Nearest-centroid assignment is stable for a fixed model

mod classifier_props;
mod feature_props;
