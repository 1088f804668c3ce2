pub mod logging;

// Deck analysis: card resolution, feature extraction, archetype
// classification and learning
pub mod deck;
