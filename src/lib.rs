/// Deckscope - trading card deck analysis engine
///
/// Resolves decklists against a card database, extracts deck features,
/// classifies archetypes by rule and by learned clusters, and produces
/// health scores, matchup hints and recommendations.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
