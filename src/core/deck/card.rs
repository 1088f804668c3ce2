//! Card metadata consumed by the analysis engine.
//!
//! - [`Color`]: the five color-identity symbols, ordered W, U, B, R, G
//! - [`CardType`]: the seven type-line categories the engine tallies
//! - [`Legality`]: per-format legality status
//! - [`Card`]: normalized card metadata as returned by a card source
//!
//! Cards deserialize from Scryfall-shaped JSON (`cmc` is accepted for
//! `mana_value`, unknown color symbols are dropped).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Color
// ============================================================================

/// A color-identity symbol.
///
/// The derived ordering is WUBRG, which is the order used everywhere a
/// "sorted" color set is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    /// All colors in WUBRG order.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Parse a single color symbol (case-insensitive).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "W" => Some(Color::White),
            "U" => Some(Color::Blue),
            "B" => Some(Color::Black),
            "R" => Some(Color::Red),
            "G" => Some(Color::Green),
            _ => None,
        }
    }

    /// Parse a color from a mana-symbol character.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    /// The one-letter symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Blue => "U",
            Color::Black => "B",
            Color::Red => "R",
            Color::Green => "G",
        }
    }

    /// The color's English name, as used in archetype labels.
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Blue => "Blue",
            Color::Black => "Black",
            Color::Red => "Red",
            Color::Green => "Green",
        }
    }

    /// Position in WUBRG order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The braced mana symbol, e.g. `{R}`.
    pub fn mana_symbol(self) -> &'static str {
        match self {
            Color::White => "{W}",
            Color::Blue => "{U}",
            Color::Black => "{B}",
            Color::Red => "{R}",
            Color::Green => "{G}",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Deserialize a list of color symbols, dropping anything unrecognised.
fn deserialize_colors<'de, D>(deserializer: D) -> std::result::Result<Vec<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    let mut colors: Vec<Color> = raw
        .unwrap_or_default()
        .iter()
        .filter_map(|s| Color::from_symbol(s))
        .collect();
    colors.sort();
    colors.dedup();
    Ok(colors)
}

// ============================================================================
// CardType
// ============================================================================

/// Type-line categories. A card may belong to several (artifact creature).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Creature,
    Instant,
    Sorcery,
    Enchantment,
    Artifact,
    Planeswalker,
    Land,
}

impl CardType {
    /// All categories in tally order.
    pub const ALL: [CardType; 7] = [
        CardType::Creature,
        CardType::Instant,
        CardType::Sorcery,
        CardType::Enchantment,
        CardType::Artifact,
        CardType::Planeswalker,
        CardType::Land,
    ];

    /// The keyword searched for in a type line.
    pub fn keyword(self) -> &'static str {
        match self {
            CardType::Creature => "Creature",
            CardType::Instant => "Instant",
            CardType::Sorcery => "Sorcery",
            CardType::Enchantment => "Enchantment",
            CardType::Artifact => "Artifact",
            CardType::Planeswalker => "Planeswalker",
            CardType::Land => "Land",
        }
    }
}

// ============================================================================
// Legality
// ============================================================================

/// Legality of a card in one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Legality {
    Legal,
    NotLegal,
    Banned,
    Restricted,
    #[serde(other)]
    Unknown,
}

// ============================================================================
// Card
// ============================================================================

/// Normalized card metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,

    #[serde(default, alias = "cmc")]
    pub mana_value: f64,

    #[serde(default)]
    pub type_line: String,

    #[serde(default)]
    pub oracle_text: String,

    #[serde(default, deserialize_with = "deserialize_colors")]
    pub color_identity: Vec<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,

    #[serde(default)]
    pub legalities: BTreeMap<String, Legality>,

    #[serde(default)]
    pub set_type: String,
}

impl Card {
    /// Create a card with a name, mana value and type line.
    pub fn new(name: impl Into<String>, mana_value: f64, type_line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mana_value: mana_value.max(0.0),
            type_line: type_line.into(),
            oracle_text: String::new(),
            color_identity: Vec::new(),
            mana_cost: None,
            power: None,
            toughness: None,
            legalities: BTreeMap::new(),
            set_type: String::new(),
        }
    }

    /// Builder method to set oracle text.
    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    /// Builder method to set the color identity.
    pub fn with_colors(mut self, colors: &[Color]) -> Self {
        let mut colors = colors.to_vec();
        colors.sort();
        colors.dedup();
        self.color_identity = colors;
        self
    }

    /// Builder method to set the mana cost string.
    pub fn with_mana_cost(mut self, cost: impl Into<String>) -> Self {
        self.mana_cost = Some(cost.into());
        self
    }

    /// Builder method to set power and toughness.
    pub fn with_stats(mut self, power: impl Into<String>, toughness: impl Into<String>) -> Self {
        self.power = Some(power.into());
        self.toughness = Some(toughness.into());
        self
    }

    /// Builder method to record a format legality.
    pub fn with_legality(mut self, format: impl Into<String>, legality: Legality) -> Self {
        self.legalities.insert(format.into(), legality);
        self
    }

    /// Whether the type line contains the given category keyword.
    #[inline]
    pub fn has_type(&self, card_type: CardType) -> bool {
        self.type_line.contains(card_type.keyword())
    }

    #[inline]
    pub fn is_land(&self) -> bool {
        self.has_type(CardType::Land)
    }

    #[inline]
    pub fn is_creature(&self) -> bool {
        self.has_type(CardType::Creature)
    }

    /// Lowercased oracle text for keyword matching.
    pub fn oracle_lower(&self) -> String {
        self.oracle_text.to_lowercase()
    }

    /// Mana-curve bucket: integer mana value capped at 7.
    pub fn curve_bucket(&self) -> usize {
        if !self.mana_value.is_finite() || self.mana_value <= 0.0 {
            return 0;
        }
        (self.mana_value.floor() as usize).min(7)
    }

    /// Colored pips in the mana cost, indexed by [`Color::index`].
    ///
    /// Hybrid symbols count toward every color they name. Without a mana
    /// cost, one pip per identity color is assumed.
    pub fn color_pips(&self) -> [u32; 5] {
        let mut pips = [0u32; 5];
        match self.mana_cost.as_deref() {
            Some(cost) if !cost.is_empty() => {
                for symbol in cost.split('{').skip(1) {
                    let inner = symbol.split('}').next().unwrap_or("");
                    for c in inner.chars() {
                        if let Some(color) = Color::from_char(c) {
                            pips[color.index()] += 1;
                        }
                    }
                }
            }
            _ => {
                for color in &self.color_identity {
                    pips[color.index()] += 1;
                }
            }
        }
        pips
    }

    /// Legality in a format, if the card source reported one.
    pub fn legality(&self, format: &str) -> Option<Legality> {
        self.legalities.get(format).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_ordering_is_wubrg() {
        let mut colors = vec![Color::Green, Color::White, Color::Red, Color::Blue, Color::Black];
        colors.sort();
        assert_eq!(colors, Color::ALL.to_vec());
    }

    #[test]
    fn test_color_from_symbol() {
        assert_eq!(Color::from_symbol("r"), Some(Color::Red));
        assert_eq!(Color::from_symbol(" U "), Some(Color::Blue));
        assert_eq!(Color::from_symbol("C"), None);
    }

    #[test]
    fn test_card_type_detection() {
        let card = Card::new("Ornithopter", 0.0, "Artifact Creature — Thopter");
        assert!(card.has_type(CardType::Artifact));
        assert!(card.is_creature());
        assert!(!card.is_land());
    }

    #[test]
    fn test_curve_bucket_caps_at_seven() {
        assert_eq!(Card::new("Emrakul", 15.0, "Creature").curve_bucket(), 7);
        assert_eq!(Card::new("Bolt", 1.0, "Instant").curve_bucket(), 1);
        assert_eq!(Card::new("Mountain", 0.0, "Basic Land").curve_bucket(), 0);
        assert_eq!(Card::new("Odd", f64::NAN, "Instant").curve_bucket(), 0);
    }

    #[test]
    fn test_color_pips_from_mana_cost() {
        let card = Card::new("Boros Charm", 2.0, "Instant").with_mana_cost("{R}{W}");
        let pips = card.color_pips();
        assert_eq!(pips[Color::Red.index()], 1);
        assert_eq!(pips[Color::White.index()], 1);

        let hybrid = Card::new("Kitchen Finks", 3.0, "Creature").with_mana_cost("{1}{G/W}{G/W}");
        let pips = hybrid.color_pips();
        assert_eq!(pips[Color::Green.index()], 2);
        assert_eq!(pips[Color::White.index()], 2);
    }

    #[test]
    fn test_color_pips_fall_back_to_identity() {
        let card = Card::new("Mystery", 3.0, "Creature").with_colors(&[Color::Black, Color::Green]);
        let pips = card.color_pips();
        assert_eq!(pips, [0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_deserialize_scryfall_shape() {
        let json = r#"{
            "name": "Lightning Bolt",
            "cmc": 1.0,
            "type_line": "Instant",
            "oracle_text": "Lightning Bolt deals 3 damage to any target.",
            "mana_cost": "{R}",
            "color_identity": ["R", "X"],
            "legalities": {"modern": "legal", "standard": "not_legal", "vintage": "weird"},
            "set_type": "core"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.mana_value, 1.0);
        assert_eq!(card.color_identity, vec![Color::Red]);
        assert_eq!(card.legality("modern"), Some(Legality::Legal));
        assert_eq!(card.legality("vintage"), Some(Legality::Unknown));
        assert!(card.power.is_none());
    }
}
