//! Plain-text decklist parsing.
//!
//! Accepted line shapes:
//!
//! ```text
//! 4 Lightning Bolt
//! 4x Lightning Bolt
//! 4 x Lightning Bolt
//! Lightning Bolt            (one copy)
//! // comment  or  # comment
//! Sideboard  or  Sideboard:
//! ```
//!
//! A blank line after main-deck entries also starts the sideboard, as in
//! the common Arena export format.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{DeckError, Result};

/// Upper bound on a single line's copy count.
pub const MAX_COPIES_PER_LINE: usize = 250;

static COUNT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*([xX])?\s+(.+)$").expect("invalid count pattern"));

static SIDEBOARD_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^sideboard:?$").expect("invalid sideboard pattern"));

/// A parsed decklist with card names expanded to their multiplicity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decklist {
    pub main: Vec<String>,
    pub sideboard: Vec<String>,
}

impl Decklist {
    pub fn has_sideboard(&self) -> bool {
        !self.sideboard.is_empty()
    }
}

/// Split a line into copy count and card name.
///
/// A bare leading number above [`MAX_COPIES_PER_LINE`] with no `x` marker
/// is read as part of the name ("1996 World Champion"), not as a count.
fn parse_line(line: &str, line_no: usize) -> Result<(usize, String)> {
    let Some(caps) = COUNT_PREFIX.captures(line) else {
        return Ok((1, line.to_string()));
    };
    let has_marker = caps.get(2).is_some();

    let count = match caps[1].parse::<usize>() {
        Ok(count) if count > MAX_COPIES_PER_LINE && !has_marker => {
            return Ok((1, line.to_string()))
        }
        Ok(count) => count,
        Err(_) if !has_marker => return Ok((1, line.to_string())),
        Err(_) => {
            return Err(DeckError::Decklist {
                line: line_no,
                reason: format!("invalid count '{}'", &caps[1]),
            })
        }
    };
    if count == 0 || count > MAX_COPIES_PER_LINE {
        return Err(DeckError::Decklist {
            line: line_no,
            reason: format!("count {count} out of range 1..={MAX_COPIES_PER_LINE}"),
        });
    }

    Ok((count, caps[3].trim().to_string()))
}

/// Parse decklist text into main deck and sideboard names.
pub fn parse_decklist(text: &str) -> Result<Decklist> {
    let mut list = Decklist::default();
    let mut in_sideboard = false;
    let mut saw_blank_after_main = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() {
            if !list.main.is_empty() {
                saw_blank_after_main = true;
            }
            continue;
        }
        if line.starts_with("//") || line.starts_with('#') {
            continue;
        }
        if SIDEBOARD_HEADER.is_match(line) {
            in_sideboard = true;
            continue;
        }
        if saw_blank_after_main {
            in_sideboard = true;
        }

        let (count, name) = parse_line(line, idx + 1)?;
        let target = if in_sideboard {
            &mut list.sideboard
        } else {
            &mut list.main
        };
        target.extend(std::iter::repeat(name).take(count));
    }

    log::debug!(
        "Parsed decklist: {} main, {} sideboard",
        list.main.len(),
        list.sideboard.len()
    );
    Ok(list)
}
