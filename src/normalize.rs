//! Display-name splitting and whitespace cleanup.

use tracing::warn;

use crate::constants::messages::UNSPLITTABLE_NAME_MSG;
use crate::data::{NameRecord, RawRow};

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Split a scraped display name into (first, last).
///
/// The first whitespace-delimited token becomes the first name; everything
/// after it rejoins with single spaces as the last name, so multi-word
/// surnames like `Milne Rojek` survive. Periods are stripped from the first
/// name only (`"D.J."` becomes `"DJ"`); last-name periods are handled later
/// inside identifier derivation. A name with no whitespace yields an empty
/// last name.
pub fn split_display_name(raw: &str) -> (String, String) {
    let cleaned = normalize_inline_whitespace(raw);
    let mut tokens = cleaned.splitn(2, ' ');
    let first = tokens.next().unwrap_or("").replace('.', "");
    let last = tokens.next().unwrap_or("").to_string();
    if last.is_empty() && !cleaned.is_empty() {
        warn!(name = %raw, "{}", UNSPLITTABLE_NAME_MSG);
    }
    (first, last)
}

/// Normalize one raw scraped row into a pipeline record.
pub fn normalize_row(raw: RawRow) -> NameRecord {
    let (first_name, last_name) = split_display_name(&raw.name);
    NameRecord {
        first_name,
        last_name,
        team: raw.team,
        season: raw.season,
        stats: raw.stats,
    }
}
