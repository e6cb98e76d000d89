//! Base-identifier derivation and suffix arithmetic.
//!
//! The format is fixed: five characters of the cleaned last name, two of the
//! first name, and a two-digit suffix starting at `01`. Identifiers are
//! re-derived from scratch on every run, so published references stay valid
//! only because this derivation is byte-stable.

use crate::constants::identifier::{
    FIRST_PREFIX_LEN, INITIAL_SUFFIX, LAST_NAME_STRIP, LAST_PREFIX_LEN, MAX_SUFFIX, SUFFIX_WIDTH,
};
use crate::errors::ResolveError;
use crate::types::{BaseId, PlayerId};

/// Derive the suffix-free base identifier for a name pair.
///
/// Both names are lowercased; spaces, periods, and apostrophes are stripped
/// from the last name before truncation, so `O'Malley` contributes `omall`.
/// Names shorter than the prefix lengths pass through whole.
pub fn base_id(first_name: &str, last_name: &str) -> BaseId {
    let cleaned: String = last_name
        .to_lowercase()
        .chars()
        .filter(|ch| !LAST_NAME_STRIP.contains(ch))
        .collect();
    let mut id: String = cleaned.chars().take(LAST_PREFIX_LEN).collect();
    id.extend(first_name.to_lowercase().chars().take(FIRST_PREFIX_LEN));
    id
}

/// Derive the initial full identifier: base plus suffix `01`.
pub fn create_id(first_name: &str, last_name: &str) -> PlayerId {
    format!(
        "{}{:0width$}",
        base_id(first_name, last_name),
        INITIAL_SUFFIX,
        width = SUFFIX_WIDTH
    )
}

/// Add `n` to an identifier's trailing 2-digit suffix, re-zero-padded.
///
/// Supports `n` in `[0, 99)`; a result past 99 is a [`ResolveError::SuffixOverflow`]
/// (the format cannot represent it). A non-numeric suffix means the caller
/// handed us something that never came out of [`create_id`], which is a
/// programming-invariant violation; propagate and abort.
pub fn add_n(id: &str, n: u32) -> Result<PlayerId, ResolveError> {
    let split_at = id.len().checked_sub(SUFFIX_WIDTH);
    let (prefix, suffix) = match split_at.and_then(|at| id.get(..at).zip(id.get(at..))) {
        Some(parts) => parts,
        None => return Err(ResolveError::MalformedIdentifier(id.to_string())),
    };
    if !suffix.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ResolveError::MalformedIdentifier(id.to_string()));
    }
    let value: u32 = suffix
        .parse()
        .map_err(|_| ResolveError::MalformedIdentifier(id.to_string()))?;
    let bumped = value + n;
    if bumped > MAX_SUFFIX {
        return Err(ResolveError::SuffixOverflow {
            id: id.to_string(),
            delta: n,
        });
    }
    Ok(format!("{prefix}{bumped:0width$}", width = SUFFIX_WIDTH))
}
