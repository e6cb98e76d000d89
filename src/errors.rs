use std::io;

use thiserror::Error;

use crate::types::PlayerId;

/// Error type for identifier arithmetic, table access, and the
/// duplicate-adjudication consistency check.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An identifier did not end in a parseable 2-digit suffix. The format
    /// is fixed upstream, so hitting this means a programming error rather
    /// than bad input; callers abort instead of recovering.
    #[error("identifier '{0}' does not end in a 2-digit suffix")]
    MalformedIdentifier(PlayerId),
    /// Suffix arithmetic walked past the 2-digit ceiling of 99.
    #[error("suffix overflow: '{id}' + {delta} exceeds 99")]
    SuffixOverflow {
        /// Identifier whose suffix was being bumped.
        id: PlayerId,
        /// Increment that pushed it over.
        delta: u32,
    },
    /// The unique-identifier count after duplicate adjudication disagrees
    /// with what the marker table declares. Fatal: the curated marker data
    /// is internally inconsistent and would silently corrupt identifiers.
    #[error(
        "identifier consistency check failed: \
         {after} unique identifiers after adjudication, expected {before} + {splits}"
    )]
    ConsistencyViolation {
        /// Distinct identifiers after conflict resolution alone.
        before: usize,
        /// Distinct identifiers after markers were applied.
        after: usize,
        /// Splits declared by the marker table (sum of per-name max ranks).
        splits: usize,
    },
    /// A roster or overlay source failed to produce its table.
    #[error("source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Identifier of the failing source.
        source_id: String,
        /// Human-readable failure description.
        reason: String,
    },
    /// The persistence sink rejected the resolved table.
    #[error("sink failure: {0}")]
    Sink(String),
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// CSV encode/decode failure in the transport layer.
    #[error("csv transport failure: {0}")]
    Csv(#[from] csv::Error),
}
