#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// DuplicateNameAdjudicator: curated identity splits and the
/// identifier-count consistency check.
pub mod adjudicate;
/// Constants fixing identifier format, scanner defaults, and CSV columns.
pub mod constants;
/// CorrectionApplier: manual name-correction overlay.
pub mod corrections;
/// Typed row and overlay record types.
pub mod data;
mod errors;
/// IdentifierGenerator: base derivation and suffix arithmetic.
pub mod identifier;
/// NameNormalizer: display-name splitting and cleanup.
pub mod normalize;
/// Pipeline orchestration and the batting/pitching merge.
pub mod pipeline;
/// Per-stage operator report.
pub mod report;
/// ConflictResolver: base-identifier collision handling.
pub mod resolve;
/// SimilarityScanner: advisory typo/nickname/transfer analyses.
pub mod scanner;
/// Source and sink seams plus in-memory implementations.
pub mod source;
/// CSV-backed sources, sinks, and review exports.
pub mod transport;
/// Shared type aliases.
pub mod types;

pub use data::{
    Correction, DuplicateMarker, NameRecord, NicknamePair, RawRow, ResolvedRecord, RowKey,
};
pub use errors::ResolveError;
pub use pipeline::{Resolver, ResolverConfig};
pub use report::RunReport;
pub use scanner::ScanOutput;
pub use source::{
    InMemoryOverlays, InMemoryRoster, InMemorySink, OverlaySource, ResolvedSink, RosterSource,
};
pub use types::{BaseId, FullName, PlayerId, Season, TeamCode};
