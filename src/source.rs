//! Source and sink seams around the resolution pipeline.
//!
//! Ownership model:
//! - [`RosterSource`] and [`OverlaySource`] hand the pipeline complete
//!   in-memory tables, read once at the start of a run.
//! - [`ResolvedSink`] receives the complete resolved table in one append
//!   after every stage (including the consistency check) has finished.
//!
//! The in-memory implementations cover tests and embedding; CSV-backed
//! counterparts live in [`crate::transport`].

use std::sync::Mutex;

use crate::data::{Correction, DuplicateMarker, NicknamePair, RawRow, ResolvedRecord};
use crate::errors::ResolveError;

/// Provider of the scraped roster tables.
///
/// Batting and pitching arrive as separate tables; the pipeline outer-joins
/// them on the normalized row key so a player who both batted and pitched in
/// a season contributes one row.
pub trait RosterSource: Send + Sync {
    /// Stable source identifier used in logs and error reporting.
    fn id(&self) -> &str;
    /// The scraped batting table.
    fn batting(&self) -> Result<Vec<RawRow>, ResolveError>;
    /// The scraped pitching table.
    fn pitching(&self) -> Result<Vec<RawRow>, ResolveError>;
}

/// Provider of the human-curated overlay tables.
pub trait OverlaySource: Send + Sync {
    /// Manual per-row name corrections.
    fn corrections(&self) -> Result<Vec<Correction>, ResolveError>;
    /// Duplicate-name markers.
    fn duplicate_markers(&self) -> Result<Vec<DuplicateMarker>, ResolveError>;
    /// Formal-name/nickname lookup used by the advisory scanner.
    fn nicknames(&self) -> Result<Vec<NicknamePair>, ResolveError>;
}

/// Destination for the resolved table. One bulk append per run; a run that
/// fails earlier never calls this.
pub trait ResolvedSink: Send + Sync {
    /// Append the complete resolved table.
    fn append(&self, rows: &[ResolvedRecord]) -> Result<(), ResolveError>;
}

/// In-memory roster source for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRoster {
    /// Batting rows to serve.
    pub batting: Vec<RawRow>,
    /// Pitching rows to serve.
    pub pitching: Vec<RawRow>,
}

impl RosterSource for InMemoryRoster {
    fn id(&self) -> &str {
        "in_memory_roster"
    }

    fn batting(&self) -> Result<Vec<RawRow>, ResolveError> {
        Ok(self.batting.clone())
    }

    fn pitching(&self) -> Result<Vec<RawRow>, ResolveError> {
        Ok(self.pitching.clone())
    }
}

/// In-memory overlay source for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemoryOverlays {
    /// Correction rows to serve.
    pub corrections: Vec<Correction>,
    /// Duplicate-marker rows to serve.
    pub duplicate_markers: Vec<DuplicateMarker>,
    /// Nickname rows to serve.
    pub nicknames: Vec<NicknamePair>,
}

impl OverlaySource for InMemoryOverlays {
    fn corrections(&self) -> Result<Vec<Correction>, ResolveError> {
        Ok(self.corrections.clone())
    }

    fn duplicate_markers(&self) -> Result<Vec<DuplicateMarker>, ResolveError> {
        Ok(self.duplicate_markers.clone())
    }

    fn nicknames(&self) -> Result<Vec<NicknamePair>, ResolveError> {
        Ok(self.nicknames.clone())
    }
}

/// Buffering sink that exposes what a run produced.
#[derive(Debug, Default)]
pub struct InMemorySink {
    rows: Mutex<Vec<ResolvedRecord>>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything appended so far.
    pub fn rows(&self) -> Vec<ResolvedRecord> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }
}

impl ResolvedSink for InMemorySink {
    fn append(&self, rows: &[ResolvedRecord]) -> Result<(), ResolveError> {
        let mut guard = self
            .rows
            .lock()
            .map_err(|_| ResolveError::Sink("lock poisoned".into()))?;
        guard.extend_from_slice(rows);
        Ok(())
    }
}
