//! Pipeline orchestration: one full recompute per run.
//!
//! Identifiers are a pure function of the complete historical dataset plus
//! the curated overlay tables, all read once at the start; reruns with the
//! same inputs reproduce the same identifiers. The resolved table is built
//! in full before the sink sees a single row, so a fatal consistency error
//! aborts with nothing written.

use std::collections::HashMap;
use std::collections::HashSet;

use tracing::{debug, info};

use crate::adjudicate;
use crate::constants::scanner::{DEFAULT_FIRST_NAME_DISTANCE, DEFAULT_LAST_NAME_DISTANCE};
use crate::corrections;
use crate::data::{NameRecord, RowKey};
use crate::errors::ResolveError;
use crate::identifier::base_id;
use crate::normalize;
use crate::report::RunReport;
use crate::resolve;
use crate::scanner::{self, ScanOutput};
use crate::source::{OverlaySource, ResolvedSink, RosterSource};

/// Tunables for one resolver instance.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// Max last-name edit distance surfaced by the typo scan.
    pub last_name_distance: usize,
    /// Max first-name edit distance surfaced by the typo scan.
    pub first_name_distance: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            last_name_distance: DEFAULT_LAST_NAME_DISTANCE,
            first_name_distance: DEFAULT_FIRST_NAME_DISTANCE,
        }
    }
}

/// Batch resolver wiring the pipeline stages together.
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline: read, normalize, merge, correct, identify,
    /// separate base collisions, adjudicate duplicates, verify, append.
    pub fn run(
        &self,
        roster: &dyn RosterSource,
        overlays: &dyn OverlaySource,
        sink: &dyn ResolvedSink,
    ) -> Result<RunReport, ResolveError> {
        let batting_raw = roster.batting()?;
        let pitching_raw = roster.pitching()?;
        let batting_rows = batting_raw.len();
        let pitching_rows = pitching_raw.len();
        info!(
            source = roster.id(),
            batting = batting_rows,
            pitching = pitching_rows,
            "loaded roster tables"
        );

        let batting: Vec<NameRecord> = batting_raw.into_iter().map(normalize::normalize_row).collect();
        let pitching: Vec<NameRecord> = pitching_raw.into_iter().map(normalize::normalize_row).collect();
        let mut rows = merge_rosters(batting, pitching);
        let merged_rows = rows.len();

        let corrections_applied = corrections::apply(&mut rows, &overlays.corrections()?);

        let unique_bases = rows
            .iter()
            .map(|row| base_id(&row.first_name, &row.last_name))
            .collect::<HashSet<_>>()
            .len();

        let mut resolved = resolve::assign_identifiers(rows)?;
        let summary = adjudicate::apply_markers(&mut resolved, &overlays.duplicate_markers()?)?;

        sink.append(&resolved)?;

        let report = RunReport {
            batting_rows,
            pitching_rows,
            merged_rows,
            corrections_applied,
            unique_bases,
            unique_after_conflicts: summary.unique_before,
            declared_splits: summary.declared_splits,
            unique_after_markers: summary.unique_after,
        };
        report.log();
        Ok(report)
    }

    /// Run the advisory similarity analyses over the current roster.
    ///
    /// Reads the same tables as [`Resolver::run`] but writes nothing; the
    /// output feeds the human review loop that updates the correction and
    /// marker tables for the next run.
    pub fn scan(
        &self,
        roster: &dyn RosterSource,
        overlays: &dyn OverlaySource,
    ) -> Result<ScanOutput, ResolveError> {
        let batting: Vec<NameRecord> = roster
            .batting()?
            .into_iter()
            .map(normalize::normalize_row)
            .collect();
        let pitching: Vec<NameRecord> = roster
            .pitching()?
            .into_iter()
            .map(normalize::normalize_row)
            .collect();
        let rows = merge_rosters(batting, pitching);

        Ok(ScanOutput {
            typos: scanner::typo_candidates(
                &rows,
                self.config.last_name_distance,
                self.config.first_name_distance,
            ),
            nicknames: scanner::nickname_candidates(&rows, &overlays.nicknames()?),
            transfers: scanner::transfer_candidates(&rows),
        })
    }
}

/// Outer-join batting and pitching rows on the normalized row key.
///
/// Batting rows come first in their input order, then pitching-only rows in
/// theirs. When both tables carry a row for one key, pitching stat columns
/// are merged in; a column name already present on the batting side keeps
/// the batting value.
pub fn merge_rosters(batting: Vec<NameRecord>, pitching: Vec<NameRecord>) -> Vec<NameRecord> {
    let mut merged: Vec<NameRecord> = Vec::with_capacity(batting.len() + pitching.len());
    let mut index: HashMap<RowKey, usize> = HashMap::new();

    for row in batting {
        index.insert(row.key(), merged.len());
        merged.push(row);
    }
    for row in pitching {
        match index.get(&row.key()) {
            Some(&at) => {
                for (column, value) in row.stats {
                    if merged[at].stats.contains_key(&column) {
                        debug!(%column, "pitching column collides with batting; keeping batting value");
                    } else {
                        merged[at].stats.insert(column, value);
                    }
                }
            }
            None => {
                index.insert(row.key(), merged.len());
                merged.push(row);
            }
        }
    }
    merged
}
