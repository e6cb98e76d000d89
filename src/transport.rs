//! CSV-backed sources and sinks.
//!
//! The relational persistence layer proper is a collaborator outside this
//! crate; these readers and writers cover flat-file deployments, tests, and
//! the advisory review exports the scanner produces for humans.

use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::de::DeserializeOwned;

use crate::constants::transport::{
    FIRST_NAME_COLUMN, LAST_NAME_COLUMN, NAME_COLUMN, PLAYER_ID_COLUMN, SEASON_COLUMN, TEAM_COLUMN,
};
use crate::data::{Correction, DuplicateMarker, NicknamePair, RawRow, ResolvedRecord};
use crate::errors::ResolveError;
use crate::scanner::{NicknameCandidate, TransferCandidate, TypoCandidate};
use crate::types::StatColumn;

/// Roster source reading batting and pitching CSV files.
///
/// Raw files carry a `name` display-name column plus `team` and `season`;
/// every other column passes through as a statistic.
#[derive(Clone, Debug)]
pub struct CsvRoster {
    batting: PathBuf,
    pitching: PathBuf,
}

impl CsvRoster {
    /// Create a source over the two raw table files.
    pub fn new(batting: impl Into<PathBuf>, pitching: impl Into<PathBuf>) -> Self {
        Self {
            batting: batting.into(),
            pitching: pitching.into(),
        }
    }
}

impl crate::source::RosterSource for CsvRoster {
    fn id(&self) -> &str {
        "csv_roster"
    }

    fn batting(&self) -> Result<Vec<RawRow>, ResolveError> {
        read_raw_table(&self.batting)
    }

    fn pitching(&self) -> Result<Vec<RawRow>, ResolveError> {
        read_raw_table(&self.pitching)
    }
}

/// Overlay source reading the three curated CSV tables.
#[derive(Clone, Debug)]
pub struct CsvOverlays {
    corrections: PathBuf,
    duplicate_markers: PathBuf,
    nicknames: PathBuf,
}

impl CsvOverlays {
    /// Create a source over the curated table files.
    pub fn new(
        corrections: impl Into<PathBuf>,
        duplicate_markers: impl Into<PathBuf>,
        nicknames: impl Into<PathBuf>,
    ) -> Self {
        Self {
            corrections: corrections.into(),
            duplicate_markers: duplicate_markers.into(),
            nicknames: nicknames.into(),
        }
    }
}

impl crate::source::OverlaySource for CsvOverlays {
    fn corrections(&self) -> Result<Vec<Correction>, ResolveError> {
        read_table(&self.corrections)
    }

    fn duplicate_markers(&self) -> Result<Vec<DuplicateMarker>, ResolveError> {
        read_table(&self.duplicate_markers)
    }

    fn nicknames(&self) -> Result<Vec<NicknamePair>, ResolveError> {
        read_table(&self.nicknames)
    }
}

/// Sink writing the resolved table to one CSV file.
///
/// Each run replaces the file wholesale, matching the pipeline's
/// full-recompute semantics. Stat columns are emitted as the union across
/// rows in first-seen order; rows missing a column get an empty cell.
#[derive(Clone, Debug)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl crate::source::ResolvedSink for CsvSink {
    fn append(&self, rows: &[ResolvedRecord]) -> Result<(), ResolveError> {
        let mut stat_columns: Vec<StatColumn> = Vec::new();
        for row in rows {
            for column in row.stats.keys() {
                if !stat_columns.contains(column) {
                    stat_columns.push(column.clone());
                }
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        let mut header = vec![
            FIRST_NAME_COLUMN.to_string(),
            LAST_NAME_COLUMN.to_string(),
            TEAM_COLUMN.to_string(),
            SEASON_COLUMN.to_string(),
            PLAYER_ID_COLUMN.to_string(),
        ];
        header.extend(stat_columns.iter().cloned());
        writer.write_record(&header)?;

        for row in rows {
            let mut record = vec![
                row.first_name.clone(),
                row.last_name.clone(),
                row.team.clone(),
                row.season.to_string(),
                row.player_id.clone(),
            ];
            for column in &stat_columns {
                record.push(row.stats.get(column).cloned().unwrap_or_default());
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn read_raw_table(path: &Path) -> Result<Vec<RawRow>, ResolveError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let name_at = require_column(&headers, NAME_COLUMN, path)?;
    let team_at = require_column(&headers, TEAM_COLUMN, path)?;
    let season_at = require_column(&headers, SEASON_COLUMN, path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let season = cell(&record, season_at).trim().parse().map_err(|_| {
            ResolveError::SourceUnavailable {
                source_id: path.display().to_string(),
                reason: format!("season value '{}' is not a year", cell(&record, season_at)),
            }
        })?;
        let stats = headers
            .iter()
            .enumerate()
            .filter(|(at, _)| *at != name_at && *at != team_at && *at != season_at)
            .map(|(at, header)| (header.to_string(), cell(&record, at).to_string()))
            .collect();
        rows.push(RawRow {
            name: cell(&record, name_at).to_string(),
            team: cell(&record, team_at).to_string(),
            season,
            stats,
        });
    }
    Ok(rows)
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ResolveError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

fn require_column(headers: &StringRecord, column: &str, path: &Path) -> Result<usize, ResolveError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| ResolveError::SourceUnavailable {
            source_id: path.display().to_string(),
            reason: format!("missing required column '{column}'"),
        })
}

fn cell<'a>(record: &'a StringRecord, at: usize) -> &'a str {
    record.get(at).unwrap_or("")
}

/// Write typo candidates as a review CSV.
pub fn write_typo_candidates(path: &Path, candidates: &[TypoCandidate]) -> Result<(), ResolveError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "left_first_name",
        "left_last_name",
        "left_team",
        "left_season",
        "right_first_name",
        "right_last_name",
        "right_team",
        "right_season",
        "last_name_distance",
        "first_name_distance",
    ])?;
    for candidate in candidates {
        writer.write_record([
            candidate.left.first_name.clone(),
            candidate.left.last_name.clone(),
            candidate.left.team.clone(),
            candidate.left.season.to_string(),
            candidate.right.first_name.clone(),
            candidate.right.last_name.clone(),
            candidate.right.team.clone(),
            candidate.right.season.to_string(),
            candidate.last_name_distance.to_string(),
            candidate.first_name_distance.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write nickname candidates as a review CSV.
pub fn write_nickname_candidates(
    path: &Path,
    candidates: &[NicknameCandidate],
) -> Result<(), ResolveError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "formal_first_name",
        "formal_last_name",
        "formal_team",
        "formal_season",
        "nickname_first_name",
        "nickname_last_name",
        "nickname_team",
        "nickname_season",
    ])?;
    for candidate in candidates {
        writer.write_record([
            candidate.formal.first_name.clone(),
            candidate.formal.last_name.clone(),
            candidate.formal.team.clone(),
            candidate.formal.season.to_string(),
            candidate.nickname.first_name.clone(),
            candidate.nickname.last_name.clone(),
            candidate.nickname.team.clone(),
            candidate.nickname.season.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write transfer/collision candidates as a review CSV.
pub fn write_transfer_candidates(
    path: &Path,
    candidates: &[TransferCandidate],
) -> Result<(), ResolveError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        FIRST_NAME_COLUMN,
        LAST_NAME_COLUMN,
        TEAM_COLUMN,
        SEASON_COLUMN,
        "teams",
    ])?;
    for candidate in candidates {
        writer.write_record([
            candidate.key.first_name.clone(),
            candidate.key.last_name.clone(),
            candidate.key.team.clone(),
            candidate.key.season.to_string(),
            candidate.teams.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
