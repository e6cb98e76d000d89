use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use crate::types::{FullName, PlayerId, Season, StatColumn, StatValue, TeamCode};

/// One scraped box-score row before name splitting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Display name exactly as scraped, e.g. `"D.J.  Dillon"`.
    pub name: String,
    /// Short team code.
    pub team: TeamCode,
    /// Four-digit season year.
    pub season: Season,
    /// Passthrough statistic columns in scrape order.
    #[serde(default)]
    pub stats: IndexMap<StatColumn, StatValue>,
}

/// Natural key of one player-season row after name splitting.
///
/// Not guaranteed globally unique on its own: genuinely different people can
/// share all four fields only across *different* keys, but the same person
/// appears under many keys over a career. Corrections and duplicate markers
/// both address rows by this key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowKey {
    /// First name, post-normalization (periods already stripped).
    pub first_name: String,
    /// Last name, possibly multi-word.
    pub last_name: String,
    /// Short team code.
    pub team: TeamCode,
    /// Four-digit season year.
    pub season: Season,
}

impl RowKey {
    /// First and last name joined with a single space.
    pub fn full_name(&self) -> FullName {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One normalized roster row flowing through the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    /// First name token of the display name.
    pub first_name: String,
    /// Remaining display-name tokens rejoined with single spaces.
    pub last_name: String,
    /// Short team code.
    pub team: TeamCode,
    /// Four-digit season year.
    pub season: Season,
    /// Passthrough statistic columns, untouched by every stage.
    #[serde(default)]
    pub stats: IndexMap<StatColumn, StatValue>,
}

impl NameRecord {
    /// The row's natural key.
    pub fn key(&self) -> RowKey {
        RowKey {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            team: self.team.clone(),
            season: self.season,
        }
    }

    /// First and last name joined with a single space.
    pub fn full_name(&self) -> FullName {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One curated name correction, scoped to a single player-season row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// First name as it appears in the scraped data.
    pub uncorrected_first_name: String,
    /// Last name as it appears in the scraped data.
    pub uncorrected_last_name: String,
    /// Team code of the row being corrected.
    pub uncorrected_team: TeamCode,
    /// Season of the row being corrected.
    pub uncorrected_season: Season,
    /// Canonical first name to substitute.
    pub corrected_first_name: String,
    /// Canonical last name to substitute.
    pub corrected_last_name: String,
}

impl Correction {
    /// Key of the row this correction targets.
    pub fn uncorrected_key(&self) -> RowKey {
        RowKey {
            first_name: self.uncorrected_first_name.clone(),
            last_name: self.uncorrected_last_name.clone(),
            team: self.uncorrected_team.clone(),
            season: self.uncorrected_season,
        }
    }
}

/// One curated flag marking a player-season as belonging to a different
/// physical person than others sharing the same full name.
///
/// `group_rank` is assigned by the reviewer, scoped per (first, last) name:
/// rank 0 is the person who keeps the conflict-resolved identifier, rank 1
/// gets the next suffix, and so on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMarker {
    /// First name shared by the colliding people.
    pub first_name: String,
    /// Last name shared by the colliding people.
    pub last_name: String,
    /// Team code of the marked player-season.
    pub team: TeamCode,
    /// Season of the marked player-season.
    pub season: Season,
    /// Human-assigned rank within the same-named group.
    pub group_rank: u32,
}

impl DuplicateMarker {
    /// Key of the row this marker targets.
    pub fn key(&self) -> RowKey {
        RowKey {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            team: self.team.clone(),
            season: self.season,
        }
    }

    /// First and last name joined with a single space.
    pub fn full_name(&self) -> FullName {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One formal-name/nickname equivalence used by the advisory scanner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknamePair {
    /// Formal given name, e.g. `Michael`.
    pub formal_name: String,
    /// Registered nickname, e.g. `Mike`.
    pub nickname: String,
}

/// One fully resolved player-season row, ready for the sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// Post-correction first name.
    pub first_name: String,
    /// Post-correction last name.
    pub last_name: String,
    /// Short team code.
    pub team: TeamCode,
    /// Four-digit season year.
    pub season: Season,
    /// Final full identifier (base + suffix).
    pub player_id: PlayerId,
    /// Passthrough statistic columns.
    #[serde(default)]
    pub stats: IndexMap<StatColumn, StatValue>,
}

impl ResolvedRecord {
    /// The row's natural key.
    pub fn key(&self) -> RowKey {
        RowKey {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            team: self.team.clone(),
            season: self.season,
        }
    }

    /// First and last name joined with a single space.
    pub fn full_name(&self) -> FullName {
        format!("{} {}", self.first_name, self.last_name)
    }
}
