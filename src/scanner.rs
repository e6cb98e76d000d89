//! Advisory similarity analyses feeding the human review loop.
//!
//! Nothing here touches identifiers. Each analysis produces candidate rows
//! for a reviewer, who records decisions in the correction and
//! duplicate-marker tables consumed by the *next* run. Empty output is a
//! valid result, not a failure.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strsim::levenshtein;
use tracing::info;

use crate::data::{NameRecord, NicknamePair, RowKey};
use crate::types::FullName;

/// A pair of rows whose names sit within the configured edit distances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypoCandidate {
    /// Row with the lexicographically earlier last name.
    pub left: RowKey,
    /// Row with the later last name.
    pub right: RowKey,
    /// Levenshtein distance between the two last names.
    pub last_name_distance: usize,
    /// Levenshtein distance between the two first names.
    pub first_name_distance: usize,
}

/// A pair of rows sharing a last name whose first names form a
/// formal-name/nickname pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknameCandidate {
    /// Row carrying the formal first name.
    pub formal: RowKey,
    /// Row carrying the registered nickname.
    pub nickname: RowKey,
}

/// One occurrence of a full name that appears under multiple teams.
///
/// The reviewer decides whether these rows are one transferring player or
/// different people needing duplicate markers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCandidate {
    /// The surfaced player-season row.
    pub key: RowKey,
    /// Number of distinct teams this full name appears under.
    pub teams: usize,
}

/// Bundle of all advisory candidate tables from one scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutput {
    /// Typo candidates from the edit-distance analysis.
    pub typos: Vec<TypoCandidate>,
    /// Nickname candidates from the lookup-table analysis.
    pub nicknames: Vec<NicknameCandidate>,
    /// Transfer/collision candidates from the multi-team analysis.
    pub transfers: Vec<TransferCandidate>,
}

/// Pairs of rows whose last names are within `last_threshold` edits and
/// whose first names are within `first_threshold` edits.
///
/// The cartesian pass over distinct last names dominates the cost and runs
/// data-parallel; output order is deterministic (sorted last-name pairs,
/// then input row order within each pair).
pub fn typo_candidates(
    rows: &[NameRecord],
    last_threshold: usize,
    first_threshold: usize,
) -> Vec<TypoCandidate> {
    let mut last_names: Vec<&str> = rows.iter().map(|row| row.last_name.as_str()).collect();
    last_names.sort_unstable();
    last_names.dedup();

    let close_pairs: Vec<(&str, &str, usize)> = last_names
        .par_iter()
        .enumerate()
        .flat_map_iter(|(idx, left)| {
            last_names[idx + 1..].iter().filter_map(move |right| {
                let distance = levenshtein(left, right);
                (distance <= last_threshold).then_some((*left, *right, distance))
            })
        })
        .collect();

    let mut rows_by_last: BTreeMap<&str, Vec<&NameRecord>> = BTreeMap::new();
    for row in rows {
        rows_by_last.entry(row.last_name.as_str()).or_default().push(row);
    }

    let mut candidates = Vec::new();
    for (last_left, last_right, last_name_distance) in close_pairs {
        let (lefts, rights) = match (rows_by_last.get(last_left), rows_by_last.get(last_right)) {
            (Some(lefts), Some(rights)) => (lefts, rights),
            _ => continue,
        };
        for left in lefts {
            for right in rights {
                let first_name_distance = levenshtein(&left.first_name, &right.first_name);
                if first_name_distance <= first_threshold {
                    candidates.push(TypoCandidate {
                        left: left.key(),
                        right: right.key(),
                        last_name_distance,
                        first_name_distance,
                    });
                }
            }
        }
    }
    info!(candidates = candidates.len(), "typo scan complete");
    candidates
}

/// Pairs of rows sharing a last name where one first name is the formal
/// form and the other a registered nickname of it.
pub fn nickname_candidates(
    rows: &[NameRecord],
    nicknames: &[NicknamePair],
) -> Vec<NicknameCandidate> {
    let mut rows_by_last: BTreeMap<&str, Vec<&NameRecord>> = BTreeMap::new();
    for row in rows {
        rows_by_last.entry(row.last_name.as_str()).or_default().push(row);
    }

    let mut candidates = Vec::new();
    for sharing in rows_by_last.values() {
        for pair in nicknames {
            for formal_row in sharing.iter().filter(|row| row.first_name == pair.formal_name) {
                for nick_row in sharing.iter().filter(|row| row.first_name == pair.nickname) {
                    candidates.push(NicknameCandidate {
                        formal: formal_row.key(),
                        nickname: nick_row.key(),
                    });
                }
            }
        }
    }
    info!(candidates = candidates.len(), "nickname scan complete");
    candidates
}

/// Full names seen under more than one team, surfaced once per
/// (name, team, season) in input order.
pub fn transfer_candidates(rows: &[NameRecord]) -> Vec<TransferCandidate> {
    let mut teams_by_name: BTreeMap<FullName, BTreeSet<&str>> = BTreeMap::new();
    for row in rows {
        teams_by_name
            .entry(row.full_name())
            .or_default()
            .insert(row.team.as_str());
    }

    let mut seen: HashSet<RowKey> = HashSet::new();
    let mut candidates = Vec::new();
    for row in rows {
        let teams = teams_by_name
            .get(&row.full_name())
            .map(BTreeSet::len)
            .unwrap_or(0);
        if teams > 1 && seen.insert(row.key()) {
            candidates.push(TransferCandidate {
                key: row.key(),
                teams,
            });
        }
    }
    info!(candidates = candidates.len(), "transfer scan complete");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn row(first: &str, last: &str, team: &str, season: u16) -> NameRecord {
        NameRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            team: team.to_string(),
            season,
            stats: IndexMap::new(),
        }
    }

    #[test]
    fn typo_scan_pairs_near_miss_spellings() {
        let rows = vec![
            row("Jeffrey", "Mayes", "CUC", 2011),
            row("Jeffrey", "Mayse", "CUC", 2012),
            row("Curtis", "Engelbrecht", "AUR", 2012),
        ];
        let candidates = typo_candidates(&rows, 2, 1);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].last_name_distance, 2);
        assert_eq!(candidates[0].first_name_distance, 0);
        assert_eq!(candidates[0].left.last_name, "Mayes");
        assert_eq!(candidates[0].right.last_name, "Mayse");
    }

    #[test]
    fn typo_scan_respects_first_name_threshold() {
        let rows = vec![
            row("Jeffrey", "Mayes", "CUC", 2011),
            row("Bartholomew", "Mayse", "CUC", 2012),
        ];
        assert!(typo_candidates(&rows, 2, 1).is_empty());
    }

    #[test]
    fn typo_scan_on_distant_names_is_empty() {
        let rows = vec![
            row("Jeffrey", "Mayes", "CUC", 2011),
            row("Curtis", "Engelbrecht", "AUR", 2012),
        ];
        assert!(typo_candidates(&rows, 2, 2).is_empty());
    }

    #[test]
    fn nickname_scan_requires_shared_last_name() {
        let rows = vec![
            row("Michael", "Torres", "AUR", 2011),
            row("Mike", "Torres", "AUR", 2012),
            row("Mike", "Dillon", "CUC", 2012),
        ];
        let table = vec![NicknamePair {
            formal_name: "Michael".to_string(),
            nickname: "Mike".to_string(),
        }];
        let candidates = nickname_candidates(&rows, &table);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].formal.first_name, "Michael");
        assert_eq!(candidates[0].nickname.first_name, "Mike");
        assert_eq!(candidates[0].nickname.last_name, "Torres");
    }

    #[test]
    fn transfer_scan_surfaces_multi_team_names_once_per_row() {
        let rows = vec![
            row("Jordan", "Lee", "AUR", 2012),
            row("Jordan", "Lee", "AUR", 2012), // duplicate scrape row
            row("Jordan", "Lee", "BRD", 2013),
            row("Curtis", "Engelbrecht", "AUR", 2012),
        ];
        let candidates = transfer_candidates(&rows);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|candidate| candidate.teams == 2));
        assert_eq!(candidates[0].key.team, "AUR");
        assert_eq!(candidates[1].key.team, "BRD");
    }

    #[test]
    fn empty_input_yields_empty_candidate_tables() {
        assert!(typo_candidates(&[], 2, 2).is_empty());
        assert!(nickname_candidates(&[], &[]).is_empty());
        assert!(transfer_candidates(&[]).is_empty());
    }
}
