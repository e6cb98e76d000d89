//! Base-identifier collision handling.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::data::{NameRecord, ResolvedRecord};
use crate::errors::ResolveError;
use crate::identifier::{add_n, base_id, create_id};
use crate::types::{BaseId, FullName, Season, TeamCode};

/// Earliest (season, team) observed for one full-name partition.
///
/// The minima are taken independently across the partition's rows: the
/// ordering key is (earliest season anywhere, earliest team code anywhere),
/// not the team of the earliest-season row.
#[derive(Clone, Debug)]
struct PartitionExtent {
    min_season: Season,
    min_team: TeamCode,
}

/// Assign a full identifier to every row, separating distinct full names
/// that collide on the same base identifier.
///
/// Rows are grouped by base identifier and partitioned by post-correction
/// full name. A group with one partition keeps suffix `01`. Colliding
/// partitions are ordered by earliest season, then lexicographically
/// earliest team, then full name (the final tie-break never fires on valid
/// input but keeps the order total and deterministic); the partition at rank
/// `i` receives `add_n(create_id(..), i)` on every one of its rows. One full
/// name therefore maps to exactly one identifier across all teams and
/// seasons.
pub fn assign_identifiers(rows: Vec<NameRecord>) -> Result<Vec<ResolvedRecord>, ResolveError> {
    // base -> full name -> earliest (season, team) extent
    let mut groups: BTreeMap<BaseId, BTreeMap<FullName, PartitionExtent>> = BTreeMap::new();
    for row in &rows {
        let base = base_id(&row.first_name, &row.last_name);
        groups
            .entry(base)
            .or_default()
            .entry(row.full_name())
            .and_modify(|extent| {
                extent.min_season = extent.min_season.min(row.season);
                if row.team < extent.min_team {
                    extent.min_team = row.team.clone();
                }
            })
            .or_insert_with(|| PartitionExtent {
                min_season: row.season,
                min_team: row.team.clone(),
            });
    }

    let mut rank_of: HashMap<(BaseId, FullName), u32> = HashMap::new();
    for (base, partitions) in &groups {
        if partitions.len() > 1 {
            debug!(%base, names = partitions.len(), "base identifier collision");
        }
        let mut ordered: Vec<(&FullName, &PartitionExtent)> = partitions.iter().collect();
        ordered.sort_by(|(name_a, a), (name_b, b)| {
            (a.min_season, &a.min_team, *name_a).cmp(&(b.min_season, &b.min_team, *name_b))
        });
        for (rank, (name, _)) in ordered.into_iter().enumerate() {
            rank_of.insert((base.clone(), name.clone()), rank as u32);
        }
    }

    let mut resolved = Vec::with_capacity(rows.len());
    for row in rows {
        let base = base_id(&row.first_name, &row.last_name);
        let rank = rank_of
            .get(&(base, row.full_name()))
            .copied()
            .unwrap_or(0);
        let player_id = add_n(&create_id(&row.first_name, &row.last_name), rank)?;
        resolved.push(ResolvedRecord {
            first_name: row.first_name,
            last_name: row.last_name,
            team: row.team,
            season: row.season,
            player_id,
            stats: row.stats,
        });
    }
    Ok(resolved)
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
    fn lone_names_keep_suffix_01() {
        let resolved = assign_identifiers(vec![row("Curtis", "Engelbrecht", "AUR", 2012)]).unwrap();
        assert_eq!(resolved[0].player_id, "engelcu01");
    }

    #[test]
    fn earliest_season_wins_the_collision() {
        let resolved = assign_identifiers(vec![
            row("Garrett", "Balind", "CUC", 2010),
            row("Garrett", "Balind", "CUC", 2011),
            row("Galen", "Balinski", "MARN", 2013),
        ])
        .unwrap();

        assert_eq!(resolved[0].player_id, "balinga01");
        assert_eq!(resolved[1].player_id, "balinga01");
        assert_eq!(resolved[2].player_id, "balinga02");
    }

    #[test]
    fn season_beats_alphabetical_order() {
        // Balinski sorts before Balind alphabetically; the season rule must win.
        let resolved = assign_identifiers(vec![
            row("Galen", "Balinski", "MARN", 2013),
            row("Garrett", "Balind", "CUC", 2010),
        ])
        .unwrap();

        assert_eq!(resolved[0].player_id, "balinga02");
        assert_eq!(resolved[1].player_id, "balinga01");
    }

    #[test]
    fn team_code_breaks_season_ties() {
        let resolved = assign_identifiers(vec![
            row("Marcus", "Smith", "ZZZ", 2012),
            row("Maria", "Smith", "AAA", 2012),
        ])
        .unwrap();

        // Same earliest season; AAA sorts before ZZZ.
        assert_eq!(resolved[0].player_id, "smithma02");
        assert_eq!(resolved[1].player_id, "smithma01");
    }

    #[test]
    fn transfers_keep_one_identifier() {
        let resolved = assign_identifiers(vec![
            row("Curtis", "Engelbrecht", "AUR", 2012),
            row("Curtis", "Engelbrecht", "CUC", 2013),
        ])
        .unwrap();

        assert_eq!(resolved[0].player_id, resolved[1].player_id);
    }

    #[test]
    fn minima_are_taken_independently_per_partition() {
        // Early-season row carries the later team code; the partition's key
        // must still be (2010, "AAA"), not (2010, "ZZZ").
        let resolved = assign_identifiers(vec![
            row("Marcus", "Smith", "ZZZ", 2010),
            row("Marcus", "Smith", "AAA", 2011),
            row("Maria", "Smith", "MMM", 2010),
        ])
        .unwrap();

        assert_eq!(resolved[0].player_id, "smithma01");
        assert_eq!(resolved[2].player_id, "smithma02");
    }
}
