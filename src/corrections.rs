//! Manual name-correction overlay.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::constants::messages::NO_CORRECTIONS_MSG;
use crate::data::{Correction, NameRecord, RowKey};

/// Overlay curated first/last-name corrections onto normalized rows.
///
/// Matching is exact on (first, last, team, season). Matched rows get the
/// corrected name pair; every other row passes through untouched, and row
/// order and stat columns are preserved. When the same uncorrected key
/// appears more than once in `corrections` the last row wins (left-join
/// semantics); [`ambiguous`] exists so authoring can catch that earlier.
///
/// Returns the number of rows renamed. Zero is a logged no-op, not an error.
pub fn apply(rows: &mut [NameRecord], corrections: &[Correction]) -> usize {
    let mut lookup: HashMap<RowKey, &Correction> = HashMap::new();
    for correction in corrections {
        lookup.insert(correction.uncorrected_key(), correction);
    }

    let mut applied = 0;
    for row in rows.iter_mut() {
        if let Some(correction) = lookup.get(&row.key()) {
            debug!(
                from = %row.full_name(),
                to = %format!(
                    "{} {}",
                    correction.corrected_first_name, correction.corrected_last_name
                ),
                team = %row.team,
                season = row.season,
                "applying name correction"
            );
            row.first_name = correction.corrected_first_name.clone();
            row.last_name = correction.corrected_last_name.clone();
            applied += 1;
        }
    }

    if applied == 0 {
        info!("{}", NO_CORRECTIONS_MSG);
    } else {
        info!(applied, "applied name corrections");
    }
    applied
}

/// Uncorrected keys claimed by more than one correction row.
///
/// Intended for correction-authoring validation; at apply time duplicates
/// fall back to last-match-wins.
pub fn ambiguous(corrections: &[Correction]) -> Vec<RowKey> {
    let mut counts: HashMap<RowKey, usize> = HashMap::new();
    for correction in corrections {
        *counts.entry(correction.uncorrected_key()).or_insert(0) += 1;
    }
    let mut keys: Vec<RowKey> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, _)| key)
        .collect();
    keys.sort();
    keys
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

    fn correction(
        from: (&str, &str, &str, u16),
        to: (&str, &str),
    ) -> Correction {
        Correction {
            uncorrected_first_name: from.0.to_string(),
            uncorrected_last_name: from.1.to_string(),
            uncorrected_team: from.2.to_string(),
            uncorrected_season: from.3,
            corrected_first_name: to.0.to_string(),
            corrected_last_name: to.1.to_string(),
        }
    }

    #[test]
    fn corrections_apply_per_row_key_not_per_name() {
        let mut rows = vec![
            row("Steven", "Jaquez", "AUR", 2014),
            row("Steven", "Jaquez", "AUR", 2015),
            row("Steven", "Jaquez", "AUR", 2016),
        ];
        let overlay = vec![correction(("Steven", "Jaquez", "AUR", 2014), ("Ty", "Jaquez"))];

        let applied = apply(&mut rows, &overlay);

        assert_eq!(applied, 1);
        assert_eq!(rows[0].full_name(), "Ty Jaquez");
        assert_eq!(rows[1].full_name(), "Steven Jaquez");
        assert_eq!(rows[2].full_name(), "Steven Jaquez");
    }

    #[test]
    fn applying_twice_is_a_no_op_the_second_time() {
        let mut rows = vec![row("Steven", "Jaquez", "AUR", 2014)];
        let overlay = vec![correction(("Steven", "Jaquez", "AUR", 2014), ("Ty", "Jaquez"))];

        assert_eq!(apply(&mut rows, &overlay), 1);
        let once = rows.clone();
        assert_eq!(apply(&mut rows, &overlay), 0);
        assert_eq!(rows, once);
    }

    #[test]
    fn empty_correction_set_leaves_rows_untouched() {
        let mut rows = vec![row("Jeffrey", "Mayes", "CUC", 2011)];
        let before = rows.clone();
        assert_eq!(apply(&mut rows, &[]), 0);
        assert_eq!(rows, before);
    }

    #[test]
    fn stats_and_order_survive_correction() {
        let mut stats = IndexMap::new();
        stats.insert("hr".to_string(), "7".to_string());
        stats.insert("ab".to_string(), "102".to_string());
        let mut rows = vec![NameRecord {
            stats: stats.clone(),
            ..row("Steven", "Jaquez", "AUR", 2014)
        }];
        let overlay = vec![correction(("Steven", "Jaquez", "AUR", 2014), ("Ty", "Jaquez"))];

        apply(&mut rows, &overlay);

        assert_eq!(rows[0].stats, stats);
    }

    #[test]
    fn ambiguous_reports_multiply_claimed_keys() {
        let overlay = vec![
            correction(("Steven", "Jaquez", "AUR", 2014), ("Ty", "Jaquez")),
            correction(("Steven", "Jaquez", "AUR", 2014), ("Stephen", "Jaquez")),
            correction(("Jeffrey", "Mayes", "CUC", 2011), ("Jeff", "Mayes")),
        ];
        let keys = ambiguous(&overlay);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].season, 2014);
        assert_eq!(keys[0].last_name, "Jaquez");
    }
}
