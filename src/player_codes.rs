use std::collections::BTreeSet;

use log::warn;

use crate::match_extract::{MatchRecord, TeamLineup};

/// The universe of distinct player codes referenced by a set of match
/// records: every starter and every substitute who played, both sides.
/// Numerically sorted and deduplicated, so re-runs over the same corpus
/// produce an identical list.
pub fn collect_player_codes<'a>(records: impl IntoIterator<Item = &'a MatchRecord>) -> Vec<String> {
    let mut codes = BTreeSet::new();
    for record in records {
        collect_lineup_codes(&record.home_lineup, &mut codes);
        collect_lineup_codes(&record.away_lineup, &mut codes);
    }
    codes.into_iter().map(|code| code.to_string()).collect()
}

fn collect_lineup_codes(lineup: &TeamLineup, codes: &mut BTreeSet<u64>) {
    let ids = lineup
        .starters
        .iter()
        .filter_map(|p| p.id.as_deref())
        .chain(
            lineup
                .substitutes_played
                .iter()
                .filter_map(|p| p.id.as_deref()),
        );
    for id in ids {
        match id.parse::<u64>() {
            Ok(code) => {
                codes.insert(code);
            }
            Err(_) => warn!("discarding non-numeric player id '{id}'"),
        }
    }
}
