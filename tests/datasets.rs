use lineups_dataset::config::STARTERS_PER_SIDE;
use lineups_dataset::fixture_table::{fixture_headers, fixture_row, starter_id_columns};
use lineups_dataset::match_extract::{MatchRecord, Starter, Substitute, TeamLineup};
use lineups_dataset::player_codes::collect_player_codes;
use lineups_dataset::player_extract::PlayerRecord;
use lineups_dataset::ratings::{RatingRow, RatingsTable, join_players_with_ratings};

fn starter(id: Option<&str>) -> Starter {
    Starter {
        number: "1".to_string(),
        name: "Player".to_string(),
        id: id.map(|s| s.to_string()),
        sub_off_at: None,
    }
}

fn substitute(id: &str) -> Substitute {
    Substitute {
        number: "18".to_string(),
        name: "Sub".to_string(),
        id: Some(id.to_string()),
        sub_on_at: "73'".to_string(),
    }
}

fn record_with_lineups(home: TeamLineup, away: TeamLineup) -> MatchRecord {
    MatchRecord {
        home_team: home.team.clone(),
        away_team: away.team.clone(),
        home_score: Some("2".to_string()),
        away_score: Some("1".to_string()),
        match_datetime: Some("2023-10-01 16:30".to_string()),
        referee: None,
        referee_id: None,
        goals: Vec::new(),
        home_lineup: home,
        away_lineup: away,
    }
}

fn lineup(team: &str, starter_ids: &[Option<&str>], sub_ids: &[&str]) -> TeamLineup {
    let mut lineup = TeamLineup::empty(team);
    lineup.starters = starter_ids.iter().map(|id| starter(*id)).collect();
    lineup.substitutes_played = sub_ids.iter().map(|id| substitute(id)).collect();
    lineup
}

#[test]
fn player_codes_are_numeric_sorted_and_deduplicated() {
    let record = record_with_lineups(
        lineup("Alpha", &[Some("1001"), Some("999"), None], &["1001"]),
        lineup("Beta", &[Some("2001")], &["43"]),
    );
    let codes = collect_player_codes([&record]);
    // Numeric order: lexicographic sorting would put "1001" before "999".
    assert_eq!(codes, vec!["43", "999", "1001", "2001"]);
}

#[test]
fn player_code_extraction_is_idempotent() {
    let record = record_with_lineups(
        lineup("Alpha", &[Some("5"), Some("3")], &[]),
        lineup("Beta", &[Some("4")], &["3"]),
    );
    let first = collect_player_codes([&record]);
    let second = collect_player_codes([&record]);
    assert_eq!(first, second);
    assert_eq!(first, vec!["3", "4", "5"]);
}

#[test]
fn fixture_row_pads_starter_columns_to_fixed_width() {
    let record = record_with_lineups(
        lineup("Alpha", &[Some("11"), Some("12")], &[]),
        lineup("Beta", &[], &[]),
    );
    let headers = fixture_headers();
    let row = fixture_row("446655", &record);
    assert_eq!(headers.len(), row.len());
    assert_eq!(headers.len(), 8 + 2 * STARTERS_PER_SIDE + 3);

    let home_cols = starter_id_columns(&record.home_lineup);
    assert_eq!(home_cols.len(), STARTERS_PER_SIDE);
    assert_eq!(home_cols[0], "11");
    assert_eq!(home_cols[1], "12");
    assert!(home_cols[2..].iter().all(|c| c.is_empty()));
}

#[test]
fn fixture_row_carries_outcome_labels() {
    let record = record_with_lineups(lineup("Alpha", &[], &[]), lineup("Beta", &[], &[]));
    let row = fixture_row("1", &record);
    let labels = &row[row.len() - 3..];
    assert_eq!(labels, ["1", "0", "0"]);

    let mut draw = record.clone();
    draw.away_score = Some("2".to_string());
    let row = fixture_row("1", &draw);
    assert_eq!(&row[row.len() - 3..], ["0", "1", "0"]);

    let mut unknown = record.clone();
    unknown.home_score = None;
    let row = fixture_row("1", &unknown);
    assert_eq!(&row[row.len() - 3..], ["0", "0", "0"]);
}

fn ratings_table(long_name: &str, dob: &str) -> RatingsTable {
    RatingsTable {
        headers: vec![
            "long_name".to_string(),
            "fifa_version".to_string(),
            "update_as_of".to_string(),
            "overall".to_string(),
        ],
        rows: vec![RatingRow {
            long_name: long_name.to_string(),
            date_of_birth: Some(dob.to_string()),
            values: vec![
                long_name.to_string(),
                "24".to_string(),
                "2023-09-22".to_string(),
                "84".to_string(),
            ],
        }],
    }
}

fn scraped_player(full_name: &str, dob: &str) -> PlayerRecord {
    PlayerRecord {
        id: "1001".to_string(),
        short_name: None,
        full_name: Some(full_name.to_string()),
        date_of_birth: Some(dob.to_string()),
        height: Some("1.85 m".to_string()),
        nationality: Some("England".to_string()),
        play_style: None,
    }
}

#[test]
fn rating_match_exactly_at_the_cutoff_is_retained() {
    let players = vec![scraped_player("Declan Rice", "14-Jan-1999")];
    let ratings = ratings_table("Declan Rice", "1999-01-14");
    // Identical (token-sorted) names score 100; a cutoff of 100 exercises
    // the inclusive comparison.
    let joined = join_players_with_ratings(&players, &ratings, 100);
    assert_eq!(joined.matched, 1);
    assert_eq!(joined.unmatched, 0);
    let row = &joined.rows[0];
    assert_eq!(row.last().map(String::as_str), Some("100"));
    // Birth date is normalized into the join output.
    assert_eq!(row[3], "1999-01-14");
}

#[test]
fn rating_match_below_the_cutoff_is_dropped() {
    let players = vec![scraped_player("Declan Riceworth", "14-Jan-1999")];
    let ratings = ratings_table("Declan Rice", "1999-01-14");
    let joined = join_players_with_ratings(&players, &ratings, 100);
    assert_eq!(joined.matched, 0);
    assert_eq!(joined.unmatched, 1);
}

#[test]
fn rating_join_requires_a_birth_date_match() {
    let players = vec![scraped_player("Declan Rice", "15-Jan-1999")];
    let ratings = ratings_table("Declan Rice", "1999-01-14");
    let joined = join_players_with_ratings(&players, &ratings, 0);
    assert_eq!(joined.matched, 0);
    assert_eq!(joined.unmatched, 1);
}

#[test]
fn join_output_headers_disambiguate_collisions() {
    let players = vec![scraped_player("Declan Rice", "14-Jan-1999")];
    let mut ratings = ratings_table("Declan Rice", "1999-01-14");
    ratings.headers[3] = "nationality".to_string();
    let joined = join_players_with_ratings(&players, &ratings, 0);
    assert!(joined.headers.contains(&"nationality".to_string()));
    assert!(joined.headers.contains(&"nationality_rating".to_string()));
    assert_eq!(joined.headers.last().map(String::as_str), Some("fuzz_score"));
}
