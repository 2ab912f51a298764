use std::fs;
use std::path::PathBuf;

use lineups_dataset::match_extract::{
    ExtractError, GoalKind, MatchRecord, extract_match_record,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn extract_fixture() -> MatchRecord {
    let html = read_fixture("match_page.html");
    extract_match_record(&html).expect("fixture should extract")
}

/// A minimal page carrying only the title heading, with a configurable text
/// node between the two team links.
fn title_only_page(score_text: &str) -> String {
    format!(
        r#"<html><head><meta name="description" content="derby 2024-02-10"></head><body>
        <h1 id="page-title nowrap"><a href="/team/Alpha/2024/">Alpha</a>{score_text}<a href="/team/Beta/2024/">Beta</a></h1>
        </body></html>"#
    )
}

#[test]
fn team_names_come_from_lineup_headings() {
    let record = extract_fixture();
    assert_eq!(record.home_team, "West Ham United");
    assert_eq!(record.away_team, "Chelsea FC");
    assert_eq!(record.home_lineup.team, "West Ham United");
    assert_eq!(record.away_lineup.team, "Chelsea FC");
}

#[test]
fn every_goal_belongs_to_one_of_the_two_teams() {
    let record = extract_fixture();
    assert!(!record.goals.is_empty());
    for goal in &record.goals {
        assert!(
            goal.team == record.home_team || goal.team == record.away_team,
            "goal attributed to unknown team {}",
            goal.team
        );
    }
}

#[test]
fn goal_rows_are_classified_and_filtered() {
    let record = extract_fixture();
    // Card row and the attribution-less disallowed-goal row are dropped.
    assert_eq!(record.goals.len(), 3);

    let head = &record.goals[0];
    assert_eq!(head.time, "23'");
    assert_eq!(head.kind, GoalKind::Head);
    assert_eq!(head.team, "West Ham United");
    assert_eq!(head.scorer.as_deref(), Some("J. Bowen"));
    assert_eq!(head.scorer_id.as_deref(), Some("1001"));
    assert_eq!(head.assisted_by.as_deref(), Some("L. Paqueta"));
    assert_eq!(head.assisted_by_id.as_deref(), Some("1002"));

    let penalty = &record.goals[1];
    assert_eq!(penalty.kind, GoalKind::Penalty);
    assert_eq!(penalty.team, "Chelsea FC");
    assert_eq!(penalty.scorer_id.as_deref(), Some("2001"));
    assert!(penalty.assisted_by.is_none());

    let own_goal = &record.goals[2];
    assert_eq!(own_goal.kind, GoalKind::Goal);
    assert_eq!(own_goal.team, "West Ham United");
    assert_eq!(own_goal.scorer.as_deref(), Some("T. Silva"));
}

#[test]
fn score_datetime_and_referee_are_parsed() {
    let record = extract_fixture();
    assert_eq!(record.home_score.as_deref(), Some("2"));
    assert_eq!(record.away_score.as_deref(), Some("1"));
    assert_eq!(record.match_datetime.as_deref(), Some("2023-10-01 16:30"));
    assert_eq!(record.referee.as_deref(), Some("M. Oliver"));
    assert_eq!(record.referee_id.as_deref(), Some("456"));
}

#[test]
fn starters_carry_sub_off_minutes() {
    let record = extract_fixture();
    let starters = &record.home_lineup.starters;
    assert_eq!(starters.len(), 3);
    assert_eq!(starters[0].number, "13");
    assert_eq!(starters[0].id.as_deref(), Some("1010"));
    assert!(starters[0].sub_off_at.is_none());
    // "64 '" in the cell normalizes to "64'".
    assert_eq!(starters[2].sub_off_at.as_deref(), Some("64'"));
}

#[test]
fn bench_players_who_never_entered_are_excluded() {
    let record = extract_fixture();
    let subs = &record.home_lineup.substitutes_played;
    let names: Vec<&str> = subs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["D. Ings", "M. Cornet"]);
    assert_eq!(subs[0].sub_on_at, "73'");
    assert_eq!(subs[1].sub_on_at, "90+2'");
}

#[test]
fn starter_without_profile_link_keeps_cell_text() {
    let record = extract_fixture();
    let gallagher = &record.away_lineup.starters[3];
    assert_eq!(gallagher.name, "C. Gallagher");
    assert!(gallagher.id.is_none());
}

#[test]
fn coach_names_are_read_past_the_colon() {
    let record = extract_fixture();
    assert_eq!(record.home_lineup.coach.as_deref(), Some("D. Moyes"));
    assert_eq!(record.away_lineup.coach.as_deref(), Some("M. Pochettino"));
    assert!(record.home_lineup.coach_id.is_none());
}

#[test]
fn record_round_trips_through_json() {
    let record = extract_fixture();
    let json = serde_json::to_string_pretty(&record).expect("serialize");
    let reloaded: MatchRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(record, reloaded);
}

#[test]
fn unparseable_score_text_yields_no_scores() {
    let record = extract_match_record(&title_only_page(" abandoned ")).expect("should extract");
    assert!(record.home_score.is_none());
    assert!(record.away_score.is_none());
}

#[test]
fn plain_score_pair_is_split_on_the_colon() {
    let record = extract_match_record(&title_only_page(" 2 : 1 ")).expect("should extract");
    assert_eq!(record.home_score.as_deref(), Some("2"));
    assert_eq!(record.away_score.as_deref(), Some("1"));
}

#[test]
fn datetime_is_all_or_nothing() {
    // Date present in the metadata, but no matchday link to take the time
    // from: the combined field stays absent.
    let record = extract_match_record(&title_only_page(" 2 : 1 ")).expect("should extract");
    assert!(record.match_datetime.is_none());
}

#[test]
fn unmatched_lineup_hrefs_fall_back_to_title_names() {
    let html = r#"<html><body>
        <h1 id="page-title nowrap"><a href="/team/Alpha/2024/">Alpha</a> 0 : 0 <a href="/team/Beta/2024/">Beta</a></h1>
        <h1 id="page-title"><a href="/team/Gamma/">Gamma Town</a></h1>
        <section id="team-lineup-1"><table><tbody>
        <tr><td>1</td><td><a href="/footballer/1/">A Keeper</a></td><td></td></tr>
        </tbody></table></section>
        </body></html>"#;
    let record = extract_match_record(html).expect("should extract");
    assert_eq!(record.home_team, "Alpha");
    assert_eq!(record.away_team, "Beta");
    assert!(record.home_lineup.starters.is_empty());
    assert!(record.away_lineup.starters.is_empty());
}

#[test]
fn missing_title_heading_is_fatal() {
    let html = "<html><body><h1>Some other page</h1></body></html>";
    assert_eq!(extract_match_record(html), Err(ExtractError::MissingTitle));
}

#[test]
fn single_team_link_is_fatal() {
    let html = r#"<html><body>
        <h1 id="page-title nowrap"><a href="/team/Alpha/2024/">Alpha</a> walkover</h1>
        </body></html>"#;
    assert_eq!(
        extract_match_record(html),
        Err(ExtractError::MissingTeamLinks)
    );
}

#[test]
fn content_gaps_still_produce_a_record() {
    // No score node, no metadata, no events table, no lineups: everything
    // degrades to absent, nothing fails.
    let html = r#"<html><body>
        <h1 id="page-title nowrap"><a href="/team/Alpha/2024/">Alpha</a><a href="/team/Beta/2024/">Beta</a></h1>
        </body></html>"#;
    let record = extract_match_record(html).expect("should extract");
    assert!(record.home_score.is_none());
    assert!(record.match_datetime.is_none());
    assert!(record.referee.is_none());
    assert!(record.goals.is_empty());
    assert!(record.home_lineup.starters.is_empty());
}
