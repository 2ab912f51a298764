use std::fs;
use std::path::PathBuf;

use lineups_dataset::player_extract::{PlayerRecord, extract_player_record};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn full_profile_is_extracted() {
    let html = read_fixture("player_page.html");
    let record = extract_player_record(&html, "1002");
    assert_eq!(record.id, "1002");
    assert_eq!(record.short_name.as_deref(), Some("L. Paqueta"));
    assert_eq!(
        record.full_name.as_deref(),
        Some("Lucas Tolentino Coelho de Lima")
    );
    // Age in parentheses is stripped from the birth-date cell.
    assert_eq!(record.date_of_birth.as_deref(), Some("27-Aug-1997"));
    assert_eq!(record.height.as_deref(), Some("1.80 m"));
    assert_eq!(record.nationality.as_deref(), Some("Brazil"));
    assert_eq!(record.play_style.as_deref(), Some("Attacking Midfielder"));
}

#[test]
fn empty_page_degrades_to_absent_fields() {
    let record = extract_player_record("<html><body></body></html>", "77");
    assert_eq!(record.id, "77");
    assert!(record.short_name.is_none());
    assert!(record.full_name.is_none());
    assert!(record.date_of_birth.is_none());
    assert!(record.height.is_none());
    assert!(record.nationality.is_none());
    assert!(record.play_style.is_none());
}

#[test]
fn record_round_trips_through_json() {
    let html = read_fixture("player_page.html");
    let record = extract_player_record(&html, "1002");
    let json = serde_json::to_string_pretty(&record).expect("serialize");
    let reloaded: PlayerRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(record, reloaded);
}
