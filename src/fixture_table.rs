use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::config::STARTERS_PER_SIDE;
use crate::match_extract::{MatchRecord, TeamLineup};

/// Reshape match records into one flat row each: match fields, fixed-width
/// starter-id columns per side, and a derived outcome label.
pub fn write_fixture_table(records: &[(String, MatchRecord)], path: &Path) -> Result<usize> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let mut writer =
        Writer::from_path(path).with_context(|| format!("open {}", path.display()))?;
    writer
        .write_record(fixture_headers())
        .context("write fixture header")?;
    for (code, record) in records {
        writer
            .write_record(fixture_row(code, record))
            .context("write fixture row")?;
    }
    writer.flush().context("flush fixture table")?;
    Ok(records.len())
}

pub fn fixture_headers() -> Vec<String> {
    let mut headers = vec![
        "match_code".to_string(),
        "home_team".to_string(),
        "away_team".to_string(),
        "home_score".to_string(),
        "away_score".to_string(),
        "match_datetime".to_string(),
        "referee".to_string(),
        "referee_id".to_string(),
    ];
    for i in 1..=STARTERS_PER_SIDE {
        headers.push(format!("home_starter_{i}"));
    }
    for i in 1..=STARTERS_PER_SIDE {
        headers.push(format!("away_starter_{i}"));
    }
    headers.push("home_win".to_string());
    headers.push("draw".to_string());
    headers.push("away_win".to_string());
    headers
}

pub fn fixture_row(code: &str, record: &MatchRecord) -> Vec<String> {
    let mut row = vec![
        code.to_string(),
        record.home_team.clone(),
        record.away_team.clone(),
        record.home_score.clone().unwrap_or_default(),
        record.away_score.clone().unwrap_or_default(),
        record.match_datetime.clone().unwrap_or_default(),
        record.referee.clone().unwrap_or_default(),
        record.referee_id.clone().unwrap_or_default(),
    ];
    row.extend(starter_id_columns(&record.home_lineup));
    row.extend(starter_id_columns(&record.away_lineup));
    let (home_win, draw, away_win) = outcome_labels(
        record.home_score.as_deref(),
        record.away_score.as_deref(),
    );
    row.push(home_win.to_string());
    row.push(draw.to_string());
    row.push(away_win.to_string());
    row
}

/// Starter ids in lineup order, blank-padded (or truncated) to the fixed
/// column width. A starter without a profile link yields a blank cell.
pub fn starter_id_columns(lineup: &TeamLineup) -> Vec<String> {
    let mut columns: Vec<String> = lineup
        .starters
        .iter()
        .take(STARTERS_PER_SIDE)
        .map(|starter| starter.id.clone().unwrap_or_default())
        .collect();
    columns.resize(STARTERS_PER_SIDE, String::new());
    columns
}

/// One-hot outcome from numeric score comparison. Scores are scraped as raw
/// strings; anything non-numeric (including an abandoned match's missing
/// score) yields all-zero labels.
pub fn outcome_labels(home_score: Option<&str>, away_score: Option<&str>) -> (u8, u8, u8) {
    let parsed = |score: Option<&str>| score.and_then(|s| s.trim().parse::<i64>().ok());
    match (parsed(home_score), parsed(away_score)) {
        (Some(home), Some(away)) => {
            if home > away {
                (1, 0, 0)
            } else if home == away {
                (0, 1, 0)
            } else {
                (0, 0, 1)
            }
        }
        _ => (0, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::outcome_labels;

    #[test]
    fn labels_from_scores() {
        assert_eq!(outcome_labels(Some("2"), Some("1")), (1, 0, 0));
        assert_eq!(outcome_labels(Some("1"), Some("1")), (0, 1, 0));
        assert_eq!(outcome_labels(Some("0"), Some("3")), (0, 0, 1));
    }

    #[test]
    fn missing_or_bad_scores_are_unlabelled() {
        assert_eq!(outcome_labels(None, Some("1")), (0, 0, 0));
        assert_eq!(outcome_labels(Some("abandoned"), Some("1")), (0, 0, 0));
    }

    #[test]
    fn double_digit_scores_compare_numerically() {
        assert_eq!(outcome_labels(Some("10"), Some("2")), (1, 0, 0));
    }
}
