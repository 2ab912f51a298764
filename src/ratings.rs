use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use csv::{Reader, Writer};
use log::{debug, info};

use crate::countries::normalize_nationality;
use crate::player_extract::PlayerRecord;

/// Columns the ratings CSV must provide, with the spellings the two known
/// dataset families use (the FIFA dump and Football Manager exports).
/// Everything else is passed through untouched into the join output.
const RATING_NAME_COLUMNS: &[&str] = &["long_name", "Name"];
const RATING_DOB_COLUMNS: &[&str] = &["dob", "DoB"];
const RATING_NATIONALITY_COLUMNS: &[&str] = &["nationality_name", "Nat"];
const RATING_WAGE_COLUMNS: &[&str] = &["wage_eur", "Wage"];

/// Headers the scraped-player side contributes to the join output.
const PLAYER_HEADERS: &[&str] = &[
    "id",
    "short_name",
    "full_name",
    "date_of_birth",
    "height",
    "nationality",
    "play_style",
];

/// External ratings table, normalized for joining: birth dates in
/// `YYYY-MM-DD`, trigram nationalities mapped to country names.
#[derive(Debug)]
pub struct RatingsTable {
    /// Raw headers minus the dob column (which the join key replaces).
    pub headers: Vec<String>,
    pub rows: Vec<RatingRow>,
}

#[derive(Debug)]
pub struct RatingRow {
    pub long_name: String,
    pub date_of_birth: Option<String>,
    /// Aligned with [`RatingsTable::headers`].
    pub values: Vec<String>,
}

#[derive(Debug)]
pub struct JoinedPlayers {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub matched: usize,
    pub unmatched: usize,
}

/// Stage entry point: read the scraped players dataset and the ratings CSV,
/// join, write the result.
pub fn build_players_with_ratings(
    players_csv: &Path,
    ratings_csv: &Path,
    out_csv: &Path,
    cutoff: u32,
) -> Result<JoinedPlayers> {
    let players = read_players(players_csv)?;
    let ratings = load_ratings(ratings_csv)?;
    info!(
        "joining {} scraped players against {} rating rows",
        players.len(),
        ratings.rows.len()
    );
    let joined = join_players_with_ratings(&players, &ratings, cutoff);

    if let Some(dir) = out_csv.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let mut writer =
        Writer::from_path(out_csv).with_context(|| format!("open {}", out_csv.display()))?;
    writer
        .write_record(&joined.headers)
        .context("write join header")?;
    for row in &joined.rows {
        writer.write_record(row).context("write join row")?;
    }
    writer.flush().context("flush join output")?;
    Ok(joined)
}

pub fn read_players(path: &Path) -> Result<Vec<PlayerRecord>> {
    let mut reader =
        Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
    let mut players = Vec::new();
    for row in reader.deserialize() {
        let player: PlayerRecord = row.context("decode player row")?;
        players.push(player);
    }
    Ok(players)
}

pub fn load_ratings(path: &Path) -> Result<RatingsTable> {
    let mut reader =
        Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
    let raw_headers: Vec<String> = reader
        .headers()
        .context("read ratings header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let name_idx = column_index(&raw_headers, RATING_NAME_COLUMNS, path)?;
    let dob_idx = column_index(&raw_headers, RATING_DOB_COLUMNS, path)?;
    let nationality_idx = find_column(&raw_headers, RATING_NATIONALITY_COLUMNS);
    let wage_idx = find_column(&raw_headers, RATING_WAGE_COLUMNS);

    let headers: Vec<String> = raw_headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != dob_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("read ratings row")?;
        let mut values: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
        values.resize(raw_headers.len(), String::new());
        if let Some(idx) = nationality_idx {
            values[idx] = normalize_nationality(&values[idx]);
        }
        if let Some(idx) = wage_idx {
            if let Some(wage) = parse_weekly_wage(&values[idx]) {
                values[idx] = wage.to_string();
            }
        }
        let long_name = values[name_idx].clone();
        let date_of_birth = parse_birth_date(&values[dob_idx]);
        values.remove(dob_idx);
        rows.push(RatingRow {
            long_name,
            date_of_birth,
            values,
        });
    }
    Ok(RatingsTable { headers, rows })
}

/// Left-join ratings onto scraped players by birth date, scoring each
/// candidate by fuzzy name similarity and keeping the best one — but only
/// when it clears the cutoff. A score exactly at the cutoff is retained.
pub fn join_players_with_ratings(
    players: &[PlayerRecord],
    ratings: &RatingsTable,
    cutoff: u32,
) -> JoinedPlayers {
    let mut by_dob: HashMap<&str, Vec<&RatingRow>> = HashMap::new();
    for row in &ratings.rows {
        if let Some(dob) = row.date_of_birth.as_deref() {
            by_dob.entry(dob).or_default().push(row);
        }
    }

    let mut headers: Vec<String> = PLAYER_HEADERS.iter().map(|h| h.to_string()).collect();
    for header in &ratings.headers {
        if PLAYER_HEADERS.contains(&header.as_str()) {
            headers.push(format!("{header}_rating"));
        } else {
            headers.push(header.clone());
        }
    }
    headers.push("fuzz_score".to_string());

    let mut rows = Vec::new();
    let mut matched = 0usize;
    let mut unmatched = 0usize;
    for player in players {
        let dob = player.date_of_birth.as_deref().and_then(parse_birth_date);
        let best = dob
            .as_deref()
            .and_then(|key| by_dob.get(key))
            .and_then(|candidates| {
                candidates
                    .iter()
                    .map(|row| (name_similarity(player, &row.long_name), *row))
                    .max_by_key(|(score, _)| *score)
            });
        match best {
            Some((score, row)) if score >= cutoff => {
                let mut out = player_columns(player, dob.as_deref());
                out.extend(row.values.iter().cloned());
                out.push(score.to_string());
                rows.push(out);
                matched += 1;
            }
            _ => {
                debug!(
                    "no rating match for player {} ({:?})",
                    player.id, player.full_name
                );
                unmatched += 1;
            }
        }
    }

    JoinedPlayers {
        headers,
        rows,
        matched,
        unmatched,
    }
}

fn player_columns(player: &PlayerRecord, dob: Option<&str>) -> Vec<String> {
    vec![
        player.id.clone(),
        player.short_name.clone().unwrap_or_default(),
        player.full_name.clone().unwrap_or_default(),
        dob.unwrap_or_default().to_string(),
        player.height.clone().unwrap_or_default(),
        player.nationality.clone().unwrap_or_default(),
        player.play_style.clone().unwrap_or_default(),
    ]
}

/// The best of comparing the rating row's name against the player's full
/// name and short name, mirroring how the source names diverge (the scraped
/// full name is legal, the rating name usually the common one).
pub fn name_similarity(player: &PlayerRecord, rating_name: &str) -> u32 {
    let full = player
        .full_name
        .as_deref()
        .map(|name| fuzz_score(name, rating_name))
        .unwrap_or(0);
    let short = player
        .short_name
        .as_deref()
        .map(|name| fuzz_score(name, rating_name))
        .unwrap_or(0);
    full.max(short)
}

/// 0-100 similarity over lowercased, token-sorted, alphanumeric-only forms,
/// so word order and punctuation differences don't drag the score down.
pub fn fuzz_score(a: &str, b: &str) -> u32 {
    let a = normalize_name(a);
    let b = normalize_name(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (strsim::jaro_winkler(&a, &b) * 100.0).round() as u32
}

pub fn normalize_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Birth dates arrive in several spellings: ISO from the ratings dump,
/// `12-Aug-1995` / `12-Aug-95` from the scraped pages.
pub fn parse_birth_date(raw: &str) -> Option<String> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%Y", "%d-%b-%y", "%d/%m/%Y"];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Wage cells in FM exports come as `£82,000 p/w`; strip the currency
/// dressing down to the number.
pub fn parse_weekly_wage(raw: &str) -> Option<f64> {
    let cleaned = raw
        .replace('£', "")
        .replace("Â£", "")
        .replace(',', "")
        .replace("p/w", "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Football Manager squad views export as RTF-ish tables with ` | `
/// separated cells and a decorative rule under every data line. Convert one
/// to a plain CSV next to the input, returning the CSV path.
pub fn convert_fm_rtf(path: &Path) -> Result<std::path::PathBuf> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let mut lines: Vec<Vec<String>> = Vec::new();
    for (counter, line) in text.lines().enumerate() {
        // Every second line is table formatting, not data.
        if counter % 2 != 0 {
            continue;
        }
        let cells: Vec<String> = line
            .split(" | ")
            .map(|cell| cell.replace('|', "").trim().to_string())
            .collect();
        lines.push(cells);
    }

    let out = path.with_extension("csv");
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&out)
        .with_context(|| format!("open {}", out.display()))?;
    for line in &lines {
        writer.write_record(line).context("write converted row")?;
    }
    writer.flush().context("flush converted csv")?;
    info!("converted {} -> {}", path.display(), out.display());
    Ok(out)
}

fn column_index(headers: &[String], names: &[&str], path: &Path) -> Result<usize> {
    find_column(headers, names).ok_or_else(|| {
        anyhow!(
            "ratings file {} has none of the columns {names:?}",
            path.display()
        )
    })
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h == name))
}

#[cfg(test)]
mod tests {
    use super::{fuzz_score, normalize_name, parse_birth_date};

    #[test]
    fn normalization_sorts_and_strips() {
        assert_eq!(normalize_name("Declan  Rice"), "declan rice");
        assert_eq!(normalize_name("Rice, Declan"), "declan rice");
        assert_eq!(normalize_name("O'Neil"), "neil o");
    }

    #[test]
    fn identical_names_score_full_marks() {
        assert_eq!(fuzz_score("Declan Rice", "Rice Declan"), 100);
    }

    #[test]
    fn empty_names_score_zero() {
        assert_eq!(fuzz_score("", "Declan Rice"), 0);
    }

    #[test]
    fn wage_strings_reduce_to_numbers() {
        use super::parse_weekly_wage;
        assert_eq!(parse_weekly_wage("£82,000 p/w"), Some(82000.0));
        assert_eq!(parse_weekly_wage(" 1500 "), Some(1500.0));
        assert_eq!(parse_weekly_wage("N/A"), None);
    }

    #[test]
    fn birth_date_spellings() {
        assert_eq!(parse_birth_date("1999-01-14"), Some("1999-01-14".into()));
        assert_eq!(parse_birth_date("14-Jan-1999"), Some("1999-01-14".into()));
        assert_eq!(parse_birth_date("14-Jan-99"), Some("1999-01-14".into()));
        assert_eq!(parse_birth_date("not a date"), None);
    }
}
