use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};
use log::{info, warn};

use crate::config::{self, DataDirs};
use crate::http_client::http_client;

/// In-memory CSV table; rows are positionally aligned with `headers`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct OddsSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: Vec<String>,
    pub combined_rows: usize,
    pub combined_columns: usize,
}

/// Bulk-download the historical odds CSVs for the configured league × season
/// grid. Files already on disk are not fetched again; a failed season is
/// logged and skipped.
pub fn download_odds(dirs: &DataDirs) -> Result<OddsSummary> {
    let client = http_client()?;
    let mut summary = OddsSummary::default();
    fs::create_dir_all(dirs.odds())
        .with_context(|| format!("create dir {}", dirs.odds().display()))?;

    for (league, division) in config::ODDS_LEAGUE_CODES {
        for season in config::ODDS_SEASONS {
            let dest = dirs.odds_season_file(league, season);
            if dest.exists() {
                summary.skipped += 1;
                continue;
            }
            let url = config::odds_csv_url(season, division);
            let label = format!("{league} {season}");
            let response = match client.get(&url).send() {
                Ok(response) => response,
                Err(err) => {
                    warn!("{label}: request failed: {err}");
                    summary.failed.push(label);
                    continue;
                }
            };
            if !response.status().is_success() {
                warn!("{label}: http status {}", response.status());
                summary.failed.push(label);
                continue;
            }
            let body = match response.text() {
                Ok(body) => body,
                Err(err) => {
                    warn!("{label}: failed reading body: {err}");
                    summary.failed.push(label);
                    continue;
                }
            };
            if let Err(err) = fs::write(&dest, &body) {
                warn!("{label}: write {}: {err}", dest.display());
                summary.failed.push(label);
                continue;
            }
            info!("{label}: saved to {}", dest.display());
            summary.downloaded += 1;
        }
    }
    Ok(summary)
}

/// Concatenate every downloaded season file into one table. Column sets
/// drift across seasons, so the combined header is the union of all headers
/// and missing columns are left blank.
pub fn combine_odds(dirs: &DataDirs) -> Result<Table> {
    let mut tables = Vec::new();
    for (league, _division) in config::ODDS_LEAGUE_CODES {
        for season in config::ODDS_SEASONS {
            let path = dirs.odds_season_file(league, season);
            if !path.exists() {
                warn!("{league} {season}: no downloaded file, skipping");
                continue;
            }
            match read_csv_lossy(&path) {
                Ok(table) => tables.push(table),
                Err(err) => warn!("{league} {season}: {err:#}"),
            }
        }
    }
    let combined = union_concat(&tables);

    let out = dirs.odds_combined_file();
    if let Some(dir) = out.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let mut writer = Writer::from_path(&out).with_context(|| format!("open {}", out.display()))?;
    writer
        .write_record(&combined.headers)
        .context("write odds header")?;
    for row in &combined.rows {
        writer.write_record(row).context("write odds row")?;
    }
    writer.flush().context("flush combined odds")?;
    info!(
        "combined odds table: {} rows x {} columns -> {}",
        combined.rows.len(),
        combined.headers.len(),
        out.display()
    );
    Ok(combined)
}

/// The older season files are not valid UTF-8 (club names in a Windows
/// code page); decode lossily rather than failing the whole concat.
fn read_csv_lossy(path: &Path) -> Result<Table> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    parse_csv_str(&text).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_csv_str(text: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("read csv header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("read csv row")?;
        let mut row: Vec<String> = record.iter().map(|v| v.to_string()).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    Ok(Table { headers, rows })
}

/// Stack tables on the union of their headers, in first-seen order.
pub fn union_concat(tables: &[Table]) -> Table {
    let mut headers: Vec<String> = Vec::new();
    for table in tables {
        for header in &table.headers {
            if !headers.contains(header) {
                headers.push(header.clone());
            }
        }
    }

    let mut rows = Vec::new();
    for table in tables {
        let positions: Vec<usize> = table
            .headers
            .iter()
            .map(|h| headers.iter().position(|u| u == h).expect("unioned header"))
            .collect();
        for row in &table.rows {
            let mut out = vec![String::new(); headers.len()];
            for (value, position) in row.iter().zip(&positions) {
                out[*position] = value.clone();
            }
            rows.push(out);
        }
    }
    Table { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::{Table, parse_csv_str, union_concat};

    #[test]
    fn union_keeps_first_seen_header_order_and_pads() {
        let a = Table {
            headers: vec!["Div".into(), "Date".into(), "B365H".into()],
            rows: vec![vec!["E0".into(), "01/08/20".into(), "1.5".into()]],
        };
        let b = Table {
            headers: vec!["Div".into(), "Date".into(), "PSH".into()],
            rows: vec![vec!["SP1".into(), "02/08/20".into(), "2.1".into()]],
        };
        let combined = union_concat(&[a, b]);
        assert_eq!(combined.headers, vec!["Div", "Date", "B365H", "PSH"]);
        assert_eq!(combined.rows.len(), 2);
        assert_eq!(combined.rows[0], vec!["E0", "01/08/20", "1.5", ""]);
        assert_eq!(combined.rows[1], vec!["SP1", "02/08/20", "", "2.1"]);
    }

    #[test]
    fn ragged_rows_are_padded_to_the_header() {
        let table = parse_csv_str("Div,Date,FTHG\nE0,01/08/20\n").unwrap();
        assert_eq!(table.rows[0], vec!["E0", "01/08/20", ""]);
    }
}
