use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{Reader, Writer};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

static STARTER_COLUMN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(home|away)_starter_\d+$").expect("regex"));

const MATCH_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Version a match never reaches back to: played before the first ratings
/// release we know about, or carrying no kickoff time at all.
pub const NO_VERSION: &str = "-1";

#[derive(Debug)]
pub struct VersionMergeSummary {
    pub rows: usize,
    pub versions: usize,
    pub unversioned_rows: usize,
}

/// Stamp each fixture row with the ratings version in force at kickoff and
/// emit per-starter `{player_id}_{version}` join keys. Selecting the version
/// by release-date cutoff keeps post-match rating updates out of the
/// training data.
pub fn stamp_fixture_table(
    matches_csv: &Path,
    ratings_csv: &Path,
    out_csv: &Path,
) -> Result<VersionMergeSummary> {
    let versions = version_release_dates(ratings_csv)?;
    if versions.is_empty() {
        return Err(anyhow!(
            "no usable fifa_version/update_as_of pairs in {}",
            ratings_csv.display()
        ));
    }
    info!("ratings versions by earliest update date: {versions:?}");

    let mut reader =
        Reader::from_path(matches_csv).with_context(|| format!("open {}", matches_csv.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("read fixture header")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let datetime_idx = headers
        .iter()
        .position(|h| h == "match_datetime")
        .ok_or_else(|| anyhow!("fixture table has no match_datetime column"))?;
    let starter_cols: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| STARTER_COLUMN_RE.is_match(h))
        .map(|(idx, _)| idx)
        .collect();

    let mut out_headers = headers.clone();
    out_headers.push("fifa_version".to_string());
    for idx in &starter_cols {
        out_headers.push(format!("{}_fifa_version", headers[*idx]));
    }

    if let Some(dir) = out_csv.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let mut writer =
        Writer::from_path(out_csv).with_context(|| format!("open {}", out_csv.display()))?;
    writer
        .write_record(&out_headers)
        .context("write merged header")?;

    let mut rows = 0usize;
    let mut unversioned = 0usize;
    for record in reader.records() {
        let record = record.context("read fixture row")?;
        let mut row: Vec<String> = record.iter().map(|v| v.to_string()).collect();
        row.resize(headers.len(), String::new());

        let kickoff =
            NaiveDateTime::parse_from_str(row[datetime_idx].trim(), MATCH_DATETIME_FORMAT).ok();
        let version = pick_version(&versions, kickoff);
        if version == NO_VERSION {
            unversioned += 1;
        }
        let mut out_row = row.clone();
        out_row.push(version.clone());
        for idx in &starter_cols {
            let id = row[*idx].trim();
            if id.is_empty() {
                out_row.push(String::new());
            } else {
                out_row.push(format!("{id}_{version}"));
            }
        }
        writer.write_record(&out_row).context("write merged row")?;
        rows += 1;
    }
    writer.flush().context("flush merged table")?;

    Ok(VersionMergeSummary {
        rows,
        versions: versions.len(),
        unversioned_rows: unversioned,
    })
}

/// Earliest `update_as_of` date per ratings version, newest release first.
pub fn version_release_dates(ratings_csv: &Path) -> Result<Vec<(String, NaiveDate)>> {
    let mut reader = Reader::from_path(ratings_csv)
        .with_context(|| format!("open {}", ratings_csv.display()))?;
    let headers = reader.headers().context("read ratings header")?.clone();
    let version_idx = headers
        .iter()
        .position(|h| h == "fifa_version")
        .ok_or_else(|| anyhow!("ratings join output has no fifa_version column"))?;
    let date_idx = headers
        .iter()
        .position(|h| h == "update_as_of")
        .ok_or_else(|| anyhow!("ratings join output has no update_as_of column"))?;

    let mut earliest: BTreeMap<String, NaiveDate> = BTreeMap::new();
    for record in reader.records() {
        let record = record.context("read ratings row")?;
        let Some(version) = record.get(version_idx).map(str::trim).filter(|v| !v.is_empty())
        else {
            continue;
        };
        let Some(date) = record
            .get(date_idx)
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        else {
            continue;
        };
        earliest
            .entry(version.to_string())
            .and_modify(|current| {
                if date < *current {
                    *current = date;
                }
            })
            .or_insert(date);
    }

    let mut versions: Vec<(String, NaiveDate)> = earliest.into_iter().collect();
    versions.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(versions)
}

/// The latest version whose earliest update date is on or before kickoff.
/// `versions` must be sorted newest release first.
pub fn pick_version(versions: &[(String, NaiveDate)], kickoff: Option<NaiveDateTime>) -> String {
    let Some(kickoff) = kickoff else {
        return NO_VERSION.to_string();
    };
    for (version, release) in versions {
        if kickoff.date() >= *release {
            return version.clone();
        }
    }
    NO_VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{NO_VERSION, pick_version};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn kickoff(s: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").ok()
    }

    #[test]
    fn picks_latest_version_released_before_kickoff() {
        let versions = vec![
            ("24".to_string(), date("2023-09-22")),
            ("23".to_string(), date("2022-09-26")),
        ];
        assert_eq!(pick_version(&versions, kickoff("2023-10-01 15:00")), "24");
        assert_eq!(pick_version(&versions, kickoff("2023-09-22 00:00")), "24");
        assert_eq!(pick_version(&versions, kickoff("2023-09-21 20:00")), "23");
    }

    #[test]
    fn falls_back_when_no_version_in_force() {
        let versions = vec![("23".to_string(), date("2022-09-26"))];
        assert_eq!(
            pick_version(&versions, kickoff("2021-05-01 12:30")),
            NO_VERSION
        );
        assert_eq!(pick_version(&versions, None), NO_VERSION);
    }
}
