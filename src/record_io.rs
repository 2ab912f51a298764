use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::match_extract::MatchRecord;

/// Enumerate a stage's input files by extension, sorted by file name so
/// re-runs process (and log) in a stable order. A missing directory is the
/// same as an empty one: nothing downloaded yet.
pub fn list_files_with_ext(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        warn!("input directory {} does not exist yet", dir.display());
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry.context("read dir entry")?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(ext) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Recover the entity code from a per-code file name, e.g.
/// `match_data_123456.html` with prefix `match_data_` -> `123456`.
pub fn entity_code(path: &Path, prefix: &str) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix(prefix).map(|code| code.to_string())
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = read_to_string(path)?;
    serde_json::from_str(&raw).with_context(|| format!("decode {}", path.display()))
}

/// Write a record as pretty JSON via a temp file and rename, so a crashed
/// run never leaves a truncated record behind.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("serialize record")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

/// One trimmed line per element, the original code-list text format.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let raw = read_to_string(path)?;
    Ok(raw
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Load every extracted match record with its code, sorted by file name.
pub fn load_match_records(dir: &Path) -> Result<Vec<(String, MatchRecord)>> {
    let mut records = Vec::new();
    for path in list_files_with_ext(dir, "json")? {
        let Some(code) = entity_code(&path, "extracted_match_data_") else {
            warn!("skipping unexpected file {}", path.display());
            continue;
        };
        let record: MatchRecord = read_json(&path)?;
        records.push((code, record));
    }
    Ok(records)
}
