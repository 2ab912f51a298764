use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::player_extract::PlayerRecord;

/// Concatenate per-player records into the flat players dataset. Absent
/// fields become empty cells.
pub fn write_players_dataset(records: &[PlayerRecord], path: &Path) -> Result<usize> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let mut writer =
        Writer::from_path(path).with_context(|| format!("open {}", path.display()))?;
    for record in records {
        writer.serialize(record).context("write player row")?;
    }
    writer.flush().context("flush players dataset")?;
    Ok(records.len())
}
