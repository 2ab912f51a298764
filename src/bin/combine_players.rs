use anyhow::Result;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::player_extract::PlayerRecord;
use lineups_dataset::player_table::write_players_dataset;
use lineups_dataset::record_io::{list_files_with_ext, read_json};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let mut records: Vec<PlayerRecord> = Vec::new();
    for path in list_files_with_ext(&dirs.player_records(), "json")? {
        records.push(read_json(&path)?);
    }
    let out = dirs.players_dataset_file();
    let rows = write_players_dataset(&records, &out)?;

    println!("Player dataset written");
    println!("Rows: {rows} -> {}", out.display());
    Ok(())
}
