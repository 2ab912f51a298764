use anyhow::Result;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::fixture_table::write_fixture_table;
use lineups_dataset::record_io::load_match_records;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let records = load_match_records(&dirs.match_records())?;
    let out = dirs.matches_dataset_file();
    let rows = write_fixture_table(&records, &out)?;

    println!("Fixture table written");
    println!("Rows: {rows} -> {}", out.display());
    Ok(())
}
