use anyhow::Result;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::player_codes::collect_player_codes;
use lineups_dataset::record_io::{load_match_records, write_lines};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let records = load_match_records(&dirs.match_records())?;
    let codes = collect_player_codes(records.iter().map(|(_, record)| record));
    let out = dirs.player_codes_file();
    write_lines(&out, &codes)?;

    println!("Player code extraction complete");
    println!("Match records scanned: {}", records.len());
    println!("Distinct player codes: {} -> {}", codes.len(), out.display());
    Ok(())
}
