use anyhow::Result;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::ratings::{build_players_with_ratings, convert_fm_rtf};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());
    // A Football Manager RTF export can stand in for the FIFA dump; it is
    // converted to CSV in place and used as the ratings source.
    let ratings_csv = match config::parse_path_arg("--fm-rtf") {
        Some(rtf) => convert_fm_rtf(&rtf)?,
        None => config::parse_path_arg("--ratings").unwrap_or_else(|| dirs.ratings_csv_file()),
    };

    let out = dirs.players_with_ratings_file();
    let joined = build_players_with_ratings(
        &dirs.players_dataset_file(),
        &ratings_csv,
        &out,
        config::FUZZ_CUTOFF,
    )?;

    println!("Ratings join complete");
    println!("Matched: {}", joined.matched);
    println!(
        "Dropped (no candidate at cutoff {}): {}",
        config::FUZZ_CUTOFF,
        joined.unmatched
    );
    println!("Output: {}", out.display());
    Ok(())
}
