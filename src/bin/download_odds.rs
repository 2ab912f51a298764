use anyhow::Result;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::odds::{combine_odds, download_odds};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let summary = download_odds(&dirs)?;
    println!("Odds download complete");
    println!("Downloaded: {}", summary.downloaded);
    println!("Already on disk: {}", summary.skipped);
    if !summary.failed.is_empty() {
        println!("Failed: {}", summary.failed.len());
        for label in summary.failed.iter().take(8) {
            println!(" - {label}");
        }
    }

    let combined = combine_odds(&dirs)?;
    println!(
        "Combined odds table: {} rows x {} columns -> {}",
        combined.rows.len(),
        combined.headers.len(),
        dirs.odds_combined_file().display()
    );
    Ok(())
}
