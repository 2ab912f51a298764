use anyhow::Result;
use log::debug;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::download::{PageJob, needs_download, run_downloads};
use lineups_dataset::fetch::FetchOptions;
use lineups_dataset::record_io::read_lines;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let codes = read_lines(&dirs.player_codes_file())?;

    let mut skipped = 0usize;
    let mut jobs = Vec::new();
    for code in &codes {
        let dest = dirs.player_page_file(code);
        if needs_download(&dest, config::PLAYER_PAGE_MARKER) {
            jobs.push(PageJob {
                label: format!("player {code}"),
                url: config::player_page_url(code),
                dest,
            });
        } else {
            debug!("player {code} already downloaded");
            skipped += 1;
        }
    }

    let summary = run_downloads(
        &jobs,
        FetchOptions::default(),
        config::PLAYER_PAGE_DELAY_SECS,
        config::PLAYER_PAGE_JITTER_SECS,
    );

    println!("Player page download complete");
    println!("Known codes: {}", codes.len());
    println!("Already valid on disk: {skipped}");
    println!("Saved: {}/{}", summary.saved, summary.attempted);
    if !summary.failed.is_empty() {
        println!("Failed: {}", summary.failed.len());
        for label in summary.failed.iter().take(8) {
            println!(" - {label}");
        }
    }
    Ok(())
}
