use anyhow::Result;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::download::{PageJob, run_downloads};
use lineups_dataset::fetch::FetchOptions;

// Tournament listing pages grow as a season progresses, so they are always
// re-fetched; the pre-check idempotency applies to match and player pages.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let mut jobs = Vec::new();
    for league in config::LEAGUES {
        for season in config::SEASONS {
            jobs.push(PageJob {
                label: format!("{league}-{season}"),
                url: config::season_page_url(league, season),
                dest: dirs.season_pages().join(format!("{league}-{season}.html")),
            });
        }
    }

    let summary = run_downloads(
        &jobs,
        FetchOptions::default(),
        config::SEASON_PAGE_DELAY_SECS,
        config::SEASON_PAGE_JITTER_SECS,
    );

    println!("Season listing download complete");
    println!("Saved: {}/{}", summary.saved, summary.attempted);
    if !summary.failed.is_empty() {
        println!("Failed: {}", summary.failed.len());
        for label in summary.failed.iter().take(8) {
            println!(" - {label}");
        }
    }
    Ok(())
}
