use std::collections::HashSet;

use anyhow::Result;
use log::debug;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::download::{PageJob, needs_download, run_downloads};
use lineups_dataset::fetch::FetchOptions;
use lineups_dataset::record_io::{list_files_with_ext, read_lines};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    // Union of every listing's code file, first occurrence wins.
    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for path in list_files_with_ext(&dirs.match_codes(), "txt")? {
        for code in read_lines(&path)? {
            if seen.insert(code.clone()) {
                codes.push(code);
            }
        }
    }

    let mut skipped = 0usize;
    let mut jobs = Vec::new();
    for code in &codes {
        let dest = dirs.match_page_file(code);
        if needs_download(&dest, config::MATCH_PAGE_MARKER) {
            jobs.push(PageJob {
                label: format!("match {code}"),
                url: config::match_page_url(code),
                dest,
            });
        } else {
            debug!("match {code} already downloaded");
            skipped += 1;
        }
    }

    let summary = run_downloads(
        &jobs,
        FetchOptions::default(),
        config::MATCH_PAGE_DELAY_SECS,
        config::MATCH_PAGE_JITTER_SECS,
    );

    println!("Match page download complete");
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
