use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::fetch::{FetchOptions, fetch_page, politeness_delay};

/// One page to retrieve: the entity it belongs to, the source URL and the
/// file the raw body lands in.
#[derive(Debug, Clone)]
pub struct PageJob {
    pub label: String,
    pub url: String,
    pub dest: PathBuf,
}

#[derive(Debug, Default)]
pub struct DownloadSummary {
    pub attempted: usize,
    pub saved: usize,
    pub failed: Vec<String>,
}

/// A page needs (re-)downloading when its file is missing or does not carry
/// the validity marker, which happens when the proxy returned an error page
/// or an interstitial instead of the real content.
pub fn needs_download(path: &Path, marker: &str) -> bool {
    match fs::read_to_string(path) {
        Ok(body) => !body.contains(marker),
        Err(_) => true,
    }
}

/// Fetch pages strictly sequentially with a politeness delay between
/// requests. A failed page is logged and skipped; the batch always runs to
/// the end. The next scheduled run is the retry mechanism.
pub fn run_downloads(
    jobs: &[PageJob],
    opts: FetchOptions,
    delay_secs: u64,
    jitter_secs: u64,
) -> DownloadSummary {
    let mut summary = DownloadSummary::default();
    if jobs.is_empty() {
        info!("no pages to download");
        return summary;
    }

    for job in jobs {
        summary.attempted += 1;
        let response = match fetch_page(&job.url, opts) {
            Ok(response) => response,
            Err(err) => {
                warn!("{}: fetch failed: {err:#}", job.label);
                summary.failed.push(job.label.clone());
                continue;
            }
        };
        if response.status.is_success() {
            match save_page(&job.dest, &response.body) {
                Ok(()) => {
                    info!("{}: saved to {}", job.label, job.dest.display());
                    summary.saved += 1;
                }
                Err(err) => {
                    warn!("{}: {err:#}", job.label);
                    summary.failed.push(job.label.clone());
                }
            }
        } else {
            warn!("{}: http status {}", job.label, response.status);
            summary.failed.push(job.label.clone());
        }
        politeness_delay(delay_secs, jitter_secs);
    }
    summary
}

fn save_page(path: &Path, body: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    fs::write(path, body).with_context(|| format!("write {}", path.display()))
}
