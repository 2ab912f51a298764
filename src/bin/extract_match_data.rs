use anyhow::Result;
use log::{info, warn};

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::match_extract::extract_match_record;
use lineups_dataset::record_io::{
    entity_code, list_files_with_ext, read_to_string, write_json_pretty,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let mut extracted = 0usize;
    let mut failed: Vec<String> = Vec::new();
    for path in list_files_with_ext(&dirs.match_pages(), "html")? {
        let Some(code) = entity_code(&path, "match_data_") else {
            warn!("skipping unexpected file {}", path.display());
            continue;
        };
        let html = read_to_string(&path)?;
        match extract_match_record(&html) {
            Ok(record) => {
                let out = dirs.match_record_file(&code);
                write_json_pretty(&out, &record)?;
                info!("match {code}: extracted to {}", out.display());
                extracted += 1;
            }
            Err(err) => {
                warn!("match {code}: {err}");
                failed.push(code);
            }
        }
    }

    println!("Match extraction complete");
    println!("Extracted: {extracted}");
    if !failed.is_empty() {
        println!("Failed match codes: {failed:?}");
    }
    Ok(())
}
