use anyhow::Result;
use log::{info, warn};

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::match_codes::extract_match_codes;
use lineups_dataset::record_io::{list_files_with_ext, read_to_string, write_lines};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let mut listings = 0usize;
    let mut total_codes = 0usize;
    for path in list_files_with_ext(&dirs.season_pages(), "html")? {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("skipping unexpected file {}", path.display());
            continue;
        };
        let html = read_to_string(&path)?;
        let codes = extract_match_codes(&html);
        let out = dirs.match_codes().join(format!("{stem}_match_codes.txt"));
        write_lines(&out, &codes)?;
        info!("{}: {} codes -> {}", stem, codes.len(), out.display());
        listings += 1;
        total_codes += codes.len();
    }

    println!("Match code extraction complete");
    println!("Listing pages: {listings}");
    println!("Codes written (incl. duplicates): {total_codes}");
    Ok(())
}
