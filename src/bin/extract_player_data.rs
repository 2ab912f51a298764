use anyhow::Result;
use log::{info, warn};

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::player_extract::extract_player_record;
use lineups_dataset::record_io::{
    entity_code, list_files_with_ext, read_to_string, write_json_pretty,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let mut extracted = 0usize;
    for path in list_files_with_ext(&dirs.player_pages(), "html")? {
        let Some(code) = entity_code(&path, "player_data_") else {
            warn!("skipping unexpected file {}", path.display());
            continue;
        };
        let html = read_to_string(&path)?;
        let record = extract_player_record(&html, &code);
        let out = dirs.player_record_file(&code);
        write_json_pretty(&out, &record)?;
        info!("player {code}: extracted to {}", out.display());
        extracted += 1;
    }

    println!("Player extraction complete");
    println!("Extracted: {extracted}");
    Ok(())
}
