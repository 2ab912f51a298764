use anyhow::Result;

use lineups_dataset::config::{self, DataDirs};
use lineups_dataset::version_merge::stamp_fixture_table;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dirs = DataDirs::resolve(config::parse_data_dir_arg());

    let out = dirs.matches_with_versions_file();
    let summary = stamp_fixture_table(
        &dirs.matches_dataset_file(),
        &dirs.players_with_ratings_file(),
        &out,
    )?;

    println!("Version merge complete");
    println!("Fixture rows: {}", summary.rows);
    println!("Ratings versions: {}", summary.versions);
    println!("Rows with no version in force: {}", summary.unversioned_rows);
    println!("Output: {}", out.display());
    Ok(())
}
