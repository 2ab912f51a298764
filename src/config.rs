use std::env;
use std::path::{Path, PathBuf};

/// Substring a downloaded match page must contain to count as valid.
pub const MATCH_PAGE_MARKER: &str = "Lineups";
/// Substring a downloaded player page must contain to count as valid.
pub const PLAYER_PAGE_MARKER: &str = "FootballLineups";

/// Base delay between outbound requests, per page kind, in seconds.
pub const SEASON_PAGE_DELAY_SECS: u64 = 3;
pub const MATCH_PAGE_DELAY_SECS: u64 = 5;
pub const PLAYER_PAGE_DELAY_SECS: u64 = 5;

/// Jitter applied on top of the base delay (uniform in `base ± jitter`).
pub const SEASON_PAGE_JITTER_SECS: u64 = 1;
pub const MATCH_PAGE_JITTER_SECS: u64 = 1;
pub const PLAYER_PAGE_JITTER_SECS: u64 = 2;

/// Minimum fuzzy name-similarity score (0-100) for a ratings row to be
/// accepted as the same player. A score exactly at the cutoff is kept.
pub const FUZZ_CUTOFF: u32 = 69;

/// Number of starter-id columns emitted per side in the fixture table.
pub const STARTERS_PER_SIDE: usize = 11;

/// Leagues whose tournament listing pages seed the match-code universe.
pub const LEAGUES: &[&str] = &[
    "FA-Premier-League",
    "La-Liga",
    "Bundesliga",
    "Serie-A",
    "Ligue-1",
    "Eredivisie",
    "Portuguese-Liga",
    "Scottish-Premiership",
    "The-Championship",
    "Champions-League",
];

/// Seasons scraped for every league, in the source site's slug format.
pub const SEASONS: &[&str] = &[
    "2020--2021",
    "2021--2022",
    "2022--2023",
    "2023--2024",
    "2024--2025",
];

/// football-data.co.uk league name -> division code.
pub const ODDS_LEAGUE_CODES: &[(&str, &str)] = &[
    ("FA-Premier-League", "E0"),
    ("La-Liga", "SP1"),
    ("Bundesliga", "D1"),
    ("Serie-A", "I1"),
    ("Ligue-1", "F1"),
    ("Eredivisie", "N1"),
    ("Portuguese-Liga", "P1"),
    ("Scottish-Premiership", "SC0"),
    ("The-Championship", "E1"),
];

/// football-data.co.uk season codes (two two-digit years).
pub const ODDS_SEASONS: &[&str] = &[
    "1516", "1617", "1718", "1819", "1920", "2021", "2122", "2223", "2324", "2425",
];

const SITE_BASE_URL: &str = "https://m.football-lineups.com";

pub fn match_page_url(code: &str) -> String {
    format!("{SITE_BASE_URL}/match/{code}/")
}

pub fn player_page_url(code: &str) -> String {
    format!("{SITE_BASE_URL}/footballer/{code}/")
}

pub fn season_page_url(league: &str, season: &str) -> String {
    format!("{SITE_BASE_URL}/tourn/{league}-{season}/")
}

pub fn odds_csv_url(season: &str, division: &str) -> String {
    format!("https://www.football-data.co.uk/mmz4281/{season}/{division}")
}

/// On-disk layout of the pipeline's hand-off directories. Every stage reads
/// one directory and writes another; file names carry the entity code.
#[derive(Debug, Clone)]
pub struct DataDirs {
    root: PathBuf,
}

impl DataDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the data root from `--data-dir`, then `DATA_DIR`, then `data`.
    pub fn resolve(arg: Option<PathBuf>) -> Self {
        let _ = dotenvy::dotenv();
        let root = arg
            .or_else(|| env::var("DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("data"));
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn season_pages(&self) -> PathBuf {
        self.root.join("season_pages")
    }

    pub fn match_codes(&self) -> PathBuf {
        self.root.join("match_codes")
    }

    pub fn match_pages(&self) -> PathBuf {
        self.root.join("match_pages")
    }

    pub fn match_records(&self) -> PathBuf {
        self.root.join("match_records")
    }

    pub fn player_codes_file(&self) -> PathBuf {
        self.root.join("player_codes").join("player_codes.txt")
    }

    pub fn player_pages(&self) -> PathBuf {
        self.root.join("player_pages")
    }

    pub fn player_records(&self) -> PathBuf {
        self.root.join("player_records")
    }

    pub fn datasets(&self) -> PathBuf {
        self.root.join("datasets")
    }

    pub fn odds(&self) -> PathBuf {
        self.root.join("odds")
    }

    pub fn match_page_file(&self, code: &str) -> PathBuf {
        self.match_pages().join(format!("match_data_{code}.html"))
    }

    pub fn match_record_file(&self, code: &str) -> PathBuf {
        self.match_records()
            .join(format!("extracted_match_data_{code}.json"))
    }

    pub fn player_page_file(&self, code: &str) -> PathBuf {
        self.player_pages().join(format!("player_data_{code}.html"))
    }

    pub fn player_record_file(&self, code: &str) -> PathBuf {
        self.player_records()
            .join(format!("extracted_player_data_{code}.json"))
    }

    pub fn players_dataset_file(&self) -> PathBuf {
        self.datasets().join("players_dataset.csv")
    }

    pub fn players_with_ratings_file(&self) -> PathBuf {
        self.datasets().join("players_with_ratings.csv")
    }

    pub fn matches_dataset_file(&self) -> PathBuf {
        self.datasets().join("matches_dataset.csv")
    }

    pub fn matches_with_versions_file(&self) -> PathBuf {
        self.datasets().join("matches_with_versions.csv")
    }

    pub fn odds_season_file(&self, league: &str, season: &str) -> PathBuf {
        self.odds()
            .join(format!("{league}_{season}_historical_odds.csv"))
    }

    pub fn odds_combined_file(&self) -> PathBuf {
        self.odds().join("historical_odds.csv")
    }

    /// External ratings dump, consumed read-only.
    pub fn ratings_csv_file(&self) -> PathBuf {
        self.root.join("ratings").join("male_players.csv")
    }
}

/// Parse an optional `--data-dir <path>` / `--data-dir=<path>` argument the
/// way the stage binaries expect it.
pub fn parse_data_dir_arg() -> Option<PathBuf> {
    parse_path_arg("--data-dir")
}

pub fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
