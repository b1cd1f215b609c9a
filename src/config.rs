use std::path::PathBuf;

/// Default dataset location, matching the repository's sample data layout.
pub const DEFAULT_DATASET: &str = "data/imdb.csv";

/// Earliest release year considered valid by default.
pub const DEFAULT_MIN_YEAR: i32 = 1957;

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup configuration, resolved from the process environment.
///
/// * dataset path: first CLI argument, else `CINESCOPE_DATA`, else
///   [`DEFAULT_DATASET`]
/// * `CINESCOPE_MIN_YEAR`: integer cutoff, or `off` to keep every year
/// * `CINESCOPE_THEME`: `off` hides the light/dark toggle
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    /// Rows released before this year are dropped at load time.
    pub min_year: Option<i32>,
    /// Whether the UI offers the light/dark toggle.
    pub theme_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            min_year: Some(DEFAULT_MIN_YEAR),
            theme_enabled: true,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from CLI arguments and environment.
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Some(path) = std::env::args().nth(1) {
            config.dataset_path = PathBuf::from(path);
        } else if let Ok(path) = std::env::var("CINESCOPE_DATA") {
            config.dataset_path = PathBuf::from(path);
        }

        if let Ok(raw) = std::env::var("CINESCOPE_MIN_YEAR") {
            config.min_year = parse_min_year(&raw, config.min_year);
        }

        if let Ok(raw) = std::env::var("CINESCOPE_THEME") {
            config.theme_enabled = !matches!(raw.trim(), "off" | "0" | "false");
        }

        config
    }
}

fn parse_min_year(raw: &str, fallback: Option<i32>) -> Option<i32> {
    let raw = raw.trim();
    if matches!(raw, "off" | "none" | "") {
        return None;
    }
    match raw.parse::<i32>() {
        Ok(y) => Some(y),
        Err(_) => {
            log::warn!("ignoring unparseable CINESCOPE_MIN_YEAR={raw:?}");
            fallback
        }
    }
}
