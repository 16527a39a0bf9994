// Configuration loading and parsing (config/dashboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the single configuration file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// dashboard.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub cache: CacheConfig,
    pub display: DisplayConfig,
}

/// Which provider serves season tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    FanGraphs,
    Csv,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub source: DataSource,
    pub base_url: String,
    pub csv_dir: String,
    /// Qualifying threshold sent with every fetch. Widens the pool that the
    /// on-screen minimum-PA control then narrows.
    pub min_qualified: u32,
    pub request_timeout_secs: u64,
    pub page_items: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub earliest_year: i32,
    pub default_min_pa: u32,
    pub max_min_pa: u32,
    pub leaderboard_size: usize,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/dashboard.toml` relative to `base_dir`.
///
/// This does not copy defaults. Prefer `load_config()` which does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config, current_year())?;

    Ok(config)
}

/// Seed `config/dashboard.toml` from `defaults/` when it is missing.
///
/// Returns the path written, or `None` when nothing needed copying. An
/// existing config file is never touched.
pub fn seed_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let shipped = base_dir.join("defaults").join(CONFIG_FILE);
    if !shipped.is_file() {
        // A bare config/ directory is left for load_config_from to report.
        if config_dir.is_dir() {
            return Ok(None);
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no defaults/{CONFIG_FILE} and no config/ directory under {}",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| seed_failed(&config_dir, e))?;
    std::fs::copy(&shipped, &target).map_err(|e| seed_failed(&target, e))?;
    Ok(Some(target))
}

fn seed_failed(path: &Path, err: std::io::Error) -> ConfigError {
    ConfigError::DefaultsCopyError {
        message: format!("{}: {err}", path.display()),
    }
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Seeds the config file from `defaults/` before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(path) = seed_config_file(&cwd)? {
        tracing::info!("copied default config to {}", path.display());
    }
    load_config_from(&cwd)
}

/// The latest season the dashboard offers.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config, latest_year: i32) -> Result<(), ConfigError> {
    let data = &config.data;
    match data.source {
        DataSource::FanGraphs if data.base_url.trim().is_empty() => {
            return Err(invalid("data.base_url", "must not be empty for source = \"fangraphs\""));
        }
        DataSource::Csv if data.csv_dir.trim().is_empty() => {
            return Err(invalid("data.csv_dir", "must not be empty for source = \"csv\""));
        }
        _ => {}
    }
    if data.request_timeout_secs == 0 {
        return Err(invalid("data.request_timeout_secs", "must be > 0"));
    }
    if data.page_items == 0 {
        return Err(invalid("data.page_items", "must be > 0"));
    }

    if config.cache.ttl_secs == 0 {
        return Err(invalid("cache.ttl_secs", "must be > 0"));
    }

    let display = &config.display;
    if display.earliest_year > latest_year {
        return Err(invalid(
            "display.earliest_year",
            format!("must not be after {latest_year}, got {}", display.earliest_year),
        ));
    }
    if display.max_min_pa == 0 {
        return Err(invalid("display.max_min_pa", "must be > 0"));
    }
    if !(1..=display.max_min_pa).contains(&display.default_min_pa) {
        return Err(invalid(
            "display.default_min_pa",
            format!(
                "must be between 1 and {} inclusive, got {}",
                display.max_min_pa, display.default_min_pa
            ),
        ));
    }
    if display.leaderboard_size == 0 {
        return Err(invalid("display.leaderboard_size", "must be > 0"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Returns the path to the season-dashboard crate root
    /// (works whether `cargo test` runs from the crate root or repo root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("season-dashboard/defaults").exists() {
            cwd.join("season-dashboard")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    /// Fresh temp dir with config/dashboard.toml holding `text`.
    fn temp_with_config(name: &str, text: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), text).unwrap();
        tmp
    }

    fn default_text() -> String {
        fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE)).unwrap()
    }

    fn expect_field(err: ConfigError, expected: &str) {
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_default_config() {
        let tmp = temp_with_config("dash_config_defaults", &default_text());
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.data.source, DataSource::FanGraphs);
        assert_eq!(
            config.data.base_url,
            "https://www.fangraphs.com/api/leaders/major-league/data"
        );
        assert_eq!(config.data.csv_dir, "data/seasons");
        assert_eq!(config.data.min_qualified, 10);
        assert_eq!(config.data.request_timeout_secs, 30);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.display.earliest_year, 1900);
        assert_eq!(config.display.default_min_pa, 100);
        assert_eq!(config.display.max_min_pa, 174);
        assert_eq!(config.display.leaderboard_size, 25);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn csv_source_parses() {
        let text = default_text().replace("source = \"fangraphs\"", "source = \"csv\"");
        let tmp = temp_with_config("dash_config_csv", &text);
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.data.source, DataSource::Csv);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn unknown_source_is_parse_error() {
        let text = default_text().replace("source = \"fangraphs\"", "source = \"retrosheet\"");
        let tmp = temp_with_config("dash_config_bad_source", &text);
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_ttl() {
        let text = default_text().replace("ttl_secs = 3600", "ttl_secs = 0");
        let tmp = temp_with_config("dash_config_zero_ttl", &text);
        expect_field(load_config_from(&tmp).unwrap_err(), "cache.ttl_secs");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_default_min_pa_above_max() {
        let text = default_text().replace("default_min_pa = 100", "default_min_pa = 200");
        let tmp = temp_with_config("dash_config_min_pa_high", &text);
        expect_field(load_config_from(&tmp).unwrap_err(), "display.default_min_pa");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_default_min_pa_zero() {
        let text = default_text().replace("default_min_pa = 100", "default_min_pa = 0");
        let tmp = temp_with_config("dash_config_min_pa_zero", &text);
        expect_field(load_config_from(&tmp).unwrap_err(), "display.default_min_pa");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_leaderboard_size() {
        let text = default_text().replace("leaderboard_size = 25", "leaderboard_size = 0");
        let tmp = temp_with_config("dash_config_zero_board", &text);
        expect_field(load_config_from(&tmp).unwrap_err(), "display.leaderboard_size");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_base_url_for_fangraphs() {
        let text = default_text().replace(
            "base_url = \"https://www.fangraphs.com/api/leaders/major-league/data\"",
            "base_url = \"\"",
        );
        let tmp = temp_with_config("dash_config_empty_url", &text);
        expect_field(load_config_from(&tmp).unwrap_err(), "data.base_url");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_earliest_year_in_future() {
        let text = default_text().replace("earliest_year = 1900", "earliest_year = 3000");
        let tmp = temp_with_config("dash_config_future_year", &text);
        expect_field(load_config_from(&tmp).unwrap_err(), "display.earliest_year");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = std::env::temp_dir().join("dash_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_with_config("dash_config_invalid_toml", "this is not valid [[[ toml");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    /// Fresh temp dir holding only the named subdirectories.
    fn temp_base(name: &str, dirs: &[&str]) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        for dir in dirs {
            fs::create_dir_all(tmp.join(dir)).unwrap();
        }
        tmp
    }

    #[test]
    fn seed_copies_shipped_config() {
        let tmp = temp_base("dash_config_seed_copies", &["defaults"]);
        fs::write(tmp.join("defaults").join(CONFIG_FILE), default_text()).unwrap();
        fs::write(tmp.join("defaults/dashboard.toml.example"), "# example\n").unwrap();

        let seeded = seed_config_file(&tmp).unwrap();
        assert_eq!(seeded, Some(tmp.join("config").join(CONFIG_FILE)));
        assert!(!tmp.join("config/dashboard.toml.example").exists());
        let config = load_config_from(&tmp).expect("seeded config should load");
        assert_eq!(config.display.default_min_pa, 100);

        // Second call finds the file in place.
        assert_eq!(seed_config_file(&tmp).unwrap(), None);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_keeps_existing_config() {
        let tmp = temp_base("dash_config_seed_keeps", &["defaults", "config"]);
        fs::write(tmp.join("defaults").join(CONFIG_FILE), default_text()).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), "# custom\n").unwrap();

        assert_eq!(seed_config_file(&tmp).unwrap(), None);
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_without_defaults_leaves_config_dir_to_loader() {
        let tmp = temp_base("dash_config_seed_no_defaults", &["config"]);

        assert_eq!(seed_config_file(&tmp).unwrap(), None);
        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::FileNotFound { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_errors_when_both_dirs_missing() {
        let tmp = temp_base("dash_config_seed_both_missing", &[]);

        match seed_config_file(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("no config/ directory"), "{message}");
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        assert!(!tmp.join("config").exists());
        let _ = fs::remove_dir_all(&tmp);
    }
}
