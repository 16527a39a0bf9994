// Integration tests for the season dashboard scaffold.

use std::path::Path;

/// Verify that defaults/dashboard.toml is valid TOML.
#[test]
fn dashboard_toml_is_valid() {
    let content = std::fs::read_to_string("defaults/dashboard.toml")
        .expect("defaults/dashboard.toml should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(
        parsed.is_ok(),
        "defaults/dashboard.toml is not valid TOML: {:?}",
        parsed.err()
    );
}

/// Verify dashboard.toml contains the expected settings.
#[test]
fn dashboard_toml_has_expected_settings() {
    let content = std::fs::read_to_string("defaults/dashboard.toml").unwrap();
    let config: toml::Value = toml::from_str(&content).unwrap();

    let data = config.get("data").expect("data section should exist");
    assert_eq!(data.get("source").unwrap().as_str().unwrap(), "fangraphs");
    assert_eq!(data.get("min_qualified").unwrap().as_integer().unwrap(), 10);

    let display = config.get("display").expect("display section should exist");
    assert_eq!(display.get("earliest_year").unwrap().as_integer().unwrap(), 1900);
    assert_eq!(display.get("default_min_pa").unwrap().as_integer().unwrap(), 100);
    assert_eq!(display.get("max_min_pa").unwrap().as_integer().unwrap(), 174);

    let cache = config.get("cache").expect("cache section should exist");
    assert_eq!(cache.get("ttl_secs").unwrap().as_integer().unwrap(), 3600);
}

/// Verify that the season fixture files have headers the loader recognizes.
#[test]
fn season_fixtures_have_headers() {
    for year in [1901, 1910, 2023] {
        let path = format!("tests/fixtures/seasons/{year}.csv");
        let content = std::fs::read_to_string(&path).expect("season fixture should exist");
        assert!(content.starts_with("Name,Team,"), "{path} has an unexpected header");
    }
}

/// Verify that all expected source files exist.
#[test]
fn source_files_exist() {
    let expected_files = [
        "src/main.rs",
        "src/lib.rs",
        "src/app.rs",
        "src/config.rs",
        "src/protocol.rs",
        "src/view.rs",
        "src/stats/mod.rs",
        "src/stats/model.rs",
        "src/stats/provider.rs",
        "src/stats/fangraphs.rs",
        "src/stats/csv_source.rs",
        "src/stats/cache.rs",
        "src/stats/fetch.rs",
        "src/stats/derive.rs",
        "src/stats/filter.rs",
        "src/tui/mod.rs",
        "src/tui/layout.rs",
        "src/tui/input.rs",
        "src/tui/widgets/mod.rs",
        "src/tui/widgets/controls.rs",
        "src/tui/widgets/summary.rs",
        "src/tui/widgets/leaderboard.rs",
        "src/tui/widgets/scatter.rs",
        "src/tui/widgets/status_bar.rs",
    ];
    for file in expected_files {
        assert!(Path::new(file).is_file(), "Expected source file '{}' to exist", file);
    }
}
