// Season leaders dashboard entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the season data provider and cache
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::time::Duration;

use season_dashboard::app;
use season_dashboard::config;
use season_dashboard::stats::cache::SeasonCache;
use season_dashboard::stats::fetch::{SeasonFetcher, YearRange};
use season_dashboard::stats::provider::{AnyProvider, SeasonProvider};
use season_dashboard::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Season dashboard starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    let years = YearRange {
        earliest: config.display.earliest_year,
        latest: config::current_year(),
    };
    info!(
        "Config loaded: source={:?}, seasons {}-{}, cache ttl {}s",
        config.data.source, years.earliest, years.latest, config.cache.ttl_secs
    );

    // 3. Provider and cache
    let provider =
        AnyProvider::from_config(&config.data).context("failed to build season data provider")?;
    info!("Using {} provider", provider.name());

    let cache = SeasonCache::new(Duration::from_secs(config.cache.ttl_secs));
    let fetcher = SeasonFetcher::new(provider, cache, years);
    let app_state = app::AppState::new(&config, fetcher);

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI event loop (blocking until user quits)
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Season dashboard shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("season-dashboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("season_dashboard=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
