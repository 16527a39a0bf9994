// Application state and orchestration logic.
//
// The event dispatcher between the TUI and the stats pipeline. Each user
// command updates the dashboard selections, then the full
// fetch -> filter -> derive -> render pass runs again and the resulting view
// is pushed to the TUI. A newer pass simply replaces the previous view.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::Config;
use crate::protocol::{UiUpdate, UserCommand};
use crate::stats::cache::{Clock, TokioClock};
use crate::stats::fetch::{SeasonFetcher, YearRange};
use crate::stats::filter::TeamFilter;
use crate::stats::provider::SeasonProvider;
use crate::view::{self, DashboardState, ViewModel};

// ---------------------------------------------------------------------------
// Command handling
// ---------------------------------------------------------------------------

/// Bounds the selections are clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub years: YearRange,
    pub max_min_pa: u32,
}

/// What the orchestrator must do after a command has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Selections changed; recompute the view.
    Rerender,
    /// Drop the cached season, then recompute.
    Refetch,
    /// Command changed nothing.
    Unchanged,
    Quit,
}

/// Apply a command to the selections. Pure: no fetching, no I/O.
pub fn apply_command(
    state: &mut DashboardState,
    cmd: UserCommand,
    limits: &Limits,
    team_options: &[String],
) -> Effect {
    let before = state.clone();
    match cmd {
        UserCommand::SelectYear(year) => {
            state.year = year.clamp(limits.years.earliest, limits.years.latest);
        }
        UserCommand::StepYear(delta) => {
            state.year = state
                .year
                .saturating_add(delta)
                .clamp(limits.years.earliest, limits.years.latest);
        }
        UserCommand::SetMinPa(min_pa) => {
            state.min_pa = min_pa.clamp(1, limits.max_min_pa);
        }
        UserCommand::StepMinPa(delta) => {
            let stepped = i64::from(state.min_pa) + i64::from(delta);
            state.min_pa = stepped.clamp(1, i64::from(limits.max_min_pa)) as u32;
        }
        UserCommand::CycleTeam => {
            state.team = next_team(&state.team, team_options);
        }
        UserCommand::SelectTeam(label) => {
            state.team = label.parse().unwrap_or_default();
        }
        UserCommand::TogglePlot => {
            state.plot = state.plot.toggled();
        }
        UserCommand::Refresh => return Effect::Refetch,
        UserCommand::Quit => return Effect::Quit,
    }

    if *state == before {
        Effect::Unchanged
    } else {
        Effect::Rerender
    }
}

/// The option after `current` in `options`, wrapping to the first.
fn next_team(current: &TeamFilter, options: &[String]) -> TeamFilter {
    if options.is_empty() {
        return TeamFilter::All;
    }
    let label = current.to_string();
    let next = match options.iter().position(|o| *o == label) {
        Some(i) => &options[(i + 1) % options.len()],
        None => &options[0],
    };
    next.parse().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState<P: SeasonProvider, C: Clock = TokioClock> {
    pub dashboard: DashboardState,
    pub fetcher: SeasonFetcher<P, C>,
    pub limits: Limits,
    /// Qualifying threshold passed with every fetch.
    pub min_qualified: u32,
    /// The most recently rendered view.
    pub last_view: Option<ViewModel>,
}

impl<P: SeasonProvider, C: Clock> AppState<P, C> {
    /// Build the initial state: latest season, configured default minimum PA.
    pub fn new(config: &Config, fetcher: SeasonFetcher<P, C>) -> Self {
        let years = fetcher.years();
        let mut dashboard = DashboardState::new(years.latest, config.display.default_min_pa);
        dashboard.leaderboard_size = config.display.leaderboard_size;

        AppState {
            dashboard,
            fetcher,
            limits: Limits {
                years,
                max_min_pa: config.display.max_min_pa,
            },
            min_qualified: config.data.min_qualified,
            last_view: None,
        }
    }

    /// Team options from the last view (just "All" before the first render).
    pub fn team_options(&self) -> Vec<String> {
        self.last_view
            .as_ref()
            .map(|v| v.team_options.clone())
            .unwrap_or_else(|| vec![TeamFilter::All.to_string()])
    }

    /// Run the full pipeline for the current selections.
    pub async fn refresh(&mut self) -> ViewModel {
        let fetched = self
            .fetcher
            .fetch(self.dashboard.year, self.min_qualified)
            .await;
        let view = view::render(&self.dashboard, &fetched);

        // Keep the stored selection in step with what was actually applied.
        self.dashboard.team = view.team.clone();
        debug!(
            year = view.year,
            min_pa = view.min_pa,
            team = %view.team,
            rows = view.summary.as_ref().map_or(0, |s| s.players_found),
            "view rendered"
        );
        self.last_view = Some(view.clone());
        view
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator until the TUI quits or its channel closes.
pub async fn run<P, C>(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut app: AppState<P, C>,
) -> anyhow::Result<()>
where
    P: SeasonProvider,
    C: Clock,
{
    if !push_view(&mut app, &ui_tx).await {
        return Ok(());
    }

    while let Some(cmd) = cmd_rx.recv().await {
        debug!(?cmd, "user command");
        let options = app.team_options();
        match apply_command(&mut app.dashboard, cmd, &app.limits, &options) {
            Effect::Quit => {
                info!("Quit requested");
                break;
            }
            Effect::Unchanged => {}
            Effect::Refetch => {
                app.fetcher.invalidate(app.dashboard.year);
                if !push_view(&mut app, &ui_tx).await {
                    break;
                }
            }
            Effect::Rerender => {
                if !push_view(&mut app, &ui_tx).await {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Announce the fetch, run the pipeline, and send the view. Returns `false`
/// once the TUI has gone away.
async fn push_view<P: SeasonProvider, C: Clock>(
    app: &mut AppState<P, C>,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> bool {
    let year = app.dashboard.year;
    if ui_tx.send(UiUpdate::Loading { year }).await.is_err() {
        return false;
    }

    let view = app.refresh().await;
    let status = match (&view.error, view.has_data()) {
        (Some(err), _) => err.clone(),
        (None, true) => format!(
            "{} players, min PA {}{}",
            view.summary.as_ref().map_or(0, |s| s.players_found),
            view.min_pa,
            if view.cached { " (cached)" } else { "" }
        ),
        (None, false) => view::NO_DATA_MESSAGE.to_string(),
    };

    ui_tx.send(UiUpdate::View(Box::new(view))).await.is_ok()
        && ui_tx.send(UiUpdate::Status(status)).await.is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::PlotType;

    fn limits() -> Limits {
        Limits {
            years: YearRange {
                earliest: 1900,
                latest: 2026,
            },
            max_min_pa: 174,
        }
    }

    fn options() -> Vec<String> {
        vec!["All".into(), "BOS".into(), "NYY".into()]
    }

    #[test]
    fn step_year_clamps_to_range() {
        let mut s = DashboardState::new(2026, 100);
        assert_eq!(
            apply_command(&mut s, UserCommand::StepYear(1), &limits(), &options()),
            Effect::Unchanged
        );
        assert_eq!(s.year, 2026);

        apply_command(&mut s, UserCommand::StepYear(-200), &limits(), &options());
        assert_eq!(s.year, 1900);
    }

    #[test]
    fn select_year_changes_state() {
        let mut s = DashboardState::new(2026, 100);
        let effect = apply_command(&mut s, UserCommand::SelectYear(1927), &limits(), &options());
        assert_eq!(effect, Effect::Rerender);
        assert_eq!(s.year, 1927);
    }

    #[test]
    fn min_pa_bounded_one_to_max() {
        let mut s = DashboardState::new(2026, 100);
        apply_command(&mut s, UserCommand::StepMinPa(500), &limits(), &options());
        assert_eq!(s.min_pa, 174);
        apply_command(&mut s, UserCommand::StepMinPa(-1000), &limits(), &options());
        assert_eq!(s.min_pa, 1);
        apply_command(&mut s, UserCommand::SetMinPa(0), &limits(), &options());
        assert_eq!(s.min_pa, 1);
        apply_command(&mut s, UserCommand::SetMinPa(150), &limits(), &options());
        assert_eq!(s.min_pa, 150);
    }

    #[test]
    fn cycle_team_wraps() {
        let mut s = DashboardState::new(2026, 100);
        apply_command(&mut s, UserCommand::CycleTeam, &limits(), &options());
        assert_eq!(s.team, TeamFilter::Team("BOS".into()));
        apply_command(&mut s, UserCommand::CycleTeam, &limits(), &options());
        assert_eq!(s.team, TeamFilter::Team("NYY".into()));
        apply_command(&mut s, UserCommand::CycleTeam, &limits(), &options());
        assert_eq!(s.team, TeamFilter::All);
    }

    #[test]
    fn cycle_team_from_unknown_goes_to_first() {
        let mut s = DashboardState::new(2026, 100);
        s.team = TeamFilter::Team("SEA".into());
        apply_command(&mut s, UserCommand::CycleTeam, &limits(), &options());
        assert_eq!(s.team, TeamFilter::All);
    }

    #[test]
    fn select_team_parses_label() {
        let mut s = DashboardState::new(2026, 100);
        apply_command(&mut s, UserCommand::SelectTeam("NYY".into()), &limits(), &options());
        assert_eq!(s.team, TeamFilter::Team("NYY".into()));
        apply_command(&mut s, UserCommand::SelectTeam("All".into()), &limits(), &options());
        assert_eq!(s.team, TeamFilter::All);
    }

    #[test]
    fn toggle_plot_and_special_commands() {
        let mut s = DashboardState::new(2026, 100);
        assert_eq!(
            apply_command(&mut s, UserCommand::TogglePlot, &limits(), &options()),
            Effect::Rerender
        );
        assert_eq!(s.plot, PlotType::HrVsAvg);
        assert_eq!(
            apply_command(&mut s, UserCommand::Refresh, &limits(), &options()),
            Effect::Refetch
        );
        assert_eq!(
            apply_command(&mut s, UserCommand::Quit, &limits(), &options()),
            Effect::Quit
        );
    }
}
