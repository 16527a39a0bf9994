// Pure view-model computation.
//
// `render` turns the dashboard selections plus a fetched season table into
// everything the terminal UI draws: header, summary counters, the WAR
// leaderboard, team selector options, and scatter-plot points. Nothing here
// touches the terminal or the network.

use std::cmp::Ordering;

use crate::stats::derive::{derive_and_project, DISPLAY_COLUMNS};
use crate::stats::fetch::FetchOutcome;
use crate::stats::filter::{filter_by_pa, filter_by_team, team_options, TeamFilter};
use crate::stats::model::{Column, PlayerSeason, SeasonTable};

/// Shown when the filtered table has no rows.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected season.";

/// Default number of leaderboard rows.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 25;

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

/// Which scatter plot to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotType {
    #[default]
    WarVsOps,
    HrVsAvg,
}

impl PlotType {
    pub fn label(self) -> &'static str {
        match self {
            PlotType::WarVsOps => "WAR vs OPS",
            PlotType::HrVsAvg => "HR vs AVG",
        }
    }

    pub fn toggled(self) -> PlotType {
        match self {
            PlotType::WarVsOps => PlotType::HrVsAvg,
            PlotType::HrVsAvg => PlotType::WarVsOps,
        }
    }

    /// (x, y, size) columns.
    pub fn axes(self) -> (Column, Column, Column) {
        match self {
            PlotType::WarVsOps => (Column::OPS, Column::WAR, Column::HR),
            PlotType::HrVsAvg => (Column::AVG, Column::HR, Column::WAR),
        }
    }
}

/// Everything the user has selected.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub year: i32,
    pub min_pa: u32,
    pub team: TeamFilter,
    pub plot: PlotType,
    pub leaderboard_size: usize,
}

impl DashboardState {
    pub fn new(year: i32, min_pa: u32) -> Self {
        DashboardState {
            year,
            min_pa,
            team: TeamFilter::All,
            plot: PlotType::default(),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Headline counters above the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub players_found: usize,
    pub top_war: Option<f64>,
    pub best_ops: Option<f64>,
}

impl Summary {
    pub fn top_war_text(&self) -> String {
        format_opt(self.top_war, 1)
    }

    pub fn best_ops_text(&self) -> String {
        format_opt(self.best_ops, 3)
    }
}

/// The formatted leaderboard: header labels and one string per cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Leaderboard {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Hover label.
    pub name: String,
    pub team: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Marker size source value, when the size column exists.
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub title: String,
    pub x: Column,
    pub y: Column,
    pub size: Column,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub year: i32,
    pub header: String,
    pub min_pa: u32,
    /// Team selection actually applied (falls back to All when the selected
    /// team has no players in the current table).
    pub team: TeamFilter,
    pub team_options: Vec<String>,
    pub plot_type: PlotType,
    /// Fetch failure text, if the fetch failed.
    pub error: Option<String>,
    /// Whether the season table came from the cache.
    pub cached: bool,
    /// Set when there is nothing to show.
    pub notice: Option<String>,
    pub summary: Option<Summary>,
    pub leaderboard: Leaderboard,
    pub plot: Option<ScatterPlot>,
}

impl ViewModel {
    pub fn has_data(&self) -> bool {
        self.notice.is_none()
    }
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

/// Compute the view for `state` over a fetched season.
pub fn render(state: &DashboardState, fetched: &FetchOutcome) -> ViewModel {
    let qualified = filter_by_pa(&fetched.table, state.min_pa);
    let cleaned = derive_and_project(&qualified);

    let options = team_options(&cleaned);
    let team = match &state.team {
        TeamFilter::Team(t) if !options.iter().any(|o| o == t) => TeamFilter::All,
        other => other.clone(),
    };
    let table = filter_by_team(&cleaned, &team);

    let mut view = ViewModel {
        year: state.year,
        header: format!("{} Season Leaders", state.year),
        min_pa: state.min_pa,
        team,
        team_options: options,
        plot_type: state.plot,
        error: fetched.error.clone(),
        cached: fetched.cached,
        notice: None,
        summary: None,
        leaderboard: Leaderboard::default(),
        plot: None,
    };

    if table.is_empty() {
        view.notice = Some(NO_DATA_MESSAGE.to_string());
        return view;
    }

    view.summary = Some(Summary {
        players_found: table.len(),
        top_war: table.max_of(Column::WAR),
        best_ops: table.max_of(Column::OPS),
    });
    view.leaderboard = build_leaderboard(&table, state.leaderboard_size);
    view.plot = Some(build_scatter(&table, state.plot, state.year));
    view
}

/// Sort by WAR descending (missing WAR last, ties keep table order) and keep
/// the first `limit` rows.
pub fn top_by_war(table: &SeasonTable, limit: usize) -> Vec<&PlayerSeason> {
    let mut rows: Vec<&PlayerSeason> = table.rows().iter().collect();
    rows.sort_by(|a, b| match (a.war, b.war) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows.truncate(limit);
    rows
}

fn build_leaderboard(table: &SeasonTable, limit: usize) -> Leaderboard {
    let columns: Vec<Column> = [
        Column::Name,
        Column::Team,
        Column::WAR,
        Column::OPS,
        Column::HR,
        Column::AVG,
    ]
    .into_iter()
    .filter(|c| DISPLAY_COLUMNS.contains(c) && table.has_column(*c))
    .collect();

    let rows = top_by_war(table, limit)
        .into_iter()
        .map(|p| columns.iter().map(|c| format_cell(p, *c)).collect())
        .collect();

    Leaderboard { columns, rows }
}

fn build_scatter(table: &SeasonTable, plot: PlotType, year: i32) -> ScatterPlot {
    let (x, y, size) = plot.axes();
    let points = table
        .rows()
        .iter()
        .filter_map(|p| {
            let px = p.numeric(x).filter(|v| v.is_finite())?;
            let py = p.numeric(y).filter(|v| v.is_finite())?;
            Some(ScatterPoint {
                name: p.name.clone(),
                team: p.team.clone(),
                x: px,
                y: py,
                size: p.numeric(size),
            })
        })
        .collect();

    ScatterPlot {
        title: format!("{} {}", year, plot.label()),
        x,
        y,
        size,
        points,
    }
}

/// Display text for one cell: AVG/OPS to 3 decimals, WAR to 1, counts as
/// integers, `--` for missing values.
pub fn format_cell(p: &PlayerSeason, column: Column) -> String {
    match column {
        Column::Name => p.name.clone(),
        Column::Team => p.team.clone().unwrap_or_else(|| "--".to_string()),
        Column::WAR => format_opt(p.war, 1),
        Column::AVG | Column::OPS | Column::OBP | Column::SLG => {
            format_opt(p.numeric(column), 3)
        }
        Column::HR | Column::PA => format_opt(p.numeric(column), 0),
    }
}

fn format_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "--".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
