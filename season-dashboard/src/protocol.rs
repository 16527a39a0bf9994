// Messages exchanged between the TUI and the app orchestrator.

use crate::view::ViewModel;

/// Commands the TUI sends to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Jump to a specific season.
    SelectYear(i32),
    /// Move the selected season by a signed number of years.
    StepYear(i32),
    SetMinPa(u32),
    /// Move the minimum-PA threshold by a signed amount.
    StepMinPa(i32),
    /// Select the next entry in the team options list (wrapping).
    CycleTeam,
    /// Select a team by its selector label ("All" for no filter).
    SelectTeam(String),
    TogglePlot,
    /// Drop the cached table for the current season and fetch again.
    Refresh,
    Quit,
}

/// Updates the app orchestrator pushes to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// A fetch for this season is in flight.
    Loading { year: i32 },
    /// A freshly computed view.
    View(Box<ViewModel>),
    /// One-line status text for the status bar.
    Status(String),
}
