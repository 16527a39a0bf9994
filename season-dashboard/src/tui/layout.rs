// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Title Bar (1 row)                                 |
// +------------------------+-------------------------+
// | Controls (5 rows)       | Summary (5 rows)        |
// +------------------------+-------------------------+
// | Leaderboard (55%)       | Scatter Plot (45%)      |
// +------------------------+-------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: dashboard title, loading indicator, status text.
    pub title_bar: Rect,
    /// Season, minimum PA, team, and plot selections.
    pub controls: Rect,
    /// Players found, top WAR, best OPS.
    pub summary: Rect,
    /// Top players by WAR.
    pub leaderboard: Rect,
    /// Scatter plot of the selected metric pair.
    pub plot: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Length(6), // controls + summary
            Constraint::Min(8),    // leaderboard + plot
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(vertical[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(vertical[2]);

    AppLayout {
        title_bar: vertical[0],
        controls: top[0],
        summary: top[1],
        leaderboard: middle[0],
        plot: middle[1],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
