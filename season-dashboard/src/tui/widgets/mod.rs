// TUI widget modules for each dashboard panel.

pub mod controls;
pub mod leaderboard;
pub mod scatter;
pub mod status_bar;
pub mod summary;
