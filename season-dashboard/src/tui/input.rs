// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (leaderboard scroll).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::UserCommand;

/// Years moved by PageUp/PageDown.
const YEAR_JUMP: i32 = 10;

/// Minimum-PA change for `[` and `]`.
const MIN_PA_JUMP: i32 = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when the key was handled locally or is
/// not bound.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm on Windows reports both Press and Release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        // Season
        KeyCode::Left | KeyCode::Char('h') => Some(UserCommand::StepYear(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(UserCommand::StepYear(1)),
        KeyCode::PageUp => Some(UserCommand::StepYear(YEAR_JUMP)),
        KeyCode::PageDown => Some(UserCommand::StepYear(-YEAR_JUMP)),

        // Minimum plate appearances
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UserCommand::StepMinPa(1)),
        KeyCode::Char('-') => Some(UserCommand::StepMinPa(-1)),
        KeyCode::Char(']') => Some(UserCommand::StepMinPa(MIN_PA_JUMP)),
        KeyCode::Char('[') => Some(UserCommand::StepMinPa(-MIN_PA_JUMP)),

        KeyCode::Char('t') => Some(UserCommand::CycleTeam),
        KeyCode::Char('p') => Some(UserCommand::TogglePlot),
        KeyCode::Char('r') => Some(UserCommand::Refresh),
        KeyCode::Char('q') | KeyCode::Esc => Some(UserCommand::Quit),

        // Leaderboard scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.scroll_offset = view_state.scroll_offset.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state);
            None
        }
        KeyCode::Home => {
            view_state.scroll_offset = 0;
            None
        }

        _ => None,
    }
}

/// Scroll down one row, stopping at the last leaderboard row.
fn scroll_down(view_state: &mut ViewState) {
    let rows = view_state
        .view
        .as_ref()
        .map_or(0, |v| v.leaderboard.rows.len());
    let last = rows.saturating_sub(1);
    view_state.scroll_offset = (view_state.scroll_offset + 1).min(last);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
