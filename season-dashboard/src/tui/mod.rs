// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `ViewModel` from the app
// orchestrator. The orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::protocol::{UiUpdate, UserCommand};
use crate::view::ViewModel;

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Most recent view from the orchestrator.
    pub view: Option<ViewModel>,
    /// Season currently being fetched, if any.
    pub loading: Option<i32>,
    /// Status bar text.
    pub status: String,
    /// First leaderboard row shown.
    pub scroll_offset: usize,
}

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Loading { year } => {
            state.loading = Some(year);
        }
        UiUpdate::View(view) => {
            state.loading = None;
            let rows = view.leaderboard.rows.len();
            state.scroll_offset = state.scroll_offset.min(rows.saturating_sub(1));
            state.view = Some(*view);
        }
        UiUpdate::Status(text) => {
            state.status = text;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.title_bar, state);
    widgets::controls::render(frame, layout.controls, state);
    widgets::summary::render(frame, layout.summary, state);
    widgets::leaderboard::render(frame, layout.leaderboard, state);
    widgets::scatter::render(frame, layout.plot, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " q:Quit | \u{2190}/\u{2192}:Year | PgUp/PgDn:\u{b1}10y | +/-:Min PA | [/]:\u{b1}10 PA | t:Team | p:Plot | r:Refresh | \u{2191}/\u{2193}:Scroll";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Orchestrator stopped.
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::stats::fetch::FetchOutcome;
    use crate::stats::model::{Column, ColumnSet, PlayerSeason, SeasonTable};
    use crate::view::{render, DashboardState};
    use std::sync::Arc;

    /// A rendered view over a few players, shared by widget tests.
    pub(crate) fn sample_view() -> ViewModel {
        let columns: ColumnSet = [
            Column::Name,
            Column::Team,
            Column::PA,
            Column::OBP,
            Column::SLG,
            Column::WAR,
            Column::HR,
            Column::AVG,
        ]
        .into_iter()
        .collect();
        let rows = vec![
            PlayerSeason {
                name: "Aaron Judge".into(),
                team: Some("NYY".into()),
                pa: Some(458),
                obp: Some(0.406),
                slg: Some(0.613),
                war: Some(5.5),
                hr: Some(37),
                avg: Some(0.267),
                ops: None,
            },
            PlayerSeason {
                name: "Rafael Devers".into(),
                team: Some("BOS".into()),
                pa: Some(656),
                obp: Some(0.351),
                slg: Some(0.500),
                war: Some(2.0),
                hr: Some(33),
                avg: Some(0.271),
                ops: None,
            },
        ];
        let fetched = FetchOutcome {
            table: Arc::new(SeasonTable::new(2023, columns, rows)),
            error: None,
            cached: false,
        };
        render(&DashboardState::new(2023, 100), &fetched)
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.view.is_none());
        assert!(state.loading.is_none());
        assert!(state.status.is_empty());
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn loading_then_view_clears_loading() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Loading { year: 2023 });
        assert_eq!(state.loading, Some(2023));

        apply_ui_update(&mut state, UiUpdate::View(Box::new(sample_view())));
        assert!(state.loading.is_none());
        assert_eq!(state.view.as_ref().unwrap().year, 2023);
    }

    #[test]
    fn new_view_clamps_scroll() {
        let mut state = ViewState {
            scroll_offset: 40,
            ..Default::default()
        };
        apply_ui_update(&mut state, UiUpdate::View(Box::new(sample_view())));
        assert_eq!(state.scroll_offset, 1);
    }

    #[test]
    fn status_update() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Status("2 players".into()));
        assert_eq!(state.status, "2 players");
    }

    #[test]
    fn render_frame_without_view() {
        let backend = ratatui::backend::TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }

    #[test]
    fn render_frame_with_view() {
        let backend = ratatui::backend::TestBackend::new(160, 50);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState {
            view: Some(sample_view()),
            ..Default::default()
        };
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
