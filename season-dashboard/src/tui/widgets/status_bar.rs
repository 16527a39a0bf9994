// Title bar widget: dashboard title, fetch indicator, status text.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

pub const TITLE: &str = "Historical Baseball Dashboard (1900-Present)";

/// Render the title bar into the given area.
///
/// Layout: [title] [loading indicator] | [status text]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        format!(" {TITLE} "),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];

    let (text, color) = fetch_indicator(state.loading);
    spans.push(Span::styled(text, Style::default().fg(color)));

    if !state.status.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            state.status.clone(),
            Style::default().fg(status_color(state)),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Indicator text and color for the fetch state.
pub fn fetch_indicator(loading: Option<i32>) -> (String, Color) {
    match loading {
        Some(year) => (format!("\u{25cf} Loading {year}..."), Color::Yellow),
        None => ("\u{25cf}".to_string(), Color::Green),
    }
}

/// Status text is red while the current view carries a fetch error.
fn status_color(state: &ViewState) -> Color {
    match &state.view {
        Some(view) if view.error.is_some() => Color::Red,
        _ => Color::White,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_view;

    #[test]
    fn indicator_while_loading() {
        let (text, color) = fetch_indicator(Some(1927));
        assert!(text.contains("Loading 1927"));
        assert_eq!(color, Color::Yellow);
    }

    #[test]
    fn indicator_idle() {
        let (_, color) = fetch_indicator(None);
        assert_eq!(color, Color::Green);
    }

    #[test]
    fn error_view_turns_status_red() {
        let mut view = sample_view();
        view.error = Some("Error fetching data for 2023: timeout".into());
        let state = ViewState {
            view: Some(view),
            ..Default::default()
        };
        assert_eq!(status_color(&state), Color::Red);
        assert_eq!(status_color(&ViewState::default()), Color::White);
    }

    #[test]
    fn render_shows_title() {
        let backend = ratatui::backend::TestBackend::new(100, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState {
            status: "2 players, min PA 100".into(),
            ..Default::default()
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let line: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(line.contains("Historical Baseball Dashboard"));
    }
}
