// Controls widget: current season, minimum PA, team, and plot selections.
//
// Key-value display with the shortcut for each control in the label.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;
use crate::view::ViewModel;

/// Render the controls panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = match &state.view {
        Some(view) => build_control_lines(view),
        None => vec![Line::from(Span::styled(
            " Loading season data...",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Controls"),
    );
    frame.render_widget(paragraph, area);
}

fn build_control_lines(view: &ViewModel) -> Vec<Line<'static>> {
    vec![
        control_line(" Season (\u{2190}/\u{2192}):  ", view.year.to_string()),
        control_line(" Min PA (+/-):   ", view.min_pa.to_string()),
        control_line(" Team (t):       ", team_label(view)),
        control_line(" Plot (p):       ", view.plot_type.label().to_string()),
    ]
}

fn control_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Team selection with its position among the options, e.g. "NYY (3/17)".
pub fn team_label(view: &ViewModel) -> String {
    let current = view.team.to_string();
    match view.team_options.iter().position(|o| *o == current) {
        Some(i) => format!("{} ({}/{})", current, i + 1, view.team_options.len()),
        None => current,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::filter::TeamFilter;
    use crate::tui::tests::sample_view;

    #[test]
    fn team_label_counts_options() {
        let mut view = sample_view();
        assert_eq!(team_label(&view), "All (1/3)");
        view.team = TeamFilter::Team("NYY".into());
        assert_eq!(team_label(&view), "NYY (3/3)");
    }

    #[test]
    fn control_lines_show_selections() {
        let view = sample_view();
        let lines = build_control_lines(&view);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].spans[1].content, "2023");
        assert_eq!(lines[1].spans[1].content, "100");
        assert_eq!(lines[3].spans[1].content, "WAR vs OPS");
    }

    #[test]
    fn render_without_view() {
        let backend = ratatui::backend::TestBackend::new(50, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &ViewState::default()))
            .unwrap();
    }
}
