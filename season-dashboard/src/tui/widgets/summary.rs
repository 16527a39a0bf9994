// Summary widget: players found, top WAR, best OPS.
//
// Shows the no-data notice (and the fetch error, if any) when the filtered
// table is empty.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;
use crate::view::{Summary, ViewModel};

/// Render the summary panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (title, lines) = match &state.view {
        Some(view) => (view.header.clone(), build_summary_lines(view)),
        None => ("Summary".to_string(), Vec::new()),
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn build_summary_lines(view: &ViewModel) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(summary) = &view.summary {
        lines.extend(metric_lines(summary));
    }
    if let Some(notice) = &view.notice {
        lines.push(Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(err) = &view.error {
        lines.push(Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    lines
}

fn metric_lines(summary: &Summary) -> Vec<Line<'static>> {
    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(vec![
            Span::styled(" Players Found: ", Style::default().fg(Color::Gray)),
            Span::styled(summary.players_found.to_string(), value_style),
        ]),
        Line::from(vec![
            Span::styled(" Top WAR:       ", Style::default().fg(Color::Gray)),
            Span::styled(summary.top_war_text(), value_style.fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled(" Best OPS:      ", Style::default().fg(Color::Gray)),
            Span::styled(summary.best_ops_text(), value_style.fg(Color::Green)),
        ]),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
