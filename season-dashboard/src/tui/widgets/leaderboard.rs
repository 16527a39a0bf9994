// Leaderboard widget: top players by WAR.
//
// Scrollable table: #, then whichever of Name, Team, WAR, OPS, HR, AVG the
// season provides. Column headers bold.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::stats::model::Column;
use crate::tui::ViewState;
use crate::view::Leaderboard;

/// Render the leaderboard into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(view) = &state.view else {
        let block = Block::default().borders(Borders::ALL).title("Leaderboard");
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };
    let board = &view.leaderboard;

    let mut header_cells = vec![Cell::from("#")];
    header_cells.extend(board.columns.iter().map(|c| Cell::from(c.as_str())));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let offset = state.scroll_offset.min(board.rows.len().saturating_sub(1));
    let rows: Vec<Row> = board
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(i, cells)| {
            let mut row = vec![Cell::from(format!("{}", i + 1))];
            row.extend(cells.iter().map(|c| Cell::from(c.clone())));
            Row::new(row)
        })
        .collect();

    let title = format!(
        "Top {} by WAR ({} shown)",
        board.rows.len(),
        board.rows.len().saturating_sub(offset)
    );

    let table = Table::new(rows, column_widths(board))
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

/// Widths for the rank column plus each leaderboard column.
pub fn column_widths(board: &Leaderboard) -> Vec<Constraint> {
    let mut widths = vec![Constraint::Length(4)];
    widths.extend(board.columns.iter().map(|c| match c {
        Column::Name => Constraint::Min(18),
        Column::Team => Constraint::Length(5),
        Column::WAR | Column::HR | Column::PA => Constraint::Length(5),
        Column::OPS | Column::AVG | Column::OBP | Column::SLG => Constraint::Length(6),
    }));
    widths
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
