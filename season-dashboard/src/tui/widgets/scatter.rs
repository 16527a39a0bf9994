// Scatter plot widget: one colored series per team, marker weight by size.
//
// Points come pre-computed in the view's `ScatterPlot`. Each team gets a
// distinct hue; the size column (HR or WAR) is bucketed into three marker
// weights since a terminal cell cannot scale a glyph.

use std::collections::{BTreeMap, BTreeSet};

use palette::{Hsl, IntoColor, Srgb};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;

use crate::stats::model::Column;
use crate::tui::ViewState;
use crate::view::{ScatterPlot, ScatterPoint};

/// Label for points without a team.
const NO_TEAM: &str = "--";

/// Marker weight derived from the size column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub fn marker(self) -> Marker {
        match self {
            SizeBucket::Small => Marker::Braille,
            SizeBucket::Medium => Marker::Dot,
            SizeBucket::Large => Marker::Block,
        }
    }
}

/// Points of one team sharing a marker weight.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGroup {
    pub team: String,
    pub bucket: SizeBucket,
    pub points: Vec<(f64, f64)>,
}

/// Render the scatter plot into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(plot) = state.view.as_ref().and_then(|v| v.plot.as_ref()) else {
        let block = Block::default().borders(Borders::ALL).title("Plot");
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let groups = group_points(&plot.points);
    let colors = team_colors(&plot.points);
    let top = leader(&plot.points);
    let top_point: Vec<(f64, f64)> = top.map(|p| vec![(p.x, p.y)]).unwrap_or_default();

    // Name only the first series of each team so the legend lists a team once.
    let mut named = BTreeSet::new();
    let mut datasets: Vec<Dataset> = groups
        .iter()
        .map(|g| {
            let color = colors.get(&g.team).copied().unwrap_or(Color::Gray);
            let mut dataset = Dataset::default()
                .marker(g.bucket.marker())
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(color))
                .data(&g.points);
            if named.insert(g.team.clone()) {
                dataset = dataset.name(g.team.clone());
            }
            dataset
        })
        .collect();

    // Drawn last so it sits on top of its team's series.
    if let Some(p) = top {
        datasets.push(
            Dataset::default()
                .name(p.name.clone())
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .data(&top_point),
        );
    }

    let xs: Vec<f64> = plot.points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = plot.points.iter().map(|p| p.y).collect();
    let x_bounds = axis_bounds(&xs);
    let y_bounds = axis_bounds(&ys);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(chart_title(plot, top)),
        )
        .x_axis(
            Axis::default()
                .title(plot.x.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(plot.x, x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(plot.y.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(plot.y, y_bounds)),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 2)));

    frame.render_widget(chart, area);
}

fn chart_title(plot: &ScatterPlot, top: Option<&ScatterPoint>) -> String {
    let mut title = format!("{} (marker: {})", plot.title, plot.size.as_str());
    if let Some(p) = top {
        title.push_str(&format!(" | top {}: {}", plot.y.as_str(), p.name));
    }
    title
}

/// The point with the highest y value; the first one wins ties.
pub fn leader(points: &[ScatterPoint]) -> Option<&ScatterPoint> {
    points.iter().reduce(|best, p| if p.y > best.y { p } else { best })
}

/// Group points by team and size bucket. Groups come out ordered by team,
/// then bucket.
pub fn group_points(points: &[ScatterPoint]) -> Vec<PointGroup> {
    let max_size = points
        .iter()
        .filter_map(|p| p.size)
        .filter(|s| s.is_finite())
        .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |m| m.max(s))));

    let mut groups: BTreeMap<(String, SizeBucket), Vec<(f64, f64)>> = BTreeMap::new();
    for p in points {
        let team = p.team.clone().unwrap_or_else(|| NO_TEAM.to_string());
        let bucket = size_bucket(p.size, max_size);
        groups.entry((team, bucket)).or_default().push((p.x, p.y));
    }

    groups
        .into_iter()
        .map(|((team, bucket), points)| PointGroup {
            team,
            bucket,
            points,
        })
        .collect()
}

/// Bucket a size value relative to the largest size in the plot. Missing or
/// non-positive maxima fall into the middle bucket.
pub fn size_bucket(size: Option<f64>, max_size: Option<f64>) -> SizeBucket {
    let (Some(size), Some(max)) = (size, max_size) else {
        return SizeBucket::Medium;
    };
    if !size.is_finite() || max <= 0.0 {
        return SizeBucket::Medium;
    }
    let ratio = size / max;
    if ratio < 1.0 / 3.0 {
        SizeBucket::Small
    } else if ratio < 2.0 / 3.0 {
        SizeBucket::Medium
    } else {
        SizeBucket::Large
    }
}

/// Assign each team a distinct color, evenly spaced around the hue wheel.
pub fn team_colors(points: &[ScatterPoint]) -> BTreeMap<String, Color> {
    let teams: BTreeSet<String> = points
        .iter()
        .map(|p| p.team.clone().unwrap_or_else(|| NO_TEAM.to_string()))
        .collect();
    let n = teams.len();
    teams
        .into_iter()
        .enumerate()
        .map(|(i, team)| {
            let color = if team == NO_TEAM {
                Color::Gray
            } else {
                team_color(i, n)
            };
            (team, color)
        })
        .collect()
}

/// The `index`th of `count` evenly spaced hues.
pub fn team_color(index: usize, count: usize) -> Color {
    let hue = (index as f32 / count.max(1) as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color::Rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Axis bounds padded by 5% of the span. A single value gets a unit-wide
/// window; no values gives [0, 1].
pub fn axis_bounds(values: &[f64]) -> [f64; 2] {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return [0.0, 1.0];
    }
    let span = max - min;
    if span == 0.0 {
        return [min - 0.5, max + 0.5];
    }
    let pad = span * 0.05;
    [min - pad, max + pad]
}

fn axis_labels(column: Column, bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(|v| {
            Span::styled(
                format_axis_value(column, v),
                Style::default().add_modifier(Modifier::BOLD),
            )
        })
        .collect()
}

fn format_axis_value(column: Column, value: f64) -> String {
    match column {
        Column::AVG | Column::OPS | Column::OBP | Column::SLG => format!("{value:.3}"),
        Column::WAR => format!("{value:.1}"),
        _ => format!("{value:.0}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
