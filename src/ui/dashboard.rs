//! Ratatui dashboard over the aggregation buckets.
//!
//! The dashboard is a single static snapshot: three panels rendered once,
//! then a blocking input loop that waits for `q` or Ctrl-C. No re-render on
//! resize or new data.

use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use tracing::info;

use crate::search::response::{Bucket, SearchResponse};
use crate::timerange::TimeRange;

/// Width/height ratio of the chart panel.
const CHART_ASPECT: f32 = 1.4142;

#[derive(Debug, Clone, Copy)]
pub struct DashboardOpts {
    pub width: u16,
}

/// Everything one frame needs, computed up front from the response.
#[derive(Debug, Clone)]
struct DashboardState {
    query: String,
    start: String,
    end: String,
    total: u64,
    points: Vec<(f64, f64)>,
    max: f64,
    min: f64,
    width: u16,
}

impl DashboardState {
    /// `None` when there are no buckets to draw.
    fn from_response(
        response: &SearchResponse,
        query: &str,
        range: TimeRange,
        width: u16,
    ) -> Option<Self> {
        let points = series(response.buckets());
        if points.is_empty() {
            return None;
        }
        let (max, min) = extremes(&points);
        Some(Self {
            query: query.to_string(),
            start: range.start.to_string(),
            end: range.end.to_string(),
            total: response.hits.total,
            points,
            max,
            min,
            width,
        })
    }
}

/// Per-bucket doc counts as chart points, in response order.
fn series(buckets: &[Bucket]) -> Vec<(f64, f64)> {
    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| (i as f64, bucket.doc_count as f64))
        .collect()
}

/// One-pass max/min over the series values.
fn extremes(points: &[(f64, f64)]) -> (f64, f64) {
    let mut max = points[0].1;
    let mut min = points[0].1;
    for &(_, value) in points {
        if value > max {
            max = value;
        }
        if value < min {
            min = value;
        }
    }
    (max, min)
}

fn chart_height(width: u16) -> u16 {
    ((width as f32 / CHART_ASPECT) as u16) / 3
}

/// Raw mode + alternate screen, restored exactly once on every exit path.
/// Anything that fails after `enable_raw_mode` and before the guard exists
/// has to undo by hand; from construction on, `Drop` owns the release.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode()?;
        match Self::enter() {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(err)
            }
        }
    }

    fn enter() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Renders the dashboard and blocks until quit. With zero buckets this logs
/// a notice and returns without touching the terminal at all.
pub fn render(
    response: &SearchResponse,
    query: &str,
    range: TimeRange,
    opts: DashboardOpts,
) -> Result<()> {
    let Some(state) = DashboardState::from_response(response, query, range, opts.width) else {
        info!("no tps buckets in response; skipping dashboard");
        return Ok(());
    };

    let mut guard = TerminalGuard::acquire()?;
    guard.terminal.draw(|frame| draw(frame, &state))?;
    wait_for_quit()?;
    Ok(())
}

fn draw(frame: &mut Frame, state: &DashboardState) {
    let width = state.width.min(frame.area().width.saturating_sub(1));
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Length(1), // left margin
                Constraint::Length(width),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(frame.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // query info
                Constraint::Length(3), // hit stats
                Constraint::Length(chart_height(width)),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(columns[1]);

    let query_info = Paragraph::new(vec![
        Line::from(format!("Query: {}", state.query)),
        Line::from(format!("Start: {}", state.start)),
        Line::from(format!("End: {}", state.end)),
    ]);
    frame.render_widget(query_info, rows[0]);

    let hit_info = Paragraph::new(vec![
        Line::from(format!("Hits: {}", state.total)),
        Line::from(format!("Max: {:.0}", state.max)),
        Line::from(format!("Min: {:.0}", state.min)),
    ]);
    frame.render_widget(hit_info, rows[1]);

    let datasets = vec![
        Dataset::default()
            .name("docs")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .data(&state.points),
    ];
    let x_max = (state.points.len().saturating_sub(1)).max(1) as f64;
    let y_max = state.max.max(1.0);
    let chart = Chart::new(datasets)
        .block(Block::default().title("TPS").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::White))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::White))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::from("0"),
                    Span::from(format!("{:.0}", y_max / 2.0)),
                    Span::from(format!("{y_max:.0}")),
                ]),
        );
    frame.render_widget(chart, rows[2]);
}

fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Blocks on the event stream until a quit key arrives. Every other event,
/// resize included, is ignored.
fn wait_for_quit() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read()?
            && is_quit(key)
        {
            return Ok(());
        }
    }
}
