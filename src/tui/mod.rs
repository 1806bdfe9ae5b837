//! Ratatui-based terminal UI.
//!
//! The TUI is a thin host around `FitSession`: key presses become degree and
//! selection events, and every frame is drawn from the last `DisplayState`.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};
use tracing::debug;

use crate::app::pipeline::{OpenedSession, open_session};
use crate::domain::{DisplayState, PlotBounds, SessionConfig};
use crate::error::{AppError, FitError};

mod plotters_chart;

use plotters_chart::{FitPlottersChart, visible_segments};

/// Where `e` writes the session snapshot.
const SNAPSHOT_PATH: &str = "lsq_snapshot.json";

/// Start the TUI.
pub fn run(config: &SessionConfig) -> Result<(), AppError> {
    // Load data before touching the terminal so input errors print normally.
    let opened = open_session(config)?;
    let mut app = App::new(opened);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    DegreeDown,
    DegreeUp,
    CursorPrev,
    CursorNext,
    TogglePoint,
    SelectAll,
    ClearSelection,
    Export,
}

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('-') => Some(Action::DegreeDown),
        KeyCode::Right | KeyCode::Char('+') => Some(Action::DegreeUp),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorNext),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::TogglePoint),
        KeyCode::Char('a') => Some(Action::SelectAll),
        KeyCode::Char('c') => Some(Action::ClearSelection),
        KeyCode::Char('e') => Some(Action::Export),
        _ => None,
    }
}

struct App {
    opened: OpenedSession,
    state: DisplayState,
    bounds: PlotBounds,
    cursor: usize,
    status: String,
}

impl App {
    fn new(opened: OpenedSession) -> Self {
        let state = opened.session.display_state();
        let bounds = PlotBounds::from_points(opened.session.points()).unwrap_or(PlotBounds {
            x: [0.0, 10.0],
            y: [0.0, 1.0],
        });
        let status = if opened.skipped_rows > 0 {
            format!("Loaded {} (skipped {} row(s)).", opened.source_label, opened.skipped_rows)
        } else {
            format!("Loaded {}.", opened.source_label)
        };
        Self {
            opened,
            state,
            bounds,
            cursor: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let Some(action) = action_for(key.code) else {
                        continue;
                    };
                    if action == Action::Quit {
                        break;
                    }
                    self.apply(action);
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Run one action against the session. Session errors only reach the status line.
    fn apply(&mut self, action: Action) {
        let n_points = self.opened.session.points().len();
        let session = &mut self.opened.session;

        let outcome: Result<Option<DisplayState>, FitError> = match action {
            Action::Quit => Ok(None),
            Action::DegreeDown => session.step_degree(-1).map(Some),
            Action::DegreeUp => session.step_degree(1).map(Some),
            Action::CursorPrev => {
                self.cursor = self.cursor.saturating_sub(1);
                Ok(None)
            }
            Action::CursorNext => {
                self.cursor = (self.cursor + 1).min(n_points.saturating_sub(1));
                Ok(None)
            }
            Action::TogglePoint => session.toggle_point(self.cursor).map(Some),
            Action::SelectAll => session.select_all().map(Some),
            Action::ClearSelection => session.clear_selection().map(Some),
            Action::Export => {
                let path = PathBuf::from(SNAPSHOT_PATH);
                self.status = match crate::io::export::write_snapshot_json(&path, session) {
                    Ok(()) => format!("Wrote {}", path.display()),
                    Err(err) => format!("Export failed: {err}"),
                };
                Ok(None)
            }
        };

        match outcome {
            Ok(Some(state)) => {
                debug!(?action, degree = state.degree, "display state refreshed");
                self.status = format!(
                    "degree {} | selected {} point(s)",
                    state.degree,
                    self.opened.session.selection().len()
                );
                self.state = state;
            }
            Ok(None) => {}
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let session = &self.opened.session;
        let lines = vec![
            Line::from(vec![
                Span::styled("lsq", Style::default().fg(Color::Cyan)),
                Span::raw(" - Least Squares Fitting"),
            ]),
            Line::from(Span::styled(
                format!(
                    "data: {} | n={} | degree: {} of {}",
                    self.opened.source_label,
                    self.opened.stats.n_points,
                    self.state.degree,
                    session.max_degree(),
                ),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!("y = {}", self.state.formula),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(28)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_errors(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Data and fit").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = chart_series(&self.opened, &self.state, self.cursor, self.bounds);
        let widget = FitPlottersChart {
            curve_segments: &series.curve_segments,
            points: &series.points,
            selected: &series.selected,
            cursor: series.cursor,
            x_bounds: self.bounds.x,
            y_bounds: self.bounds.y,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_errors(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Squared error").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let scale = self.opened.session.error_scale();
        let total = Gauge::default()
            .block(Block::default().title("total").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Blue))
            .ratio(gauge_ratio(self.state.total_error, scale))
            .label(format!("{:.3}", self.state.total_error));
        let selected = Gauge::default()
            .block(Block::default().title("selected").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::LightBlue))
            .ratio(gauge_ratio(self.state.selected_error, scale))
            .label(format!("{:.3}", self.state.selected_error));
        frame.render_widget(total, chunks[0]);
        frame.render_widget(selected, chunks[1]);

        let session = &self.opened.session;
        let point_line = match session.points().get(self.cursor) {
            Some(p) => format!(
                "point {}: ({}, {}){}\nerror: {:.3}",
                self.cursor,
                p.x,
                p.y,
                if session.is_selected(self.cursor) { " *" } else { "" },
                session.errors()[self.cursor],
            ),
            None => "no points".to_string(),
        };
        frame.render_widget(
            Paragraph::new(point_line).style(Style::default().fg(Color::Gray)),
            chunks[2],
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ degree  ↑/↓ point  Space select  a all  c clear  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart series for Plotters.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    curve_segments: Vec<Vec<(f64, f64)>>,
    points: Vec<(f64, f64)>,
    selected: Vec<(f64, f64)>,
    cursor: Option<(f64, f64)>,
}

fn chart_series(opened: &OpenedSession, state: &DisplayState, cursor: usize, bounds: PlotBounds) -> ChartSeries {
    let session = &opened.session;
    let mut points = Vec::new();
    let mut selected = Vec::new();
    for (i, p) in session.points().iter().enumerate() {
        if session.is_selected(i) {
            selected.push((p.x, p.y));
        } else {
            points.push((p.x, p.y));
        }
    }

    ChartSeries {
        curve_segments: visible_segments(&state.curve_samples, bounds.y),
        points,
        selected,
        cursor: session.points().get(cursor).map(|p| (p.x, p.y)),
    }
}

/// Fraction of the error axis filled by `value`, clamped for `Gauge`.
fn gauge_ratio(value: f64, scale: f64) -> f64 {
    if !(value.is_finite() && scale.is_finite()) || scale <= 0.0 {
        return 0.0;
    }
    (value / scale).clamp(0.0, 1.0)
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.1}")
}
