//! Ratatui-based terminal UI.
//!
//! The TUI provides selectable commodity controls, the rendered price chart
//! with a bottom legend, and an inspect cursor that steps through observed
//! dates showing both currency values per series (the tooltip surface).

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{RunOutput, build_run};
use crate::chart::{date_bounds, fmt_inr_tick, fmt_month, observed_dates, tooltip_at, usd_bounds};
use crate::data::DataSource;
use crate::domain::{AppState, ChartConfig};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::PriceChart;

/// Start the TUI.
pub fn run(config: ChartConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
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

struct App {
    source: DataSource,
    state: AppState,
    run: Option<RunOutput>,
    /// Index into the observed dates of the current build, when inspecting.
    cursor: Option<usize>,
    status: String,
}

impl App {
    fn new(config: ChartConfig) -> Self {
        let mut app = Self {
            source: DataSource::resolve(config.data.as_deref()),
            state: AppState::default(),
            run: None,
            cursor: None,
            status: String::new(),
        };
        app.reload(config.commodity.as_deref());
        app
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
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
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

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                self.state.select_prev();
                self.rebuild();
                if let Some(c) = self.state.selected_commodity() {
                    self.status = format!("commodity: {c}");
                }
            }
            KeyCode::Down => {
                self.state.select_next();
                self.rebuild();
                if let Some(c) = self.state.selected_commodity() {
                    self.status = format!("commodity: {c}");
                }
            }
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Esc => {
                self.cursor = None;
                self.status = "Inspect cleared.".to_string();
            }
            KeyCode::Char('r') => self.reload(None),
            KeyCode::Char('d') => {
                if let Some(run) = &self.run {
                    match crate::debug::write_debug_bundle(run) {
                        Ok(path) => {
                            self.status = format!("Wrote debug bundle: {}", path.display());
                        }
                        Err(err) => {
                            self.status = format!("Debug write failed: {err}");
                        }
                    }
                } else {
                    self.status = "No data loaded.".to_string();
                }
            }
            _ => {}
        }

        false
    }

    /// The load boundary: one retrieval, and failures become a status-line
    /// diagnostic with the chart left unrendered. No retry.
    fn reload(&mut self, preferred: Option<&str>) {
        self.status = format!("Loading {}...", self.source.label());
        match self.source.load() {
            Ok(records) => {
                let n = records.len();
                self.state.set_records(records, preferred);
                self.rebuild();
                self.status = format!("Loaded {n} records from {}", self.source.label());
            }
            Err(err) => {
                self.run = None;
                self.status = format!("Load failed: {err}");
            }
        }
    }

    /// Full series rebuild from the in-memory records (selection changed or
    /// records replaced).
    fn rebuild(&mut self) {
        let run = build_run(
            &self.state.records,
            self.state.selected_commodity(),
            &self.source.label(),
        );
        let n_dates = observed_dates(&run.series).len();
        self.cursor = match (self.cursor, n_dates) {
            (Some(_), 0) => None,
            (Some(i), n) => Some(i.min(n - 1)),
            (None, _) => None,
        };
        self.run = Some(run);
    }

    fn move_cursor(&mut self, delta: i64) {
        let Some(run) = &self.run else {
            return;
        };
        let dates = observed_dates(&run.series);
        if dates.is_empty() {
            self.status = "No dates to inspect.".to_string();
            return;
        }

        let last = dates.len() - 1;
        let next = match self.cursor {
            // Start inspecting at the most recent observation.
            None => last,
            Some(i) if delta >= 0 => (i + 1).min(last),
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(next);
        self.status = format!("Inspecting {}", fmt_month(dates[next]));
    }

    fn cursor_date(&self) -> Option<NaiveDate> {
        let run = self.run.as_ref()?;
        let i = self.cursor?;
        observed_dates(&run.series).get(i).copied()
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("pw", Style::default().fg(Color::Cyan)),
            Span::raw(" - commodity price lines"),
        ]));

        if let Some(run) = &self.run {
            lines.push(Line::from(Span::styled(
                format!(
                    "source: {} | commodity: {} | records: {} | series: {} | points: {} (dropped {})",
                    self.source.label(),
                    run.commodity,
                    run.stats.records_total,
                    run.stats.n_series,
                    run.stats.points_used,
                    run.stats.points_dropped,
                ),
                Style::default().fg(Color::Gray),
            )));

            if let Some([d0, d1]) = date_bounds(&run.series) {
                lines.push(Line::from(Span::styled(
                    format!("span: {} to {}", fmt_month(d0), fmt_month(d1)),
                    Style::default().fg(Color::Gray),
                )));
            }
        } else {
            lines.push(Line::from(Span::styled(
                format!("source: {} | no data", self.source.label()),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(9)])
            .split(area);

        self.draw_chart(frame, chunks[0]);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20),
                Constraint::Min(0),
                Constraint::Length(36),
            ])
            .split(chunks[1]);

        self.draw_commodities(frame, panels[0]);
        self.draw_legend(frame, panels[1]);
        self.draw_inspect(frame, panels[2]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Price Lines").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No data loaded.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        if run.series.is_empty() {
            let msg = Paragraph::new(format!("No plottable records for '{}'.", run.commodity))
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        }

        let (Some(x_bounds), Some(y_bounds)) = (date_bounds(&run.series), usd_bounds(&run.series))
        else {
            return;
        };

        let (chart_rect, has_insets) = chart_layout(inner);
        let widget = PriceChart {
            datasets: &run.chart.datasets,
            x_bounds,
            y_bounds,
            x_label: "month",
            y_label: "usd/kg",
            cursor: self.cursor_date(),
        };

        frame.render_widget(widget, chart_rect);
        if has_insets {
            draw_inr_axis(frame, inner, chart_rect, y_bounds);
        }
    }

    fn draw_commodities(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = if self.state.commodities.is_empty() {
            vec![ListItem::new("(none)")]
        } else {
            self.state
                .commodities
                .iter()
                .map(|c| ListItem::new(c.clone()))
                .collect()
        };

        let list = List::new(items)
            .block(Block::default().title("Commodity").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        if !self.state.commodities.is_empty() {
            state.select(Some(self.state.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    /// Bottom legend with point-style markers, one entry per series.
    fn draw_legend(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        if let Some(run) = &self.run {
            for s in &run.series {
                let marker_style =
                    Style::default().fg(Color::Rgb(s.color.r, s.color.g, s.color.b));
                let mut spans = vec![
                    Span::styled("● ", marker_style),
                    Span::raw(s.label()),
                ];
                if s.is_dashed() {
                    spans.push(Span::styled(" (dashed)", Style::default().fg(Color::Gray)));
                }
                lines.push(Line::from(spans));
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "(no series)",
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Legend").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    /// Tooltip surface: formatted date plus both currency values per series.
    fn draw_inspect(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        match (self.run.as_ref(), self.cursor_date()) {
            (Some(run), Some(date)) => {
                lines.push(Line::from(Span::styled(
                    fmt_month(date),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for entry in tooltip_at(&run.series, date) {
                    lines.push(Line::from(entry.label));
                    lines.push(Line::from(format!("  {}", entry.usd)));
                    lines.push(Line::from(format!("  {}", entry.inr)));
                }
            }
            _ => {
                lines.push(Line::from(Span::styled(
                    "←/→ to step through dates",
                    Style::default().fg(Color::Gray),
                )));
            }
        }

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Inspect").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ commodity  ←/→ inspect  Esc clear  r reload  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Right-margin reservation for the INR tick labels.
const INR_AXIS_WIDTH: u16 = 9;

fn chart_layout(inner: Rect) -> (Rect, bool) {
    if inner.width <= INR_AXIS_WIDTH + 20 || inner.height <= 8 {
        return (inner, false);
    }

    let rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width - INR_AXIS_WIDTH,
        height: inner.height,
    };

    (rect, true)
}

/// Draw the secondary (INR) axis ticks in the right margin.
///
/// Tick values are the USD tick times the fixed conversion factor; the
/// per-point INR values shown in the inspect panel come straight from the
/// records instead.
fn draw_inr_axis(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    y_bounds: [f64; 2],
) {
    let style = Style::default().fg(Color::Gray);
    let x = chart.x + chart.width;

    // The Plotters plot area sits inside the widget rect: one margin row on
    // top, three label rows plus the margin at the bottom.
    let plot_top = chart.y + 1;
    let plot_bottom = chart.y + chart.height.saturating_sub(4);
    if plot_bottom <= plot_top {
        return;
    }

    let title = Paragraph::new("inr/kg").style(style.add_modifier(Modifier::BOLD));
    frame.render_widget(
        title,
        Rect {
            x,
            y: inner.y,
            width: INR_AXIS_WIDTH.min(inner.x + inner.width - x),
            height: 1,
        },
    );

    let ticks = 5usize;
    let span = (plot_bottom - plot_top) as f64;
    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let row = plot_bottom - (u * span).round() as u16;
        let label = fmt_inr_tick(y_val);
        let width = (label.chars().count() as u16).min(inner.x + inner.width - x);
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x,
                y: row,
                width,
                height: 1,
            },
        );
    }
}
