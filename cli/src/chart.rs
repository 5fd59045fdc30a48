use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Padding, Paragraph},
};
use weekprofile_core::{ValueSource, Weekday, WeeklyProfile};

use crate::report::describe_source;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    observed: Color,
    interpolated: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    observed: Color::Green,
    interpolated: Color::Yellow,
};

pub struct ChartApp {
    pub profile: WeeklyProfile,
    pub selected: Weekday,
}

impl ChartApp {
    pub fn new(profile: WeeklyProfile) -> Self {
        Self {
            profile,
            selected: Weekday::Mon,
        }
    }

    pub fn next_day(&mut self) {
        self.selected = self.selected.succ();
    }

    pub fn previous_day(&mut self) {
        self.selected = self.selected.pred();
    }

    /// Bar heights shifted so the smallest value still shows as one unit;
    /// BarChart cannot draw below zero.
    pub fn bar_heights(&self) -> [u64; 7] {
        let values = self.profile.values();
        let min = values.iter().copied().min().unwrap_or(0) as i128;
        values.map(|v| u64::try_from(v as i128 - min + 1).unwrap_or(u64::MAX))
    }
}

/// Runs its closure on drop, so the terminal is restored on every exit path.
struct RestoreGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

pub fn run(profile: WeeklyProfile) -> Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let _restore = RestoreGuard::new(restore_terminal);
    execute!(io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = ChartApp::new(profile);
    let res = event_loop(&mut terminal, &mut app);
    terminal.show_cursor()?;

    res
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut ChartApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &ChartApp) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + Sidebar
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    let title = Paragraph::new(Span::styled(
        "WEEKLY PROFILE",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(THEME.muted))
            .padding(Padding::new(0, 0, 1, 0)),
    );
    frame.render_widget(title, main_layout[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Chart
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(30), // Info Panel
        ])
        .split(main_layout[1]);

    draw_chart(frame, app, content_chunks[0]);
    draw_info_panel(frame, app, content_chunks[2]);

    let help = Line::from(vec![
        Span::styled("DAY: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(
        Paragraph::new(help).alignment(Alignment::Center),
        main_layout[2],
    );
}

fn draw_chart(frame: &mut Frame, app: &ChartApp, area: Rect) {
    let heights = app.bar_heights();

    let bars: Vec<Bar> = app
        .profile
        .entries()
        .iter()
        .zip(heights)
        .map(|(entry, height)| {
            let color = if entry.is_observed() { THEME.observed } else { THEME.interpolated };
            let mut style = Style::default().fg(color);
            if entry.weekday == app.selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Bar::default()
                .label(entry.weekday.as_str())
                .value(height)
                .style(style)
                .text_value(entry.value.to_string())
        })
        .collect();

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(" Mon - Sun ");

    let chart = BarChart::default()
        .block(chart_block)
        .bar_width(6)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn draw_info_panel(frame: &mut Frame, app: &ChartApp, area: Rect) {
    let entry = app.profile.entry(app.selected);
    let source_color = match entry.source {
        ValueSource::Observed { .. } => THEME.observed,
        ValueSource::Interpolated { .. } => THEME.interpolated,
    };

    let info_text = vec![
        Line::from(vec![Span::styled(
            entry.weekday.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Value:  ", Style::default().fg(THEME.muted)),
            Span::styled(entry.value.to_string(), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Source: ", Style::default().fg(THEME.muted)),
            Span::styled(describe_source(&entry.source), Style::default().fg(source_color)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Week total: ", Style::default().fg(THEME.muted)),
            Span::styled(app.profile.total().to_string(), Style::default().fg(THEME.text)),
        ]),
    ];

    let info = Paragraph::new(info_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Day "),
    );
    frame.render_widget(info, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use weekprofile_core::{build_weekly_profile, ObservationSet};

    fn app() -> ChartApp {
        let set: ObservationSet = [("2023-11-06", -10), ("2023-11-10", 20), ("2023-11-12", 40)]
            .into_iter()
            .collect();
        ChartApp::new(build_weekly_profile(&set).unwrap())
    }

    #[test]
    fn test_cursor_wraps_around_the_week() {
        let mut app = app();
        app.previous_day();
        assert_eq!(app.selected, Weekday::Sun);
        app.next_day();
        app.next_day();
        assert_eq!(app.selected, Weekday::Tue);
    }

    #[test]
    fn test_bar_heights_are_shifted_above_zero() {
        let app = app();
        let heights = app.bar_heights();
        // Mon is the minimum (-10)
        assert_eq!(heights[0], 1);
        assert_eq!(heights[6], 51);
        assert!(heights.iter().all(|h| *h >= 1));
    }

    #[test]
    fn test_restore_guard_runs_when_setup_fails() {
        let restored = Cell::new(false);
        let setup = || -> Result<()> {
            let _restore = RestoreGuard::new(|| restored.set(true));
            anyhow::bail!("backend unavailable");
        };

        assert!(setup().is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_restore_guard_runs_once() {
        let calls = Cell::new(0);
        {
            let _restore = RestoreGuard::new(|| calls.set(calls.get() + 1));
        }
        assert_eq!(calls.get(), 1);
    }
}
