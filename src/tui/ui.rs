/*
* Clockwise TUI UI Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module handles the UI rendering for the Clockwise TUI.
* It reads the timer and stopwatch state on every frame and never mutates it.
*/

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::{
    config::AlertStyle,
    format::{format_time, format_time_natural},
    tui::{App, Focus, NewTimerField, TuiMode},
};

const FOCUS_COLOR: Color = Color::Cyan;
const ALERT_COLOR: Color = Color::Green;

/// Main render function for the UI
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Panels
            Constraint::Length(1), // Key hints
            Constraint::Length(1), // Status bar
        ])
        .split(frame.size());

    render_title(frame, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_timer_panel(app, frame, panels[0]);
    render_stopwatch_panel(app, frame, panels[1]);

    render_key_hints(frame, chunks[2]);
    render_status_bar(app, frame, chunks[3]);

    match app.mode {
        TuiMode::Help => render_help_popup(frame),
        TuiMode::Presets => render_presets_popup(app, frame),
        TuiMode::NewTimer => render_new_timer_popup(app, frame),
        TuiMode::Normal => {}
    }
}

/// Render the title bar with the wall clock
fn render_title(frame: &mut Frame, area: Rect) {
    let title_spans = vec![
        Span::styled("Clock", Style::default().fg(Color::Green)),
        Span::styled("wise", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Span::raw(" - Timer & Stopwatch"),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(title_spans)), chunks[0]);
    frame.render_widget(
        Paragraph::new(Local::now().format("%H:%M:%S").to_string()).alignment(Alignment::Right),
        chunks[1],
    );
}

/// Panel block, highlighted when focused
fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
}

/// Render the countdown timer panel
fn render_timer_panel(app: &App, frame: &mut Frame, area: Rect) {
    let timer = &app.timer;
    let mut block = panel_block(" Timer ", app.focus == Focus::Timer);
    let mut time_style = Style::default().add_modifier(Modifier::BOLD);

    if timer.completed {
        match app.settings.alert_style {
            AlertStyle::Flash => {
                if app.alert_on {
                    block = block.style(Style::default().bg(ALERT_COLOR).fg(Color::Black));
                }
            }
            AlertStyle::Border => {
                block = block.border_style(Style::default().fg(ALERT_COLOR));
            }
            AlertStyle::Color => {
                time_style = time_style.fg(ALERT_COLOR);
            }
        }
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Name
            Constraint::Length(3), // Time
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Status
            Constraint::Min(0),
        ])
        .split(inner);

    let name = Paragraph::new(timer.name.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(name, chunks[0]);

    let time = Paragraph::new(vec![Line::from(""), Line::from(app.timer_display())])
        .alignment(Alignment::Center)
        .style(time_style);
    frame.render_widget(time, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(FOCUS_COLOR).bg(Color::DarkGray))
        .ratio(timer.progress().clamp(0.0, 1.0))
        .label(format!("{:.0}%", timer.progress() * 100.0));
    frame.render_widget(gauge, chunks[2]);

    let status = if timer.completed {
        "Completed!".to_string()
    } else if timer.running {
        "Running".to_string()
    } else if timer.duration == 0 {
        "No timer set".to_string()
    } else if timer.is_idle() {
        format!("Ready ({})", format_time_natural(timer.duration))
    } else {
        "Paused".to_string()
    };
    let status = Paragraph::new(status)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(status, chunks[4]);
}

/// Render the stopwatch panel with its lap table
fn render_stopwatch_panel(app: &App, frame: &mut Frame, area: Rect) {
    let stopwatch = &app.stopwatch;
    let block = panel_block(" Stopwatch ", app.focus == Focus::Stopwatch);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Time
            Constraint::Length(1), // Current lap
            Constraint::Length(1), // Status
            Constraint::Min(0),    // Laps
        ])
        .split(inner);

    let time = Paragraph::new(vec![
        Line::from(""),
        Line::from(format_time(stopwatch.elapsed, true)),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(time, chunks[0]);

    let current_lap = Paragraph::new(format!(
        "Current lap: {}   Last lap: {}",
        format_time(stopwatch.current_lap_time(), true),
        format_time(stopwatch.last_lap_time(), true)
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(current_lap, chunks[1]);

    let status = if stopwatch.running {
        "Running"
    } else if stopwatch.elapsed == 0 {
        "Ready"
    } else {
        "Paused"
    };
    let status = Paragraph::new(status)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(status, chunks[2]);

    // Most recent lap first
    let lap_items: Vec<ListItem> = stopwatch
        .lap_splits()
        .rev()
        .map(|lap| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("Lap {:>3}  ", lap.number), Style::default().fg(Color::Yellow)),
                Span::raw(format_time(lap.split, true)),
                Span::styled(
                    format!("  ({})", format_time(lap.cumulative, true)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let laps = List::new(lap_items).block(
        Block::default()
            .title(format!(" Laps ({}) ", stopwatch.laps.len()))
            .borders(Borders::TOP),
    );
    frame.render_widget(laps, chunks[3]);
}

/// Render the key hint line
fn render_key_hints(frame: &mut Frame, area: Rect) {
    let hints = [
        ("q", "Quit"),
        ("?", "Help"),
        ("Tab", "Switch"),
        ("Space", "Start/Pause"),
        ("r", "Reset"),
        ("p", "Presets"),
        ("n", "New Timer"),
        ("l", "Lap"),
        ("d", "Dismiss"),
    ];

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!(" {} ", key), Style::default().fg(Color::Black).bg(Color::Yellow)),
                Span::raw(format!(" {} ", action)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mode_indicator = match app.mode {
        TuiMode::Normal => "[Normal]",
        TuiMode::Help => "[Help]",
        TuiMode::Presets => "[Presets]",
        TuiMode::NewTimer => "[New Timer]",
    };

    let status = format!("{} {}", mode_indicator, app.status_message);
    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::Blue));

    frame.render_widget(status_bar, area);
}

/// Render the preset selection popup
fn render_presets_popup(app: &mut App, frame: &mut Frame) {
    let height = (app.presets.len() as u16).saturating_add(2);
    let area = centered_rect(50, height, frame.size());

    let items: Vec<ListItem> = app
        .presets
        .iter()
        .map(|preset| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", preset.name), Style::default().fg(Color::White)),
                Span::styled(
                    format_time_natural(preset.duration),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let presets = List::new(items)
        .block(
            Block::default()
                .title(" Select Timer Preset ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(presets, area, &mut app.preset_state);
}

/// Render the new timer form
fn render_new_timer_popup(app: &App, frame: &mut Frame) {
    let area = centered_rect(60, 10, frame.size());

    let block = Block::default()
        .title(" Create New Timer ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Duration
            Constraint::Length(2), // Help
        ])
        .split(inner);

    let fields = [
        (NewTimerField::Name, "Timer Name", &app.name_input, chunks[0]),
        (NewTimerField::Duration, "Duration", &app.duration_input, chunks[1]),
    ];

    for (field, title, input, field_area) in fields {
        let active = app.active_field == field;
        let style = if active {
            Style::default().fg(FOCUS_COLOR)
        } else {
            Style::default()
        };

        let widget = Paragraph::new(input.value()).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(style),
        );
        frame.render_widget(widget, field_area);

        if active {
            frame.set_cursor(
                field_area.x + input.visual_cursor() as u16 + 1,
                field_area.y + 1,
            );
        }
    }

    let help = Paragraph::new("Formats: 5m, 1h30m, 90 (seconds), 1:30 (MM:SS)\n[Tab] switch field  [Enter] create  [Esc] cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

/// Render the help popup
fn render_help_popup(frame: &mut Frame) {
    let area = centered_rect(70, 20, frame.size());

    frame.render_widget(Clear, area);

    let help_block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let help_paragraph = Paragraph::new(Text::from(get_help_text()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, area);
}

/// Get help text for the main screen
fn get_help_text() -> Vec<Line<'static>> {
    vec![
        Line::from(vec![Span::styled(
            "Clockwise",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Controls (apply to the focused panel):"),
        Line::from("  [Space]: Start/pause"),
        Line::from("  [r]: Reset"),
        Line::from("  [Tab]: Switch between timer and stopwatch"),
        Line::from(""),
        Line::from("Timer:"),
        Line::from("  [p]: Choose a preset"),
        Line::from("  [n]: Create a new timer"),
        Line::from("  [d]: Dismiss the completion alert"),
        Line::from(""),
        Line::from("Stopwatch:"),
        Line::from("  [l]: Record a lap"),
        Line::from(""),
        Line::from("Other:"),
        Line::from("  [?]: Toggle help"),
        Line::from("  [q]: Quit application"),
    ]
}

/// Create a centered rectangle for popups
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_width = (u32::from(r.width) * u32::from(percent_x) / 100) as u16;
    let popup_height = height.min(r.height);

    let popup_x = (r.width - popup_width) / 2;
    let popup_y = (r.height - popup_height) / 2;

    Rect::new(r.x + popup_x, r.y + popup_y, popup_width, popup_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_render_main_screen() {
        let mut app = App::new(&Config::default());
        app.timer.set_duration(90, "Tea");
        app.stopwatch.start();
        for _ in 0..3 {
            app.tick();
        }
        app.add_lap();

        let screen = draw(&mut app);
        assert!(screen.contains("Tea"));
        assert!(screen.contains("00:01:30"));
        assert!(screen.contains("00:00:03"));
        assert!(screen.contains("Lap   1"));
    }

    #[test]
    fn test_render_popups() {
        let mut app = App::new(&Config::default());
        app.open_presets();
        assert!(draw(&mut app).contains("Pomodoro"));

        app.mode = TuiMode::Help;
        assert!(draw(&mut app).contains("Record a lap"));

        app.open_new_timer();
        assert!(draw(&mut app).contains("Create New Timer"));
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = centered_rect(70, 20, Rect::new(0, 0, 40, 10));
        assert_eq!(area.height, 10);
        assert_eq!(area.width, 28);
    }

    #[test]
    fn test_centered_rect_on_wide_terminal() {
        let area = centered_rect(70, 20, Rect::new(0, 0, 2000, 50));
        assert_eq!(area.width, 1400);
        assert_eq!(area.x, 300);
        assert_eq!(area.y, 15);
    }
}
