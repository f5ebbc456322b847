/*
* Clockwise TUI App Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module contains the application session for the Clockwise TUI.
* It owns the timer and stopwatch and mediates every change made to them.
*/

use ratatui::widgets::ListState;
use tracing::{debug, info};
use tui_input::Input;

use crate::{
    config::{Config, Preset, Settings, TimeFormat},
    format::{format_time, format_time_natural, parse_time_input},
    models::{Stopwatch, StopwatchState, Timer, TimerState},
};

/// Which panel keyboard actions apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Timer,
    Stopwatch,
}

/// Application mode enum for the UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiMode {
    /// Normal mode for controlling the timer and stopwatch
    Normal,
    /// Help screen mode
    Help,
    /// Preset selection popup
    Presets,
    /// New timer form
    NewTimer,
}

/// Input field of the new timer form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewTimerField {
    Name,
    Duration,
}

/// Main application state structure
pub struct App {
    /// Whether the application is still running
    pub running: bool,

    pub timer: Timer,

    pub stopwatch: Stopwatch,

    /// Panel that receives start/pause/reset
    pub focus: Focus,

    /// Current UI mode
    pub mode: TuiMode,

    pub settings: Settings,

    /// Presets offered in the preset popup
    pub presets: Vec<Preset>,

    /// Preset list state for UI rendering
    pub preset_state: ListState,

    /// New timer form: name field
    pub name_input: Input,

    /// New timer form: duration field
    pub duration_input: Input,

    /// New timer form: field being edited
    pub active_field: NewTimerField,

    /// Status message to display to the user
    pub status_message: String,

    /// Highlight phase of the completion alert, flipped every tick
    pub alert_on: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            running: true,
            timer: Timer::default(),
            stopwatch: Stopwatch::new(),
            focus: Focus::Timer,
            mode: TuiMode::Normal,
            settings: config.settings.clone(),
            presets: config.preset_list(),
            preset_state: ListState::default(),
            name_input: Input::default(),
            duration_input: Input::default(),
            active_field: NewTimerField::Name,
            status_message: "Welcome to Clockwise! Press '?' for help.".to_string(),
            alert_on: false,
        }
    }

    /// Restore a previous session; restored models are always paused
    pub fn restore(&mut self, timer: Option<TimerState>, stopwatch: Option<StopwatchState>) {
        if let Some(state) = timer {
            self.timer.set_state(state);
            self.timer.pause();
        }
        if let Some(state) = stopwatch {
            self.stopwatch.set_state(state);
            self.stopwatch.pause();
        }
        info!(
            timer = %self.timer.name,
            remaining = self.timer.remaining,
            elapsed = self.stopwatch.elapsed,
            "session restored"
        );
    }

    /// Advance both models by one second
    pub fn tick(&mut self) {
        let was_completed = self.timer.completed;

        self.timer.tick();
        self.stopwatch.tick();

        if self.timer.completed {
            if !was_completed {
                info!(timer = %self.timer.name, "timer completed");
                self.status_message =
                    format!("{} finished! Press [d] to dismiss.", self.timer.name);
            }
            self.alert_on = !self.alert_on;
        } else {
            self.alert_on = false;
        }
    }

    /// Switch focus between the timer and the stopwatch
    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Timer => Focus::Stopwatch,
            Focus::Stopwatch => Focus::Timer,
        };
    }

    /// Start or pause the focused panel
    pub fn toggle_active(&mut self) {
        match self.focus {
            Focus::Timer => {
                if self.timer.remaining == 0 {
                    self.status_message =
                        "Timer has no time left. Pick a preset [p] or a new timer [n].".to_string();
                    return;
                }
                self.timer.toggle();
                self.status_message = if self.timer.running {
                    format!("{} started", self.timer.name)
                } else {
                    format!("{} paused", self.timer.name)
                };
            }
            Focus::Stopwatch => {
                self.stopwatch.toggle();
                self.status_message = if self.stopwatch.running {
                    "Stopwatch started".to_string()
                } else {
                    "Stopwatch paused".to_string()
                };
            }
        }
    }

    /// Reset the focused panel
    pub fn reset_active(&mut self) {
        match self.focus {
            Focus::Timer => {
                self.timer.reset();
                self.alert_on = false;
                self.status_message = format!("{} reset", self.timer.name);
            }
            Focus::Stopwatch => {
                self.stopwatch.reset();
                self.status_message = "Stopwatch reset".to_string();
            }
        }
    }

    /// Record a stopwatch lap
    pub fn add_lap(&mut self) {
        let laps = self.stopwatch.laps.len();
        self.stopwatch.add_lap();

        if self.stopwatch.laps.len() > laps {
            self.status_message = format!(
                "Lap {} recorded: {}",
                self.stopwatch.laps.len(),
                format_time(self.stopwatch.last_lap_time(), true)
            );
        } else {
            self.status_message = if self.stopwatch.running {
                "Nothing to record yet".to_string()
            } else {
                "Nothing to record yet. Start the stopwatch with [Space].".to_string()
            };
        }
    }

    /// Acknowledge a completed timer by resetting it
    pub fn dismiss_alert(&mut self) {
        if self.timer.completed {
            self.timer.reset();
            self.alert_on = false;
            self.status_message = "Alert dismissed".to_string();
        }
    }

    /// Open the preset popup
    pub fn open_presets(&mut self) {
        if self.presets.is_empty() {
            self.status_message = "No presets configured".to_string();
            return;
        }
        self.focus = Focus::Timer;
        self.preset_state.select(Some(0));
        self.mode = TuiMode::Presets;
    }

    /// Move the preset selection down, wrapping around
    pub fn next_preset(&mut self) {
        let len = self.presets.len();
        if len > 0 {
            let i = self
                .preset_state
                .selected()
                .map_or(0, |i| if i < len - 1 { i + 1 } else { 0 });
            self.preset_state.select(Some(i));
        }
    }

    /// Move the preset selection up, wrapping around
    pub fn previous_preset(&mut self) {
        let len = self.presets.len();
        if len > 0 {
            let i = self
                .preset_state
                .selected()
                .map_or(0, |i| if i > 0 { i - 1 } else { len - 1 });
            self.preset_state.select(Some(i));
        }
    }

    /// Load the selected preset into the timer and close the popup
    pub fn apply_selected_preset(&mut self) {
        let Some(preset) = self
            .preset_state
            .selected()
            .and_then(|index| self.presets.get(index))
            .cloned()
        else {
            return;
        };

        debug!(preset = %preset.name, duration = preset.duration, "applying preset");
        self.timer.set_duration(preset.duration, preset.name.clone());
        self.alert_on = false;
        self.mode = TuiMode::Normal;
        self.status_message = format!(
            "Timer set to {} ({})",
            preset.name,
            format_time_natural(preset.duration)
        );
    }

    /// Open the new timer form with empty fields
    pub fn open_new_timer(&mut self) {
        self.focus = Focus::Timer;
        self.name_input = Input::default();
        self.duration_input = Input::default();
        self.active_field = NewTimerField::Name;
        self.mode = TuiMode::NewTimer;
    }

    /// Move between the name and duration fields
    pub fn switch_field(&mut self) {
        self.active_field = match self.active_field {
            NewTimerField::Name => NewTimerField::Duration,
            NewTimerField::Duration => NewTimerField::Name,
        };
    }

    /// The field currently receiving keystrokes
    pub fn active_input(&mut self) -> &mut Input {
        match self.active_field {
            NewTimerField::Name => &mut self.name_input,
            NewTimerField::Duration => &mut self.duration_input,
        }
    }

    /// Validate the new timer form and apply it
    ///
    /// Invalid input leaves the form open with an explanation in the status bar.
    pub fn submit_new_timer(&mut self) -> bool {
        let name = self.name_input.value().trim().to_string();
        let duration_text = self.duration_input.value().trim().to_string();

        if name.is_empty() {
            self.status_message = "Please enter a timer name".to_string();
            self.active_field = NewTimerField::Name;
            return false;
        }
        if duration_text.is_empty() {
            self.status_message = "Please enter a duration".to_string();
            self.active_field = NewTimerField::Duration;
            return false;
        }

        let duration = match parse_time_input(&duration_text) {
            Ok(duration) => duration,
            Err(err) => {
                self.status_message = format!("Invalid duration format: {}", err);
                self.active_field = NewTimerField::Duration;
                return false;
            }
        };
        if duration == 0 {
            self.status_message = "Duration must be greater than 0".to_string();
            self.active_field = NewTimerField::Duration;
            return false;
        }

        info!(timer = %name, duration, "new timer");
        self.timer.set_duration(duration, name);
        self.alert_on = false;
        self.mode = TuiMode::Normal;
        self.status_message = format!(
            "Timer set to {} ({})",
            self.timer.name,
            format_time_natural(duration)
        );
        true
    }

    /// Remaining time as configured by `time_format`
    pub fn timer_display(&self) -> String {
        self.format_duration(self.timer.remaining)
    }

    /// Format a duration as configured by `time_format`
    pub fn format_duration(&self, seconds: u64) -> String {
        match self.settings.time_format {
            TimeFormat::Digital => format_time(seconds, true),
            TimeFormat::Natural => format_time_natural(seconds),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlertStyle;

    fn app() -> App {
        App::new(&Config::default())
    }

    fn type_into(input: &mut Input, text: &str) {
        *input = Input::new(text.to_string());
    }

    #[test]
    fn test_tick_drives_both_models() {
        let mut app = app();
        app.timer.set_duration(10, "T");
        app.timer.start();
        app.stopwatch.start();

        app.tick();
        app.tick();
        assert_eq!(app.timer.remaining, 8);
        assert_eq!(app.stopwatch.elapsed, 2);
    }

    #[test]
    fn test_completion_sets_status_and_flashes() {
        let mut app = app();
        app.timer.set_duration(1, "Tea");
        app.toggle_active();

        app.tick();
        assert!(app.timer.completed);
        assert!(app.alert_on);
        assert!(app.status_message.contains("Tea finished"));

        app.tick();
        assert!(!app.alert_on);

        app.dismiss_alert();
        assert!(!app.timer.completed);
        assert_eq!(app.timer.remaining, 1);
    }

    #[test]
    fn test_focus_routes_actions() {
        let mut app = app();
        app.timer.set_duration(30, "T");

        app.toggle_active();
        assert!(app.timer.running);
        assert!(!app.stopwatch.running);

        app.switch_focus();
        assert_eq!(app.focus, Focus::Stopwatch);
        app.toggle_active();
        assert!(app.stopwatch.running);

        app.tick();
        app.reset_active();
        assert_eq!(app.stopwatch.elapsed, 0);
        assert_eq!(app.timer.remaining, 29);
    }

    #[test]
    fn test_toggle_empty_timer_explains() {
        let mut app = app();
        app.toggle_active();
        assert!(!app.timer.running);
        assert!(app.status_message.contains("no time left"));
    }

    #[test]
    fn test_add_lap() {
        let mut app = app();
        app.add_lap();
        assert!(app.stopwatch.laps.is_empty());
        assert!(app.status_message.starts_with("Nothing to record yet"));

        app.stopwatch.start();
        app.add_lap();
        assert!(app.stopwatch.laps.is_empty());
        assert_eq!(app.status_message, "Nothing to record yet");

        app.tick();
        app.add_lap();
        assert_eq!(app.stopwatch.laps, vec![1]);
        assert!(app.status_message.starts_with("Lap 1"));
    }

    #[test]
    fn test_apply_preset() {
        let mut app = app();
        app.switch_focus();
        app.open_presets();
        assert_eq!(app.mode, TuiMode::Presets);
        assert_eq!(app.focus, Focus::Timer);

        app.previous_preset();
        let expected = app.presets[app.presets.len() - 1].clone();
        app.apply_selected_preset();

        assert_eq!(app.mode, TuiMode::Normal);
        assert_eq!(app.timer.name, expected.name);
        assert_eq!(app.timer.remaining, expected.duration);
        assert!(!app.timer.running);
    }

    #[test]
    fn test_preset_navigation_wraps() {
        let mut app = app();
        app.open_presets();
        for _ in 0..app.presets.len() {
            app.next_preset();
        }
        assert_eq!(app.preset_state.selected(), Some(0));
    }

    #[test]
    fn test_open_presets_without_presets() {
        let mut config = Config::default();
        config.presets.clear();
        let mut app = App::new(&config);
        app.open_presets();
        assert_eq!(app.mode, TuiMode::Normal);
    }

    #[test]
    fn test_submit_new_timer() {
        let mut app = app();
        app.open_new_timer();
        type_into(&mut app.name_input, "Tea Timer");
        type_into(&mut app.duration_input, "1h30m");

        assert!(app.submit_new_timer());
        assert_eq!(app.mode, TuiMode::Normal);
        assert_eq!(app.timer.name, "Tea Timer");
        assert_eq!(app.timer.duration, 5400);
    }

    #[test]
    fn test_submit_new_timer_rejects_bad_input() {
        let mut app = app();
        app.open_new_timer();

        assert!(!app.submit_new_timer());
        assert_eq!(app.status_message, "Please enter a timer name");

        type_into(&mut app.name_input, "Tea");
        assert!(!app.submit_new_timer());
        assert_eq!(app.active_field, NewTimerField::Duration);

        type_into(&mut app.duration_input, "1:2:3:4");
        assert!(!app.submit_new_timer());
        assert!(app.status_message.starts_with("Invalid duration format"));

        type_into(&mut app.duration_input, "0");
        assert!(!app.submit_new_timer());
        assert_eq!(app.status_message, "Duration must be greater than 0");

        assert_eq!(app.mode, TuiMode::NewTimer);
        assert_eq!(app.timer, Timer::default());
    }

    #[test]
    fn test_restore_pauses_models() {
        let mut timer = Timer::new(60, "Saved");
        timer.start();
        timer.tick();
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        stopwatch.tick();

        let mut app = app();
        app.restore(Some(timer.state()), Some(stopwatch.state()));
        assert_eq!(app.timer.remaining, 59);
        assert_eq!(app.timer.name, "Saved");
        assert!(!app.timer.running);
        assert_eq!(app.stopwatch.elapsed, 1);
        assert!(!app.stopwatch.running);
    }

    #[test]
    fn test_natural_time_format() {
        let mut config = Config::default();
        config.settings.time_format = TimeFormat::Natural;
        config.settings.alert_style = AlertStyle::Border;
        let mut app = App::new(&config);
        app.timer.set_duration(330, "T");
        assert_eq!(app.timer_display(), "5m 30s");

        app.settings.time_format = TimeFormat::Digital;
        assert_eq!(app.timer_display(), "00:05:30");
    }
}
