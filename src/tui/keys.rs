/*
* Clockwise TUI Key Bindings Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module maps key events to application operations for each UI mode.
*/

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use crate::tui::{App, TuiMode};

/// Dispatch a key event according to the current mode
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Windows reports releases too
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.mode {
        TuiMode::Normal => handle_normal_mode(app, key_event.code),
        TuiMode::Help => match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.mode = TuiMode::Normal;
            }
            _ => {}
        },
        TuiMode::Presets => handle_presets_mode(app, key_event.code),
        TuiMode::NewTimer => handle_new_timer_mode(app, key_event),
    }
}

/// Handle key events while no popup is open
fn handle_normal_mode(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.mode = TuiMode::Help,
        KeyCode::Tab | KeyCode::BackTab => app.switch_focus(),
        KeyCode::Char(' ') => app.toggle_active(),
        KeyCode::Char('r') => app.reset_active(),
        KeyCode::Char('p') => app.open_presets(),
        KeyCode::Char('n') => app.open_new_timer(),
        KeyCode::Char('l') => app.add_lap(),
        KeyCode::Char('d') => app.dismiss_alert(),
        _ => {}
    }
}

/// Handle key events for the preset popup
fn handle_presets_mode(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.previous_preset(),
        KeyCode::Down | KeyCode::Char('j') => app.next_preset(),
        KeyCode::Enter => app.apply_selected_preset(),
        KeyCode::Esc | KeyCode::Char('q') => app.mode = TuiMode::Normal,
        _ => {}
    }
}

/// Handle key events for the new timer form
fn handle_new_timer_mode(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => {
            app.mode = TuiMode::Normal;
            app.status_message = "New timer cancelled".to_string();
        }
        KeyCode::Tab | KeyCode::BackTab => app.switch_field(),
        KeyCode::Enter => {
            app.submit_new_timer();
        }
        // Handle other key events for input editing
        _ => {
            app.active_input().handle_event(&Event::Key(key_event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        tui::{Focus, NewTimerField},
    };

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = App::new(&Config::default());
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, TuiMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, TuiMode::Normal);
        assert!(app.running);
    }

    #[test]
    fn test_stopwatch_bindings() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Stopwatch);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.stopwatch.running);
        app.tick();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.stopwatch.laps, vec![1]);

        press(&mut app, KeyCode::Char('r'));
        assert!(app.stopwatch.laps.is_empty());
    }

    #[test]
    fn test_preset_flow() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.mode, TuiMode::Presets);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let expected = &app.presets[1];
        assert_eq!(app.timer.name, expected.name);
        assert_eq!(app.timer.duration, expected.duration);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.timer.running);
    }

    #[test]
    fn test_new_timer_flow() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, TuiMode::NewTimer);

        // Bindings like 'q' and 'r' are plain text while typing
        type_text(&mut app, "Quiz break");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_field, NewTimerField::Duration);
        type_text(&mut app, "2m");
        press(&mut app, KeyCode::Enter);

        assert!(app.running);
        assert_eq!(app.mode, TuiMode::Normal);
        assert_eq!(app.timer.name, "Quiz break");
        assert_eq!(app.timer.duration, 120);
    }

    #[test]
    fn test_new_timer_cancel() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Tea");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, TuiMode::Normal);
        assert_eq!(app.timer.name, "Timer");
    }

    #[test]
    fn test_dismiss_binding() {
        let mut app = App::new(&Config::default());
        app.timer.set_duration(1, "T");
        press(&mut app, KeyCode::Char(' '));
        app.tick();
        assert!(app.timer.completed);

        press(&mut app, KeyCode::Char('d'));
        assert!(!app.timer.completed);
        assert_eq!(app.timer.remaining, 1);
    }
}
