//! Event handling for the tracker TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event.
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event.
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcut (always works)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.show_help {
        return handle_help_key(app, key);
    }

    if app.display_only {
        return handle_display_key(app, key);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

/// Keys while the help overlay is open.
fn handle_help_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
            app.show_help = false;
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Keys while the full-screen audience display is up.
///
/// Kept deliberately inert so a stray keypress on the projector machine
/// cannot mutate the monster.
fn handle_display_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::F(2) | KeyCode::Char('b') => {
            app.toggle_display_only();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

/// Keys in NORMAL mode (navigation and hotkeys).
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        // Mode switching
        KeyCode::Char('i') | KeyCode::Enter => {
            app.enter_insert_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(':') => {
            app.enter_command_mode();
            EventResult::NeedsRedraw
        }

        // Help
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }

        // Quit
        KeyCode::Char('q') => EventResult::Quit,

        // Field focus
        KeyCode::Tab => {
            app.focus_next();
            EventResult::NeedsRedraw
        }
        KeyCode::BackTab => {
            app.focus_prev();
            EventResult::NeedsRedraw
        }

        // Monster commands
        KeyCode::Char('I') => {
            app.initialize_monster();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('d') => {
            app.apply_damage();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('h') => {
            app.apply_healing();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('r') => {
            app.reset_monster();
            EventResult::NeedsRedraw
        }

        // Abilities
        KeyCode::Char('a') => {
            app.add_ability();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next_ability();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev_ability();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('u') => {
            app.use_selected_ability();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            app.remove_selected_ability();
            EventResult::NeedsRedraw
        }

        // Audience display
        KeyCode::F(2) | KeyCode::Char('D') => {
            app.toggle_display_only();
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

/// Keys in INSERT mode (editing the focused form field).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.enter_normal_mode();
            EventResult::NeedsRedraw
        }

        // Move between fields without leaving insert mode
        KeyCode::Tab => {
            app.focus_next();
            EventResult::NeedsRedraw
        }
        KeyCode::BackTab => {
            app.focus_prev();
            EventResult::NeedsRedraw
        }

        // Editing
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

/// Keys in COMMAND mode (: commands).
fn handle_command_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.enter_normal_mode();
            EventResult::NeedsRedraw
        }

        KeyCode::Enter => {
            let command = app.command_buffer().to_string();
            app.enter_normal_mode();

            if command.len() > 1 {
                app.process_command(&command);
            }

            if app.should_quit {
                EventResult::Quit
            } else {
                EventResult::NeedsRedraw
            }
        }

        KeyCode::Left => {
            if app.cursor() > 1 {
                app.cursor_left();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            if app.cursor() > 1 {
                app.backspace();
            } else {
                // Backspace on just ":" exits command mode
                app.enter_normal_mode();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_q_quits_from_normal_mode() {
        let mut app = App::new();
        assert_eq!(handle_event(&mut app, press(KeyCode::Char('q'))), EventResult::Quit);
    }

    #[test]
    fn test_typing_into_focused_field() {
        let mut app = App::new();
        handle_event(&mut app, press(KeyCode::Char('i')));
        assert_eq!(app.input_mode, InputMode::Insert);

        for c in "Lich".chars() {
            handle_event(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(app.fields.name, "Lich");

        handle_event(&mut app, press(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_colon_command_executes_on_enter() {
        let mut app = App::new();
        handle_event(&mut app, press(KeyCode::Char(':')));
        assert_eq!(app.input_mode, InputMode::Command);

        handle_event(&mut app, press(KeyCode::Char('q')));
        let result = handle_event(&mut app, press(KeyCode::Enter));
        assert_eq!(result, EventResult::Quit);
    }

    #[test]
    fn test_backspace_on_bare_colon_exits_command_mode() {
        let mut app = App::new();
        handle_event(&mut app, press(KeyCode::Char(':')));
        handle_event(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_display_mode_ignores_mutating_keys() {
        let mut app = App::new();
        app.fields.name = "Wyrm".to_string();
        app.fields.max_health = "50".to_string();
        app.initialize_monster();

        handle_event(&mut app, press(KeyCode::F(2)));
        assert!(app.display_only);

        handle_event(&mut app, press(KeyCode::Char('r')));
        handle_event(&mut app, press(KeyCode::Char('d')));
        assert_eq!(app.session.monster().current_health, 50);

        handle_event(&mut app, press(KeyCode::Esc));
        assert!(!app.display_only);
    }
}
