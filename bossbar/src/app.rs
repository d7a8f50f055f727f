//! Main application state and logic.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use bossbar_core::{CommandError, MonsterEvent, Session};

use crate::backdrop::BackdropArt;
use crate::ui::theme::Theme;

/// Save path used when a `:w` or `:load` command names no file.
pub const DEFAULT_SAVE_PATH: &str = "monster.json";

/// Vim-style input modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and hotkeys (default).
    #[default]
    Normal,
    /// Editing the focused form field.
    Insert,
    /// Entering a : command.
    Command,
}

/// The form fields on the control panel, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedField {
    #[default]
    Name,
    MaxHealth,
    Amount,
    AbilityName,
    AbilityUses,
}

impl FocusedField {
    pub fn next(self) -> Self {
        match self {
            FocusedField::Name => FocusedField::MaxHealth,
            FocusedField::MaxHealth => FocusedField::Amount,
            FocusedField::Amount => FocusedField::AbilityName,
            FocusedField::AbilityName => FocusedField::AbilityUses,
            FocusedField::AbilityUses => FocusedField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedField::Name => FocusedField::AbilityUses,
            FocusedField::MaxHealth => FocusedField::Name,
            FocusedField::Amount => FocusedField::MaxHealth,
            FocusedField::AbilityName => FocusedField::Amount,
            FocusedField::AbilityUses => FocusedField::AbilityName,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FocusedField::Name => "Monster Name",
            FocusedField::MaxHealth => "Max Health",
            FocusedField::Amount => "Damage/Heal",
            FocusedField::AbilityName => "Ability Name",
            FocusedField::AbilityUses => "Ability Uses",
        }
    }
}

/// Text buffers backing the control panel form.
#[derive(Debug, Default)]
pub struct FormFields {
    pub name: String,
    pub max_health: String,
    pub amount: String,
    pub ability_name: String,
    pub ability_uses: String,
}

impl FormFields {
    pub fn get(&self, field: FocusedField) -> &str {
        match field {
            FocusedField::Name => &self.name,
            FocusedField::MaxHealth => &self.max_health,
            FocusedField::Amount => &self.amount,
            FocusedField::AbilityName => &self.ability_name,
            FocusedField::AbilityUses => &self.ability_uses,
        }
    }

    fn get_mut(&mut self, field: FocusedField) -> &mut String {
        match field {
            FocusedField::Name => &mut self.name,
            FocusedField::MaxHealth => &mut self.max_health,
            FocusedField::Amount => &mut self.amount,
            FocusedField::AbilityName => &mut self.ability_name,
            FocusedField::AbilityUses => &mut self.ability_uses,
        }
    }
}

/// Severity of a status-line notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing notification shown on the status line.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Snapshot the display surface renders from.
///
/// Kept fresh by the session's change events; the audience-facing window
/// never reaches back into the model.
#[derive(Debug, Default)]
pub struct DisplayState {
    pub name: String,
    pub current: i32,
    pub max: i32,
    pub ability_lines: Vec<String>,
    pub backdrop_path: Option<PathBuf>,
    /// Bar fill actually drawn, eased toward the target each tick.
    pub shown_ratio: f64,
}

impl DisplayState {
    /// Fraction of health the bar should settle at.
    pub fn target_ratio(&self) -> f64 {
        if self.max <= 0 {
            0.0
        } else {
            (self.current.max(0) as f64 / self.max as f64).min(1.0)
        }
    }

    /// The original hides the name and bar entirely at zero health.
    pub fn is_defeated(&self) -> bool {
        self.current <= 0
    }

    /// Name with the display-time placeholder applied.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            bossbar_core::monster::UNNAMED_MONSTER
        } else {
            &self.name
        }
    }

    /// Ease the drawn bar toward the target (boss-bar drain animation).
    pub fn tick(&mut self) {
        let target = self.target_ratio();
        let delta = target - self.shown_ratio;
        if delta.abs() < 0.005 {
            self.shown_ratio = target;
        } else {
            self.shown_ratio += delta * 0.2;
        }
    }
}

/// Main application state.
pub struct App {
    pub session: Session,
    pub display: Rc<RefCell<DisplayState>>,
    pub theme: Theme,

    // Input state
    pub input_mode: InputMode,
    pub focused_field: FocusedField,
    pub fields: FormFields,
    cursor: usize,
    command_buffer: String,

    // Abilities list selection
    pub selected_ability: usize,

    // Status
    status: Option<StatusMessage>,
    pub should_quit: bool,

    // Views
    pub display_only: bool,
    pub show_help: bool,
    pub backdrop: Option<BackdropArt>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create the application and wire the display surface to the session's
    /// change events.
    pub fn new() -> Self {
        let mut session = Session::new();
        let display = Rc::new(RefCell::new(DisplayState::default()));

        let sink = Rc::clone(&display);
        session.subscribe(Box::new(move |event| {
            let mut state = sink.borrow_mut();
            match event {
                MonsterEvent::HealthChanged { name, current, max } => {
                    state.name = name.clone();
                    state.current = *current;
                    state.max = *max;
                }
                MonsterEvent::AbilitiesChanged { lines } => {
                    state.ability_lines = lines.clone();
                }
                MonsterEvent::BackdropChanged { path } => {
                    state.backdrop_path = path.clone();
                }
            }
        }));

        Self {
            session,
            display,
            theme: Theme::default(),
            input_mode: InputMode::Normal,
            focused_field: FocusedField::default(),
            fields: FormFields::default(),
            cursor: 0,
            command_buffer: String::new(),
            selected_ability: 0,
            status: None,
            should_quit: false,
            display_only: false,
            show_help: false,
            backdrop: None,
        }
    }

    // ========================================================================
    // Commands (form hotkeys)
    // ========================================================================

    /// Initialize the monster from the name and max-health fields.
    pub fn initialize_monster(&mut self) {
        let name = self.fields.name.clone();
        let max_health = self.fields.max_health.clone();
        match self.session.initialize(&name, &max_health) {
            Ok(()) => self.set_info("Monster initialized!"),
            Err(_) => self.set_error("Please enter a valid max health"),
        }
    }

    /// Apply the amount field as damage.
    pub fn apply_damage(&mut self) {
        let amount = self.fields.amount.clone();
        match self.session.apply_damage(&amount) {
            Ok(()) => {
                self.fields.amount.clear();
                self.clear_status();
            }
            Err(_) => self.set_error("Please enter a valid damage amount"),
        }
    }

    /// Apply the amount field as healing.
    pub fn apply_healing(&mut self) {
        let amount = self.fields.amount.clone();
        match self.session.apply_healing(&amount) {
            Ok(()) => {
                self.fields.amount.clear();
                self.clear_status();
            }
            Err(_) => self.set_error("Please enter a valid healing amount"),
        }
    }

    /// Add an ability from the ability name and uses fields.
    pub fn add_ability(&mut self) {
        let name = self.fields.ability_name.clone();
        let uses = self.fields.ability_uses.clone();
        match self.session.add_ability(&name, &uses) {
            Ok(()) => {
                self.fields.ability_name.clear();
                self.fields.ability_uses.clear();
                self.clear_status();
            }
            Err(CommandError::BlankAbilityName) => {
                self.set_warning("Please enter an ability name");
            }
            Err(_) => self.set_warning("Uses must be a number"),
        }
    }

    /// Name of the currently selected ability, mapped through the ordered
    /// key list so the index stays valid against the displayed lines.
    pub fn selected_ability_name(&self) -> Option<String> {
        self.session.ability_names().get(self.selected_ability).cloned()
    }

    /// Use the selected ability.
    pub fn use_selected_ability(&mut self) {
        let Some(name) = self.selected_ability_name() else {
            self.set_warning("Please select an ability");
            return;
        };
        if !self.session.use_ability(&name).succeeded() {
            self.set_info("No uses remaining for this ability");
        } else {
            self.clear_status();
        }
    }

    /// Remove the selected ability.
    pub fn remove_selected_ability(&mut self) {
        let Some(name) = self.selected_ability_name() else {
            self.set_warning("Please select an ability to remove");
            return;
        };
        self.session.remove_ability(&name);
        self.clamp_selection();
        self.clear_status();
    }

    /// Restore full health and all ability uses.
    pub fn reset_monster(&mut self) {
        self.session.reset_monster();
        self.set_info("Monster reset");
    }

    pub fn select_next_ability(&mut self) {
        let len = self.session.monster().abilities.len();
        if len > 0 && self.selected_ability + 1 < len {
            self.selected_ability += 1;
        }
    }

    pub fn select_prev_ability(&mut self) {
        self.selected_ability = self.selected_ability.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.session.monster().abilities.len();
        if self.selected_ability >= len {
            self.selected_ability = len.saturating_sub(1);
        }
    }

    // ========================================================================
    // Save / load / backdrop
    // ========================================================================

    /// Save the monster snapshot.
    pub fn save_to(&mut self, path: &Path) {
        match self.session.save(path) {
            Ok(()) => self.set_info(format!("Monster saved to {}", path.display())),
            Err(e) => self.set_error(format!("Save failed: {e}")),
        }
    }

    /// Load a monster snapshot, refreshing the form fields and backdrop on
    /// success. Failure leaves everything (including the form) as it was.
    pub fn load_from(&mut self, path: &Path) {
        match self.session.load(path) {
            Ok(()) => {
                self.fields.name = self.session.monster().name.clone();
                self.fields.max_health = self.session.monster().max_health.to_string();
                self.clamp_selection();
                self.sync_backdrop();
                self.set_info(format!("Monster loaded from {}", path.display()));
            }
            Err(e) => self.set_error(format!("Load failed: {e}")),
        }
    }

    /// Point the display backdrop at an image file.
    pub fn set_backdrop(&mut self, path: PathBuf) {
        self.session.set_background_image(path);
        self.sync_backdrop();
        match &self.backdrop {
            Some(art) => self.set_info(format!("Backdrop set: {}", art.file_name)),
            None => self.set_warning("Image could not be read; showing no backdrop"),
        }
    }

    /// Drop the display backdrop.
    pub fn clear_backdrop(&mut self) {
        self.session.clear_background_image();
        self.sync_backdrop();
        self.set_info("Backdrop cleared");
    }

    /// Re-probe the backdrop path recorded by the display adapter.
    ///
    /// An unreadable path degrades to no art; the path itself stays in the
    /// model so it round-trips through save files.
    pub fn sync_backdrop(&mut self) {
        let path = self.display.borrow().backdrop_path.clone();
        self.backdrop = path.as_deref().and_then(BackdropArt::probe);
    }

    // ========================================================================
    // Colon commands
    // ========================================================================

    /// Process a colon command.
    pub fn process_command(&mut self, command: &str) {
        let cmd = command.trim_start_matches(':');
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        if parts.is_empty() {
            return;
        }

        // Paths may contain spaces; everything after the verb is the argument.
        let arg = parts[1..].join(" ");

        match parts[0] {
            "q" | "q!" | "quit" | "exit" => {
                self.should_quit = true;
            }
            "w" | "save" => {
                let path = if arg.is_empty() { DEFAULT_SAVE_PATH.to_string() } else { arg };
                self.save_to(Path::new(&path));
            }
            "wq" => {
                let path = if arg.is_empty() { DEFAULT_SAVE_PATH.to_string() } else { arg };
                self.save_to(Path::new(&path));
                if matches!(self.status_level(), Some(StatusLevel::Info)) {
                    self.should_quit = true;
                }
            }
            "load" | "e" => {
                let path = if arg.is_empty() { DEFAULT_SAVE_PATH.to_string() } else { arg };
                self.load_from(Path::new(&path));
            }
            "bg" => {
                if arg.is_empty() {
                    self.set_warning("Usage: :bg <image path>");
                } else {
                    self.set_backdrop(PathBuf::from(arg));
                }
            }
            "nobg" => self.clear_backdrop(),
            "help" | "h" => self.show_help = true,
            _ => self.set_error(format!("Unknown command: {}", parts[0])),
        }
    }

    // ========================================================================
    // Mode switching and editing
    // ========================================================================

    /// Start editing the focused field.
    pub fn enter_insert_mode(&mut self) {
        self.input_mode = InputMode::Insert;
        self.cursor = self.fields.get(self.focused_field).chars().count();
    }

    /// Enter command mode (starts with :).
    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.command_buffer.clear();
        self.command_buffer.push(':');
        self.cursor = 1;
    }

    /// Exit to normal mode.
    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.command_buffer.starts_with(':') {
            self.command_buffer.clear();
        }
        self.cursor = 0;
    }

    /// Move focus to the next form field.
    pub fn focus_next(&mut self) {
        self.focused_field = self.focused_field.next();
        self.cursor = self.fields.get(self.focused_field).chars().count();
    }

    /// Move focus to the previous form field.
    pub fn focus_prev(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.cursor = self.fields.get(self.focused_field).chars().count();
    }

    fn active_parts(&mut self) -> (&mut String, &mut usize) {
        if self.input_mode == InputMode::Command {
            (&mut self.command_buffer, &mut self.cursor)
        } else {
            let field = self.focused_field;
            (self.fields.get_mut(field), &mut self.cursor)
        }
    }

    /// Handle a typed character (unicode-safe).
    pub fn type_char(&mut self, c: char) {
        let (buffer, cursor) = self.active_parts();
        let byte_pos = buffer
            .char_indices()
            .nth(*cursor)
            .map(|(i, _)| i)
            .unwrap_or(buffer.len());
        buffer.insert(byte_pos, c);
        *cursor += 1;
    }

    /// Handle backspace (unicode-safe).
    pub fn backspace(&mut self) {
        let (buffer, cursor) = self.active_parts();
        if *cursor > 0 {
            *cursor -= 1;
            if let Some((byte_pos, ch)) = buffer.char_indices().nth(*cursor) {
                buffer.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe).
    pub fn delete(&mut self) {
        let (buffer, cursor) = self.active_parts();
        if let Some((byte_pos, ch)) = buffer.char_indices().nth(*cursor) {
            buffer.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let (buffer, cursor) = self.active_parts();
        *cursor = (*cursor + 1).min(buffer.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        let (buffer, cursor) = self.active_parts();
        *cursor = buffer.chars().count();
    }

    // ========================================================================
    // Views and status
    // ========================================================================

    /// Toggle the full-screen audience display.
    pub fn toggle_display_only(&mut self) {
        self.display_only = !self.display_only;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Tick the display animation.
    pub fn tick(&mut self) {
        self.display.borrow_mut().tick();
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Info,
        });
    }

    pub fn set_warning(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Warning,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Error,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    fn status_level(&self) -> Option<StatusLevel> {
        self.status.as_ref().map(|s| s.level)
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized_app() -> App {
        let mut app = App::new();
        app.fields.name = "Ancient Dragon".to_string();
        app.fields.max_health = "150".to_string();
        app.initialize_monster();
        app
    }

    #[test]
    fn test_initialize_syncs_display_state() {
        let app = initialized_app();
        let display = app.display.borrow();
        assert_eq!(display.name, "Ancient Dragon");
        assert_eq!(display.current, 150);
        assert_eq!(display.max, 150);
    }

    #[test]
    fn test_initialize_with_bad_health_reports_error() {
        let mut app = App::new();
        app.fields.max_health = "lots".to_string();
        app.initialize_monster();

        assert_eq!(app.status().unwrap().level, StatusLevel::Error);
        assert_eq!(app.session.monster().max_health, 0);
    }

    #[test]
    fn test_damage_flows_to_display_through_events() {
        let mut app = initialized_app();
        app.fields.amount = "40".to_string();
        app.apply_damage();

        assert_eq!(app.display.borrow().current, 110);
        assert!(app.fields.amount.is_empty());
    }

    #[test]
    fn test_bar_animation_eases_toward_target() {
        let mut app = initialized_app();
        assert_eq!(app.display.borrow().shown_ratio, 0.0);

        for _ in 0..200 {
            app.tick();
        }
        assert!((app.display.borrow().shown_ratio - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_selection_maps_index_to_name() {
        let mut app = initialized_app();
        app.fields.ability_name = "Fire Breath".to_string();
        app.fields.ability_uses = "3".to_string();
        app.add_ability();
        app.fields.ability_name = "Claw".to_string();
        app.fields.ability_uses = String::new();
        app.add_ability();

        app.select_next_ability();
        assert_eq!(app.selected_ability_name().as_deref(), Some("Claw"));

        app.remove_selected_ability();
        assert_eq!(app.selected_ability_name().as_deref(), Some("Fire Breath"));
    }

    #[test]
    fn test_use_exhausted_ability_notifies() {
        let mut app = initialized_app();
        app.fields.ability_name = "Smash".to_string();
        app.fields.ability_uses = "1".to_string();
        app.add_ability();

        app.use_selected_ability();
        assert!(app.status().is_none());

        app.use_selected_ability();
        assert_eq!(
            app.status().unwrap().text,
            "No uses remaining for this ability"
        );
    }

    #[test]
    fn test_save_and_load_commands_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boss.json");
        let path_str = path.to_string_lossy().into_owned();

        let mut app = initialized_app();
        app.fields.amount = "40".to_string();
        app.apply_damage();
        app.process_command(&format!(":w {path_str}"));
        assert_eq!(app.status().unwrap().level, StatusLevel::Info);

        let mut other = App::new();
        other.process_command(&format!(":load {path_str}"));
        assert_eq!(other.session.monster().name, "Ancient Dragon");
        assert_eq!(other.session.monster().current_health, 110);
        // Form fields refreshed from the loaded record
        assert_eq!(other.fields.name, "Ancient Dragon");
        assert_eq!(other.fields.max_health, "150");
    }

    #[test]
    fn test_failed_load_keeps_form_and_state() {
        let mut app = initialized_app();
        app.process_command(":load /no/such/file.json");

        assert_eq!(app.status().unwrap().level, StatusLevel::Error);
        assert_eq!(app.session.monster().name, "Ancient Dragon");
        assert_eq!(app.fields.name, "Ancient Dragon");
    }

    #[test]
    fn test_unknown_command_reports_error() {
        let mut app = App::new();
        app.process_command(":frobnicate");
        assert!(app.status().unwrap().text.contains("Unknown command"));
    }

    #[test]
    fn test_missing_backdrop_degrades_silently() {
        let mut app = initialized_app();
        app.process_command(":bg /no/such/image.png");

        // Path is kept in the model, art degrades to none
        assert!(app.session.monster().background_image.is_some());
        assert!(app.backdrop.is_none());
        assert_eq!(app.status().unwrap().level, StatusLevel::Warning);

        app.process_command(":nobg");
        assert!(app.session.monster().background_image.is_none());
    }

    #[test]
    fn test_field_editing_is_unicode_safe() {
        let mut app = App::new();
        app.enter_insert_mode();
        for c in "Grüm".chars() {
            app.type_char(c);
        }
        assert_eq!(app.fields.name, "Grüm");

        app.backspace();
        app.backspace();
        assert_eq!(app.fields.name, "Gr");
    }

    #[test]
    fn test_command_mode_buffer_lifecycle() {
        let mut app = App::new();
        app.enter_command_mode();
        for c in "q".chars() {
            app.type_char(c);
        }
        assert_eq!(app.command_buffer(), ":q");

        app.enter_normal_mode();
        assert_eq!(app.command_buffer(), "");
    }
}
