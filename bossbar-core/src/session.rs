//! Session — the command layer bridging user input to the monster model.
//!
//! A [`Session`] exclusively owns the one [`Monster`] instance, validates the
//! raw textual input coming from a UI, applies it through the model's typed
//! operations, and notifies subscribed view adapters. Every failure leaves the
//! model untouched; there is no partial application anywhere in this module.

use crate::events::{EventListener, MonsterEvent};
use crate::monster::{Monster, UseOutcome};
use crate::persist::{self, PersistError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from command operations.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("ability name must not be blank")]
    BlankAbilityName,

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// The command layer and owner of the tracked monster.
#[derive(Default)]
pub struct Session {
    monster: Monster,
    listeners: Vec<EventListener>,
}

impl Session {
    /// Create a session with an empty monster.
    pub fn new() -> Self {
        Self {
            monster: Monster::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a view-adapter callback for change events.
    pub fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Read access to the monster. Mutation goes through commands only.
    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Set up a monster from the name and max-health form fields.
    ///
    /// Parses `max_health_text`; on success the monster starts at full health.
    /// A parse failure mutates nothing.
    pub fn initialize(&mut self, name: &str, max_health_text: &str) -> Result<(), CommandError> {
        let max_health = parse_int("max health", max_health_text)?;
        self.monster.set_name(name);
        self.monster.set_max_health(max_health);
        self.monster.set_current_health(max_health);
        self.emit_health();
        Ok(())
    }

    /// Subtract a damage amount from current health, clamped at 0.
    pub fn apply_damage(&mut self, amount_text: &str) -> Result<(), CommandError> {
        let amount = parse_int("damage", amount_text)?;
        let current = self.monster.current_health;
        self.monster.set_current_health(current - amount);
        self.emit_health();
        Ok(())
    }

    /// Add a healing amount to current health, clamped at the ceiling.
    pub fn apply_healing(&mut self, amount_text: &str) -> Result<(), CommandError> {
        let amount = parse_int("healing", amount_text)?;
        let current = self.monster.current_health;
        self.monster.set_current_health(current + amount);
        self.emit_health();
        Ok(())
    }

    /// Add an ability from the name and uses form fields.
    ///
    /// An empty uses field means unlimited (0). The name must be non-blank
    /// after trimming; it is stored trimmed.
    pub fn add_ability(&mut self, name: &str, uses_text: &str) -> Result<(), CommandError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CommandError::BlankAbilityName);
        }

        let uses = if uses_text.trim().is_empty() {
            0
        } else {
            parse_int("uses", uses_text)?
        };

        self.monster.add_ability(name, uses);
        self.emit_abilities();
        Ok(())
    }

    /// Use an ability by name, reporting the model's outcome.
    pub fn use_ability(&mut self, name: &str) -> UseOutcome {
        let outcome = self.monster.use_ability(name);
        if outcome.succeeded() {
            self.emit_abilities();
        }
        outcome
    }

    /// Remove an ability by name. Unknown names are a no-op.
    pub fn remove_ability(&mut self, name: &str) {
        self.monster.remove_ability(name);
        self.emit_abilities();
    }

    /// Restore current health to max and all ability uses to max.
    pub fn reset_monster(&mut self) {
        let max = self.monster.max_health;
        self.monster.set_current_health(max);
        self.monster.reset_abilities();
        self.emit_health();
        self.emit_abilities();
    }

    /// Point the backdrop at a new image file.
    pub fn set_background_image(&mut self, path: PathBuf) {
        self.monster.set_background_image(Some(path));
        self.emit_backdrop();
    }

    /// Drop the backdrop image reference.
    pub fn clear_background_image(&mut self) {
        self.monster.set_background_image(None);
        self.emit_backdrop();
    }

    /// Save the monster snapshot to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CommandError> {
        persist::save_file(&self.monster, path)?;
        Ok(())
    }

    /// Load a monster snapshot, replacing the entire in-memory record.
    ///
    /// All-or-nothing: the document is parsed into a fresh monster before the
    /// swap, so any failure leaves the previous state intact. A successful
    /// load refreshes every display surface.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), CommandError> {
        let monster = persist::load_file(path)?;
        self.monster = monster;
        self.emit_health();
        self.emit_abilities();
        self.emit_backdrop();
        Ok(())
    }

    // ========================================================================
    // Derived read views
    // ========================================================================

    /// Formatted ability list in insertion order.
    pub fn ability_lines(&self) -> Vec<String> {
        self.monster.abilities.iter().map(|a| a.display_line()).collect()
    }

    /// Ordered ability names, index-aligned with [`Session::ability_lines`]
    /// so a UI can map a list selection back to a name.
    pub fn ability_names(&self) -> Vec<String> {
        self.monster.abilities.iter().map(|a| a.name.clone()).collect()
    }

    // ========================================================================
    // Event fan-out
    // ========================================================================

    fn emit(&mut self, event: MonsterEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn emit_health(&mut self) {
        let event = MonsterEvent::HealthChanged {
            name: self.monster.name.clone(),
            current: self.monster.current_health,
            max: self.monster.max_health,
        };
        self.emit(event);
    }

    fn emit_abilities(&mut self) {
        let event = MonsterEvent::AbilitiesChanged {
            lines: self.ability_lines(),
        };
        self.emit(event);
    }

    fn emit_backdrop(&mut self) {
        let event = MonsterEvent::BackdropChanged {
            path: self.monster.background_image.clone(),
        };
        self.emit(event);
    }
}

/// Parse a trimmed integer field, mapping failure to a command error.
fn parse_int(field: &'static str, text: &str) -> Result<i32, CommandError> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| CommandError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Subscribe a recorder that collects every emitted event.
    fn record_events(session: &mut Session) -> Rc<RefCell<Vec<MonsterEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(Box::new(move |event| {
            sink.borrow_mut().push(event.clone());
        }));
        events
    }

    #[test]
    fn test_initialize_full_heals() {
        let mut session = Session::new();
        session.initialize("Ancient Dragon", "150").unwrap();

        assert_eq!(session.monster().name, "Ancient Dragon");
        assert_eq!(session.monster().max_health, 150);
        assert_eq!(session.monster().current_health, 150);
    }

    #[test]
    fn test_initialize_rejects_non_integer_without_mutating() {
        let mut session = Session::new();
        session.initialize("Ancient Dragon", "150").unwrap();

        let result = session.initialize("X", "abc");
        assert!(matches!(
            result,
            Err(CommandError::InvalidNumber { field: "max health", .. })
        ));
        // Prior state intact
        assert_eq!(session.monster().name, "Ancient Dragon");
        assert_eq!(session.monster().current_health, 150);
    }

    #[test]
    fn test_damage_and_healing_clamp_through_model() {
        let mut session = Session::new();
        session.initialize("Troll", "80").unwrap();

        session.apply_damage("30").unwrap();
        assert_eq!(session.monster().current_health, 50);

        session.apply_damage("999").unwrap();
        assert_eq!(session.monster().current_health, 0);

        session.apply_healing("25").unwrap();
        assert_eq!(session.monster().current_health, 25);

        session.apply_healing("999").unwrap();
        assert_eq!(session.monster().current_health, 80);
    }

    #[test]
    fn test_damage_rejects_non_integer() {
        let mut session = Session::new();
        session.initialize("Troll", "80").unwrap();

        assert!(session.apply_damage("lots").is_err());
        assert_eq!(session.monster().current_health, 80);
    }

    #[test]
    fn test_add_ability_blank_name_fails() {
        let mut session = Session::new();
        assert!(matches!(
            session.add_ability("   ", "3"),
            Err(CommandError::BlankAbilityName)
        ));
        assert!(session.monster().abilities.is_empty());
    }

    #[test]
    fn test_add_ability_empty_uses_means_unlimited() {
        let mut session = Session::new();
        session.add_ability("Claw", "").unwrap();
        session.add_ability("Bite", "  ").unwrap();

        assert!(session.monster().abilities.iter().all(|a| a.is_unlimited()));
        assert_eq!(session.ability_lines(), vec!["Claw", "Bite"]);
    }

    #[test]
    fn test_add_ability_bad_uses_fails() {
        let mut session = Session::new();
        assert!(session.add_ability("Claw", "three").is_err());
        assert!(session.monster().abilities.is_empty());
    }

    #[test]
    fn test_ability_views_share_ordering() {
        let mut session = Session::new();
        session.add_ability("Fire Breath", "3").unwrap();
        session.add_ability("Claw", "").unwrap();
        session.add_ability("Tail Swipe", "1").unwrap();

        assert_eq!(
            session.ability_lines(),
            vec!["Fire Breath (3/3)", "Claw", "Tail Swipe (1/1)"]
        );
        assert_eq!(
            session.ability_names(),
            vec!["Fire Breath", "Claw", "Tail Swipe"]
        );
    }

    #[test]
    fn test_full_encounter_scenario() {
        let mut session = Session::new();
        session.initialize("Ancient Dragon", "150").unwrap();
        session.apply_damage("40").unwrap();
        assert_eq!(session.monster().current_health, 110);

        session.add_ability("Fire Breath", "3").unwrap();
        assert_eq!(session.ability_lines(), vec!["Fire Breath (3/3)"]);

        for _ in 0..3 {
            assert!(session.use_ability("Fire Breath").succeeded());
        }
        assert_eq!(session.ability_lines(), vec!["Fire Breath (0/3)"]);
        assert_eq!(session.use_ability("Fire Breath"), UseOutcome::Exhausted);

        session.reset_monster();
        assert_eq!(session.monster().current_health, 150);
        assert_eq!(session.ability_lines(), vec!["Fire Breath (3/3)"]);
    }

    #[test]
    fn test_events_carry_post_mutation_snapshot() {
        let mut session = Session::new();
        let events = record_events(&mut session);

        session.initialize("Lich", "90").unwrap();
        session.apply_damage("35").unwrap();

        let recorded = events.borrow();
        assert_eq!(
            recorded[0],
            MonsterEvent::HealthChanged {
                name: "Lich".to_string(),
                current: 90,
                max: 90,
            }
        );
        assert_eq!(
            recorded[1],
            MonsterEvent::HealthChanged {
                name: "Lich".to_string(),
                current: 55,
                max: 90,
            }
        );
    }

    #[test]
    fn test_failed_command_emits_nothing() {
        let mut session = Session::new();
        let events = record_events(&mut session);

        assert!(session.initialize("X", "abc").is_err());
        assert!(session.apply_damage("??").is_err());
        assert!(session.add_ability("", "3").is_err());

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_ability_commands_emit_display_list() {
        let mut session = Session::new();
        let events = record_events(&mut session);

        session.add_ability("Fire Breath", "2").unwrap();
        session.use_ability("Fire Breath");
        session.remove_ability("Fire Breath");

        let recorded = events.borrow();
        assert_eq!(
            recorded[0],
            MonsterEvent::AbilitiesChanged {
                lines: vec!["Fire Breath (2/2)".to_string()],
            }
        );
        assert_eq!(
            recorded[1],
            MonsterEvent::AbilitiesChanged {
                lines: vec!["Fire Breath (1/2)".to_string()],
            }
        );
        assert_eq!(recorded[2], MonsterEvent::AbilitiesChanged { lines: vec![] });
    }

    #[test]
    fn test_exhausted_use_emits_nothing() {
        let mut session = Session::new();
        session.add_ability("Smash", "1").unwrap();
        session.use_ability("Smash");

        let events = record_events(&mut session);
        assert_eq!(session.use_ability("Smash"), UseOutcome::Exhausted);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_backdrop_commands_emit_path() {
        let mut session = Session::new();
        let events = record_events(&mut session);

        session.set_background_image(PathBuf::from("art/lair.png"));
        session.clear_background_image();

        let recorded = events.borrow();
        assert_eq!(
            recorded[0],
            MonsterEvent::BackdropChanged {
                path: Some(PathBuf::from("art/lair.png")),
            }
        );
        assert_eq!(recorded[1], MonsterEvent::BackdropChanged { path: None });
    }

    #[test]
    fn test_save_then_load_replaces_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boss.json");

        let mut session = Session::new();
        session.initialize("Ancient Dragon", "150").unwrap();
        session.apply_damage("40").unwrap();
        session.add_ability("Fire Breath", "3").unwrap();
        session.save(&path).unwrap();

        let mut other = Session::new();
        other.initialize("Imp", "10").unwrap();
        other.load(&path).unwrap();

        assert_eq!(other.monster().name, "Ancient Dragon");
        assert_eq!(other.monster().current_health, 110);
        assert_eq!(other.ability_lines(), vec!["Fire Breath (3/3)"]);
    }

    #[test]
    fn test_load_refreshes_every_surface() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boss.json");

        let mut session = Session::new();
        session.initialize("Wyrm", "70").unwrap();
        session.add_ability("Gust", "2").unwrap();
        session.save(&path).unwrap();

        let mut other = Session::new();
        let events = record_events(&mut other);
        other.load(&path).unwrap();

        let recorded = events.borrow();
        assert_eq!(recorded.len(), 3);
        assert!(matches!(recorded[0], MonsterEvent::HealthChanged { .. }));
        assert!(matches!(recorded[1], MonsterEvent::AbilitiesChanged { .. }));
        assert!(matches!(recorded[2], MonsterEvent::BackdropChanged { .. }));
    }

    #[test]
    fn test_failed_load_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        // Missing the required abilities key
        std::fs::write(&path, r#"{"name": "Z", "max_health": 5, "current_health": 5}"#).unwrap();

        let mut session = Session::new();
        session.initialize("Ancient Dragon", "150").unwrap();
        let events = record_events(&mut session);

        assert!(session.load(&path).is_err());
        assert_eq!(session.monster().name, "Ancient Dragon");
        assert_eq!(session.monster().current_health, 150);
        assert!(events.borrow().is_empty());
    }
}
