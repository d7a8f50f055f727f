//! Monster state model.
//!
//! Contains the single tracked boss entity: name, clamped hit points,
//! ordered limited-use abilities, and an optional backdrop image reference.
//! Every mutation re-establishes the model invariants; callers never see a
//! health value outside `0..=max_health`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder shown for a monster whose name was left empty.
///
/// Applied at display time only; the stored name stays empty.
pub const UNNAMED_MONSTER: &str = "Unknown Monster";

/// A named, optionally limited-use action.
///
/// `max_uses == 0` means unlimited; the counter is conventionally 0 and
/// ignored. A negative `max_uses` can be entered (the command layer only
/// requires an integer) and behaves as an ability that can never be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub name: String,
    pub max_uses: i32,
    pub current_uses: i32,
}

impl Ability {
    /// Create a fresh ability with its uses at full.
    pub fn new(name: impl Into<String>, max_uses: i32) -> Self {
        Self {
            name: name.into(),
            max_uses,
            current_uses: max_uses,
        }
    }

    /// Whether this ability has no use ceiling.
    pub fn is_unlimited(&self) -> bool {
        self.max_uses == 0
    }

    /// Formatted list entry: `"name (current/max)"`, or the bare name for
    /// unlimited abilities.
    pub fn display_line(&self) -> String {
        if self.max_uses > 0 {
            format!("{} ({}/{})", self.name, self.current_uses, self.max_uses)
        } else {
            self.name.clone()
        }
    }
}

/// Result of attempting to use an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    /// A limited use was consumed.
    Spent,
    /// The ability is unlimited; nothing to consume.
    Unlimited,
    /// A limited ability with no uses remaining.
    Exhausted,
    /// No ability with that name exists.
    Unknown,
}

impl UseOutcome {
    /// Whether the use counts as successful.
    pub fn succeeded(self) -> bool {
        matches!(self, UseOutcome::Spent | UseOutcome::Unlimited)
    }
}

/// The single tracked boss entity.
///
/// Serializes to the flat snapshot document: `name`, `max_health`,
/// `current_health`, `abilities` (a name → `[max_uses, current_uses]` map in
/// insertion order), and `background_image` (null when unset). All fields
/// except `background_image` are required on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub max_health: i32,
    pub current_health: i32,
    #[serde(with = "abilities_map")]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub background_image: Option<PathBuf>,
}

impl Default for Monster {
    fn default() -> Self {
        Self::new()
    }
}

impl Monster {
    /// Create an empty monster: no name, zero health, no abilities, no image.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            max_health: 0,
            current_health: 0,
            abilities: Vec::new(),
            background_image: None,
        }
    }

    /// Replace the monster's name. No validation; empty is allowed.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the health ceiling and re-clamp current health against it.
    pub fn set_max_health(&mut self, max_health: i32) {
        self.max_health = max_health;
        self.current_health = clamp_health(self.current_health, max_health);
    }

    /// Replace current health, clamped into `0..=max_health`.
    ///
    /// This is the single enforcement point for the health invariant; with a
    /// non-positive ceiling the floor wins and health becomes 0.
    pub fn set_current_health(&mut self, health: i32) {
        self.current_health = clamp_health(health, self.max_health);
    }

    /// Insert or overwrite an ability, with its uses reset to full.
    ///
    /// A destructive upsert: re-adding an existing name keeps its position in
    /// the list but discards its spent-uses state.
    pub fn add_ability(&mut self, name: impl Into<String>, max_uses: i32) {
        let name = name.into();
        match self.abilities.iter_mut().find(|a| a.name == name) {
            Some(existing) => {
                existing.max_uses = max_uses;
                existing.current_uses = max_uses;
            }
            None => self.abilities.push(Ability::new(name, max_uses)),
        }
    }

    /// Remove an ability by name. Unknown names are a no-op.
    pub fn remove_ability(&mut self, name: &str) {
        self.abilities.retain(|a| a.name != name);
    }

    /// Attempt to use an ability by name.
    pub fn use_ability(&mut self, name: &str) -> UseOutcome {
        let Some(ability) = self.abilities.iter_mut().find(|a| a.name == name) else {
            return UseOutcome::Unknown;
        };

        if ability.max_uses == 0 {
            UseOutcome::Unlimited
        } else if ability.max_uses > 0 && ability.current_uses > 0 {
            ability.current_uses -= 1;
            UseOutcome::Spent
        } else {
            UseOutcome::Exhausted
        }
    }

    /// Restore every ability's remaining uses to its maximum.
    ///
    /// Health is untouched.
    pub fn reset_abilities(&mut self) {
        for ability in &mut self.abilities {
            ability.current_uses = ability.max_uses;
        }
    }

    /// Replace the backdrop image reference.
    ///
    /// No existence check here; a dangling path degrades to "no image" at the
    /// rendering boundary.
    pub fn set_background_image(&mut self, path: Option<PathBuf>) {
        self.background_image = path;
    }

    /// Name for display surfaces, substituting a placeholder when empty.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_MONSTER
        } else {
            &self.name
        }
    }

    /// Fraction of health remaining, in `0.0..=1.0`.
    ///
    /// 0.0 when the ceiling is not positive.
    pub fn health_ratio(&self) -> f64 {
        if self.max_health <= 0 {
            0.0
        } else {
            (self.current_health.max(0) as f64 / self.max_health as f64).min(1.0)
        }
    }

    /// Whether the monster is at zero health.
    pub fn is_defeated(&self) -> bool {
        self.current_health <= 0
    }
}

/// Clamp a health value into `0..=max`.
///
/// Floor wins over the ceiling, so a negative `max` yields 0 rather than a
/// reversed range.
fn clamp_health(health: i32, max: i32) -> i32 {
    health.min(max).max(0)
}

/// Serde codec for the abilities field.
///
/// The snapshot document stores abilities as a JSON object mapping name to a
/// two-element `[max_uses, current_uses]` array. Serialization walks the list
/// in insertion order; deserialization preserves document order, so the
/// round-trip keeps the ordering the index-based selection UI relies on.
mod abilities_map {
    use super::Ability;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(abilities: &[Ability], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(abilities.len()))?;
        for ability in abilities {
            map.serialize_entry(&ability.name, &[ability.max_uses, ability.current_uses])?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Ability>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AbilitiesVisitor;

        impl<'de> Visitor<'de> for AbilitiesVisitor {
            type Value = Vec<Ability>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ability name to [max_uses, current_uses]")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut abilities = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, [max_uses, current_uses])) =
                    access.next_entry::<String, [i32; 2]>()?
                {
                    abilities.push(Ability {
                        name,
                        max_uses,
                        current_uses,
                    });
                }
                Ok(abilities)
            }
        }

        deserializer.deserialize_map(AbilitiesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_monster_is_empty() {
        let monster = Monster::new();
        assert_eq!(monster.name, "");
        assert_eq!(monster.max_health, 0);
        assert_eq!(monster.current_health, 0);
        assert!(monster.abilities.is_empty());
        assert!(monster.background_image.is_none());
    }

    #[test]
    fn test_current_health_clamps_both_ends() {
        let mut monster = Monster::new();
        monster.set_max_health(100);

        monster.set_current_health(250);
        assert_eq!(monster.current_health, 100);

        monster.set_current_health(-40);
        assert_eq!(monster.current_health, 0);

        monster.set_current_health(63);
        assert_eq!(monster.current_health, 63);
    }

    #[test]
    fn test_negative_max_health_clamps_to_zero() {
        let mut monster = Monster::new();
        monster.set_max_health(-10);
        monster.set_current_health(5);
        assert_eq!(monster.current_health, 0);
    }

    #[test]
    fn test_shrinking_max_health_reclamps_current() {
        let mut monster = Monster::new();
        monster.set_max_health(100);
        monster.set_current_health(100);

        monster.set_max_health(60);
        assert_eq!(monster.current_health, 60);

        // Growing the ceiling never raises current health
        monster.set_max_health(200);
        assert_eq!(monster.current_health, 60);
    }

    #[test]
    fn test_limited_ability_spends_exactly_max_uses() {
        let mut monster = Monster::new();
        monster.add_ability("Fire Breath", 3);

        for _ in 0..3 {
            assert_eq!(monster.use_ability("Fire Breath"), UseOutcome::Spent);
        }
        assert_eq!(monster.use_ability("Fire Breath"), UseOutcome::Exhausted);
        assert_eq!(monster.use_ability("Fire Breath"), UseOutcome::Exhausted);
    }

    #[test]
    fn test_unlimited_ability_never_exhausts() {
        let mut monster = Monster::new();
        monster.add_ability("Claw", 0);

        for _ in 0..50 {
            assert_eq!(monster.use_ability("Claw"), UseOutcome::Unlimited);
        }
        assert_eq!(monster.abilities[0].current_uses, 0);
    }

    #[test]
    fn test_unknown_ability_fails() {
        let mut monster = Monster::new();
        assert_eq!(monster.use_ability("Tail Swipe"), UseOutcome::Unknown);
        assert!(!monster.use_ability("Tail Swipe").succeeded());
    }

    #[test]
    fn test_add_ability_is_destructive_upsert() {
        let mut monster = Monster::new();
        monster.add_ability("Roar", 2);
        monster.add_ability("Stomp", 1);
        monster.use_ability("Roar");

        // Re-adding resets uses but keeps list position
        monster.add_ability("Roar", 5);
        assert_eq!(monster.abilities[0].name, "Roar");
        assert_eq!(monster.abilities[0].max_uses, 5);
        assert_eq!(monster.abilities[0].current_uses, 5);
        assert_eq!(monster.abilities[1].name, "Stomp");
    }

    #[test]
    fn test_remove_unknown_ability_is_noop() {
        let mut monster = Monster::new();
        monster.add_ability("Roar", 2);

        let before = monster.clone();
        monster.remove_ability("Nonexistent");
        assert_eq!(monster, before);
    }

    #[test]
    fn test_reset_abilities_restores_counters_only() {
        let mut monster = Monster::new();
        monster.set_max_health(80);
        monster.set_current_health(30);
        monster.add_ability("Fire Breath", 3);
        monster.add_ability("Claw", 0);
        monster.use_ability("Fire Breath");
        monster.use_ability("Fire Breath");

        monster.reset_abilities();
        assert_eq!(monster.abilities[0].current_uses, 3);
        assert_eq!(monster.abilities[1].current_uses, 0);
        assert_eq!(monster.current_health, 30);
    }

    #[test]
    fn test_display_name_placeholder() {
        let mut monster = Monster::new();
        assert_eq!(monster.display_name(), UNNAMED_MONSTER);

        monster.set_name("Grave Warden");
        assert_eq!(monster.display_name(), "Grave Warden");
    }

    #[test]
    fn test_health_ratio_guards_zero_max() {
        let mut monster = Monster::new();
        assert_eq!(monster.health_ratio(), 0.0);

        monster.set_max_health(200);
        monster.set_current_health(50);
        assert!((monster.health_ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ability_display_line() {
        assert_eq!(Ability::new("Fire Breath", 3).display_line(), "Fire Breath (3/3)");
        assert_eq!(Ability::new("Claw", 0).display_line(), "Claw");
    }
}
