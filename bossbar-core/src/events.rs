//! Change events fanned out by the command layer.
//!
//! View adapters register a callback with [`Session::subscribe`] and receive
//! an event in the same call stack as the mutation that produced it. Events
//! carry the post-mutation snapshot so an adapter can render without reaching
//! back into the model.
//!
//! [`Session::subscribe`]: crate::session::Session::subscribe

use std::path::PathBuf;

/// A notification that some slice of monster state changed.
#[derive(Debug, Clone, PartialEq)]
pub enum MonsterEvent {
    /// Name or health changed; carries the full health-display snapshot.
    HealthChanged {
        name: String,
        current: i32,
        max: i32,
    },
    /// The ability set or a use counter changed; carries the formatted
    /// display list in insertion order.
    AbilitiesChanged { lines: Vec<String> },
    /// The backdrop image reference changed.
    BackdropChanged { path: Option<PathBuf> },
}

/// A registered view-adapter callback.
pub type EventListener = Box<dyn FnMut(&MonsterEvent)>;
