//! Boss monster tracker core.
//!
//! This crate provides the non-UI half of the tracker:
//! - The monster state model with clamped health and limited-use abilities
//! - A command layer that validates raw user input and mutates the model
//! - Change events that view adapters subscribe to
//! - JSON save/load of monster snapshots
//!
//! # Quick Start
//!
//! ```
//! use bossbar_core::Session;
//!
//! let mut session = Session::new();
//! session.initialize("Ancient Dragon", "150").unwrap();
//! session.apply_damage("40").unwrap();
//!
//! assert_eq!(session.monster().current_health, 110);
//! ```

pub mod events;
pub mod monster;
pub mod persist;
pub mod session;

// Primary public API
pub use events::{EventListener, MonsterEvent};
pub use monster::{Ability, Monster, UseOutcome};
pub use persist::PersistError;
pub use session::{CommandError, Session};
