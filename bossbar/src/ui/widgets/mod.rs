//! TUI widgets for the tracker.

pub mod abilities;
pub mod boss_bar;
pub mod form;
pub mod status_bar;

pub use abilities::AbilityListWidget;
pub use boss_bar::BossBarWidget;
pub use form::FormWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
