//! Monster snapshot persistence.
//!
//! One file holds one monster snapshot as a pretty-printed JSON document.
//! Loading parses into a fresh [`Monster`] so a malformed document can never
//! partially overwrite in-memory state; the command layer swaps the result in
//! only after the parse succeeds.

use crate::monster::Monster;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize a monster to the snapshot document.
pub fn to_json(monster: &Monster) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(monster)?)
}

/// Parse a snapshot document into a fresh monster.
///
/// Fails if any of `name`, `max_health`, `current_health`, or `abilities` is
/// missing; a missing `background_image` loads as none.
pub fn from_json(content: &str) -> Result<Monster, PersistError> {
    Ok(serde_json::from_str(content)?)
}

/// Write a monster snapshot to a file.
pub fn save_file(monster: &Monster, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let content = to_json(monster)?;
    fs::write(path, content)?;
    Ok(())
}

/// Read a monster snapshot from a file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Monster, PersistError> {
    let content = fs::read_to_string(path)?;
    from_json(&content)
}
