//! Seams between the engine and whatever hosts it (browser page, tests).

use std::collections::HashMap;

use crate::error::RunnerError;

/// Best-effort persistence for the high score.
pub trait ScoreStore {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn load(&self, key: &str) -> Result<Option<u32>, RunnerError>;
    fn save(&mut self, key: &str, value: u32) -> Result<(), RunnerError>;
}

/// Text outputs and panels of the surrounding page.
pub trait Hud {
    fn show_score(&mut self, score: u32);
    fn show_high_score(&mut self, high_score: u32);
    /// Final score plus the restart / close panel.
    fn show_game_over(&mut self, final_score: u32);
    /// A run started: hide instructions and the game-over panel.
    fn show_playing(&mut self);
    /// Back to the page: hide the game, restore hint and instructions.
    fn show_idle(&mut self);
}

/// Opaque id of a pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Per-frame callback scheduling (`requestAnimationFrame` in the browser).
pub trait FrameScheduler {
    /// `None` when the host could not schedule a frame.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Process-local store, used when the page has no usable `localStorage`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<u32>, RunnerError> {
        Ok(self.values.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), RunnerError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Parse a stored score the way the page always wrote it (decimal text).
pub fn parse_score(raw: &str) -> Result<u32, RunnerError> {
    raw.trim().parse().map_err(|_| RunnerError::CorruptScore(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", 120).unwrap();
        assert_eq!(store.load("k").unwrap(), Some(120));
    }

    #[test]
    fn parse_score_rejects_garbage() {
        assert_eq!(parse_score(" 340 ").unwrap(), 340);
        assert!(matches!(parse_score("abc"), Err(RunnerError::CorruptScore(_))));
        assert!(parse_score("-5").is_err());
    }
}
