use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delay between the end of a game and the request to leave the session.
pub const LEAVE_DELAY: Duration = Duration::from_secs(2);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Grid must be at least 2x2, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Empty tile index {index} is outside a grid of {len} cells")]
    EmptyIndexOutOfRange { index: usize, len: usize },

    #[error("Drag threshold must be a positive number, got {0}")]
    InvalidDragThreshold(f32),

    #[error("Time budget must be a positive number of seconds, got {0}")]
    InvalidTimeBudget(f32),

    #[error("Shuffle needs at least one move per batch")]
    NoShuffleMoves,

    #[error("Tile layout is not a permutation of 0..{len}")]
    NotAPermutation { len: usize },
}

/// Everything a host decides when it creates a [`GameSession`](crate::GameSession).
///
/// Missing fields fall back to [`SessionConfig::default`] when deserialized, so a
/// host only has to spell out what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Solved-position index of the tile that acts as the empty slot.
    pub empty_index: usize,
    /// Distance a drag must cover between two samples before a tile moves.
    pub drag_threshold: f32,
    pub time_budget_secs: f32,
    /// Random moves per shuffle batch.
    pub shuffle_moves: usize,
    /// Fixed seed for reproducible shuffles. `None` seeds from the process.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            empty_index: 4,
            drag_threshold: 20.,
            time_budget_secs: 180.,
            shuffle_moves: 100,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn new(rows: usize, cols: usize, empty_index: usize) -> Self {
        Self {
            rows,
            cols,
            empty_index,
            ..Default::default()
        }
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn with_time_budget(mut self, secs: f32) -> Self {
        self.time_budget_secs = secs;
        self
    }

    pub const fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.rows, self.cols)?;
        if self.empty_index >= self.cell_count() {
            return Err(ConfigError::EmptyIndexOutOfRange {
                index: self.empty_index,
                len: self.cell_count(),
            });
        }
        if !(self.drag_threshold.is_finite() && self.drag_threshold > 0.) {
            return Err(ConfigError::InvalidDragThreshold(self.drag_threshold));
        }
        if !(self.time_budget_secs.is_finite() && self.time_budget_secs > 0.) {
            return Err(ConfigError::InvalidTimeBudget(self.time_budget_secs));
        }
        if self.shuffle_moves == 0 {
            return Err(ConfigError::NoShuffleMoves);
        }
        Ok(())
    }
}

pub(crate) const fn validate_dimensions(rows: usize, cols: usize) -> Result<(), ConfigError> {
    if rows < 2 || cols < 2 {
        return Err(ConfigError::InvalidDimensions { rows, cols });
    }
    Ok(())
}
