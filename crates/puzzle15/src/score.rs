use std::sync::Arc;

use parking_lot::Mutex;

/// Where the best (lowest) move count survives between sessions.
pub trait HighScoreStore: Send + Sync {
    /// The stored best score, `None` if nothing has been recorded yet.
    fn high_score(&self) -> Option<u32>;
    fn set_high_score(&mut self, score: u32);
}

/// Lets the host leave the finished session.
pub trait Navigator: Send + Sync {
    fn leave_session(&mut self);
}

impl<F> Navigator for F
where
    F: FnMut() + Send + Sync,
{
    fn leave_session(&mut self) {
        self();
    }
}

/// Process-local store. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHighScore {
    value: Arc<Mutex<Option<u32>>>,
}

impl InMemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(score))),
        }
    }
}

impl HighScoreStore for InMemoryHighScore {
    fn high_score(&self) -> Option<u32> {
        // Zero is what an unset store reads back as.
        let stored = *self.value.lock();
        stored.filter(|&score| score != 0)
    }

    fn set_high_score(&mut self, score: u32) {
        *self.value.lock() = Some(score);
    }
}

/// Whether `score` should replace the stored best.
pub fn beats_high_score(score: u32, stored: Option<u32>) -> bool {
    stored.is_none_or(|best| best == 0 || score < best)
}
