use std::time::Duration;

use bevy::prelude::*;
use strum::Display;

use crate::config::{ConfigError, SessionConfig, LEAVE_DELAY};
use crate::events::{EventBus, SessionEvent, SubscriptionId};
use crate::gesture::GestureResolver;
use crate::grid::GridModel;
use crate::moves::{MoveOutcome, MoveResolver, RejectReason};
use crate::score::{beats_high_score, HighScoreStore, Navigator};
use crate::shuffle::Shuffler;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display)]
pub enum SessionPhase {
    Setup,
    Playing,
    Won,
    Lost,
}

impl SessionPhase {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One pointer sample delivered by the host.
#[derive(Event, Debug, Copy, Clone, PartialEq)]
pub enum PointerSample {
    /// Pointer went down, over the tile at `tile` if any.
    Pressed { tile: Option<usize>, position: Vec2 },
    Moved(Vec2),
    Released,
}

/// A single timed game, from the scrambled board to the win or the timeout.
#[derive(Resource)]
pub struct GameSession {
    grid: GridModel,
    shuffler: Shuffler,
    moves: MoveResolver,
    gesture: GestureResolver,
    rng: fastrand::Rng,
    phase: SessionPhase,
    time_remaining: f32,
    is_shuffled: bool,
    events: EventBus,
    high_scores: Box<dyn HighScoreStore>,
    navigator: Box<dyn Navigator>,
    leave_timer: Option<Timer>,
    disposed: bool,
}

impl GameSession {
    pub fn new(
        config: SessionConfig,
        high_scores: impl HighScoreStore + 'static,
        navigator: impl Navigator + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = GridModel::new(config.rows, config.cols, config.empty_index)?;
        let rng = config.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Ok(Self {
            shuffler: Shuffler::new(config.shuffle_moves),
            gesture: GestureResolver::new(config.drag_threshold),
            moves: MoveResolver::new(),
            time_remaining: config.time_budget_secs,
            grid,
            rng,
            phase: SessionPhase::Setup,
            is_shuffled: false,
            events: EventBus::new(),
            high_scores: Box::new(high_scores),
            navigator: Box::new(navigator),
            leave_timer: None,
            disposed: false,
        })
    }

    pub const fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub const fn shuffler(&self) -> &Shuffler {
        &self.shuffler
    }

    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Moves made since the board was shuffled.
    pub const fn score(&self) -> u32 {
        self.moves.move_count()
    }

    pub const fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub const fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub const fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub const fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// True while the delayed request to leave the session is pending.
    pub const fn leave_pending(&self) -> bool {
        self.leave_timer.is_some()
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&SessionEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Scrambles the board and starts the clock. Only valid once, from Setup.
    pub fn start(&mut self) {
        if self.disposed || self.phase != SessionPhase::Setup {
            return;
        }
        self.shuffler.shuffle(&mut self.grid, &mut self.rng);
        self.is_shuffled = true;
        self.phase = SessionPhase::Playing;
        info!(
            "puzzle started: {}x{}, {}s on the clock",
            self.grid.rows(),
            self.grid.cols(),
            self.time_remaining
        );
        self.events.emit(&SessionEvent::ShuffleComplete);
    }

    /// Scrambles the board again mid-game. The move count is kept.
    pub fn reshuffle(&mut self) -> bool {
        if self.disposed || self.phase != SessionPhase::Playing {
            warn!("reshuffle refused in phase {}", self.phase);
            return false;
        }
        self.gesture.end();
        self.shuffler.shuffle(&mut self.grid, &mut self.rng);
        self.events.emit(&SessionEvent::ShuffleComplete);
        true
    }

    /// Advances the clock and the pending leave request by `delta`.
    pub fn tick(&mut self, delta: Duration) {
        if self.disposed {
            return;
        }

        if let Some(timer) = self.leave_timer.as_mut() {
            timer.tick(delta);
            if timer.finished() {
                self.leave_timer = None;
                info!("leaving finished session");
                self.navigator.leave_session();
            }
        }

        if self.phase != SessionPhase::Playing {
            return;
        }

        self.time_remaining = (self.time_remaining - delta.as_secs_f32()).max(0.);
        self.events.emit(&SessionEvent::TimerTick {
            remaining: self.time_remaining,
        });
        if self.time_remaining <= 0. {
            self.lose();
        }
    }

    pub fn handle_pointer(&mut self, sample: PointerSample) -> Option<MoveOutcome> {
        if self.disposed || self.phase != SessionPhase::Playing {
            return None;
        }
        match sample {
            PointerSample::Pressed {
                tile: Some(tile),
                position,
            } => {
                self.gesture.begin(&self.grid, tile, position);
                None
            }
            PointerSample::Pressed { tile: None, .. } => None,
            PointerSample::Moved(position) => {
                let gesture_move = self.gesture.update(&self.grid, position)?;
                Some(self.try_move(gesture_move.tile_index))
            }
            PointerSample::Released => {
                self.gesture.end();
                None
            }
        }
    }

    /// Slides the tile at `tile_index` into the empty slot if it is adjacent.
    pub fn try_move(&mut self, tile_index: usize) -> MoveOutcome {
        if self.disposed || self.phase != SessionPhase::Playing {
            return MoveOutcome::Rejected(RejectReason::SessionInactive);
        }
        let outcome = self.moves.try_move(&mut self.grid, tile_index);
        if let MoveOutcome::Applied { from, to } = outcome {
            self.events.emit(&SessionEvent::MoveApplied { from, to });
            self.check_victory();
        }
        outcome
    }

    /// Ends the game as won when the shuffled board is back in order.
    /// Returns whether the game was won by this call.
    pub fn check_victory(&mut self) -> bool {
        if self.disposed
            || !self.is_shuffled
            || self.phase.is_over()
            || self.time_remaining <= 0.
            || !self.grid.is_solved()
        {
            return false;
        }

        let score = self.score();
        self.gesture.end();
        self.phase = SessionPhase::Won;
        let stored = self.high_scores.high_score();
        if beats_high_score(score, stored) {
            debug!("new high score {score} (was {stored:?})");
            self.high_scores.set_high_score(score);
        }
        info!("puzzle solved in {score} moves");
        self.events.emit(&SessionEvent::Won { score });
        self.schedule_leave();
        true
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.leave_timer = None;
        self.gesture.end();
        self.events.clear();
        info!("session disposed in phase {}", self.phase);
    }

    fn lose(&mut self) {
        self.time_remaining = 0.;
        self.gesture.end();
        self.phase = SessionPhase::Lost;
        info!("time's up after {} moves", self.score());
        self.events.emit(&SessionEvent::Lost);
        self.schedule_leave();
    }

    fn schedule_leave(&mut self) {
        self.leave_timer = Some(Timer::new(LEAVE_DELAY, TimerMode::Once));
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
