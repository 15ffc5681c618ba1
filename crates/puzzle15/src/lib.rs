mod config;
mod events;
mod gesture;
mod grid;
mod moves;
mod plugin;
mod score;
mod session;
mod shuffle;

pub use config::{ConfigError, SessionConfig, LEAVE_DELAY};
pub use events::{EventBus, SessionEvent, Subscriber, SubscriptionId};
pub use gesture::{resolve_direction, GestureMove, GestureResolver, GestureState};
pub use grid::{GridCoord, GridModel, MoveDirection, Tile};
pub use moves::{MoveOutcome, MoveResolver, RejectReason};
pub use plugin::Puzzle15Plugin;
pub use score::{beats_high_score, HighScoreStore, InMemoryHighScore, Navigator};
pub use session::{GameSession, PointerSample, SessionPhase};
pub use shuffle::Shuffler;
