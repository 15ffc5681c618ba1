use bevy::prelude::*;

use crate::grid::{GridModel, MoveDirection};

/// A drag that crossed the threshold towards the empty slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GestureMove {
    /// Current position of the dragged tile.
    pub tile_index: usize,
    pub direction: MoveDirection,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        /// Identity of the dragged tile; its position is looked up on every sample.
        tile_id: usize,
        previous: Vec2,
    },
}

/// Turns pointer samples into at most one move per drag.
///
/// Positions are in a y-up space: a positive y delta drags the tile upwards.
#[derive(Debug, Clone)]
pub struct GestureResolver {
    threshold: f32,
    state: GestureState,
}

impl GestureResolver {
    pub const fn new(threshold: f32) -> Self {
        Self {
            threshold,
            state: GestureState::Idle,
        }
    }

    pub const fn state(&self) -> GestureState {
        self.state
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Starts a drag on the tile at `tile_index`. Returns `false` when the tile
    /// cannot move anywhere or a drag is already running.
    pub fn begin(&mut self, grid: &GridModel, tile_index: usize, position: Vec2) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(tile) = grid.tile_at(tile_index) else {
            return false;
        };
        if tile.is_empty_slot() || !grid.is_adjacent(tile_index, grid.empty_index()) {
            trace!("drag on tile {tile_index} ignored, not next to the empty slot");
            return false;
        }
        self.state = GestureState::Dragging {
            tile_id: tile.id(),
            previous: position,
        };
        true
    }

    /// Feeds the next pointer position. Returns the move to perform once the
    /// drag since the previous sample is long enough and points at the empty
    /// slot; the gesture is over after that.
    pub fn update(&mut self, grid: &GridModel, position: Vec2) -> Option<GestureMove> {
        let GestureState::Dragging { tile_id, previous } = self.state else {
            return None;
        };
        self.state = GestureState::Dragging {
            tile_id,
            previous: position,
        };

        let direction = resolve_direction(position - previous, self.threshold)?;
        let Some(tile_index) = grid.position_of(tile_id) else {
            self.state = GestureState::Idle;
            return None;
        };
        trace!("drag sample on tile {tile_index}: {direction}");
        if grid.neighbor(tile_index, direction) != Some(grid.empty_index()) {
            return None;
        }

        self.state = GestureState::Idle;
        Some(GestureMove {
            tile_index,
            direction,
        })
    }

    /// Pointer released or game over; any partial drag is dropped.
    pub fn end(&mut self) {
        self.state = GestureState::Idle;
    }
}

/// Keeps the dominant axis of `delta` (horizontal wins ties) and maps it to a
/// direction when its length is strictly above `threshold`.
pub fn resolve_direction(delta: Vec2, threshold: f32) -> Option<MoveDirection> {
    let reduced = if delta.x.abs() >= delta.y.abs() {
        Vec2::new(delta.x, 0.)
    } else {
        Vec2::new(0., delta.y)
    };
    if reduced.length_squared() <= threshold * threshold {
        return None;
    }
    if reduced.x > 0. {
        Some(MoveDirection::Right)
    } else if reduced.x < 0. {
        Some(MoveDirection::Left)
    } else if reduced.y > 0. {
        Some(MoveDirection::Up)
    } else {
        Some(MoveDirection::Down)
    }
}
