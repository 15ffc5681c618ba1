use bevy::prelude::*;
use strum::Display;

use crate::grid::GridModel;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display)]
pub enum RejectReason {
    /// The tile does not touch the empty slot.
    NotAdjacent,
    /// The index names the empty slot itself.
    EmptySlot,
    OutOfBounds,
    /// The session is over or not yet playing.
    SessionInactive,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoveOutcome {
    /// The tile at `from` slid into `to`; the empty slot now sits at `from`.
    Applied { from: usize, to: usize },
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Position of the empty slot after an applied move.
    pub const fn new_empty_index(&self) -> Option<usize> {
        match self {
            Self::Applied { from, .. } => Some(*from),
            Self::Rejected(_) => None,
        }
    }
}

/// Validates and applies player moves, counting the ones that land.
#[derive(Debug, Default, Clone)]
pub struct MoveResolver {
    move_count: u32,
}

impl MoveResolver {
    pub const fn new() -> Self {
        Self { move_count: 0 }
    }

    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn try_move(&mut self, grid: &mut GridModel, tile_index: usize) -> MoveOutcome {
        let empty = grid.empty_index();
        if tile_index >= grid.len() {
            return MoveOutcome::Rejected(RejectReason::OutOfBounds);
        }
        if tile_index == empty {
            return MoveOutcome::Rejected(RejectReason::EmptySlot);
        }
        if !grid.adjacent_indices(empty).any(|index| index == tile_index) {
            return MoveOutcome::Rejected(RejectReason::NotAdjacent);
        }

        grid.swap(tile_index, empty);
        self.move_count += 1;
        debug!("move #{}: {tile_index} -> {empty}", self.move_count);
        MoveOutcome::Applied {
            from: tile_index,
            to: empty,
        }
    }
}
