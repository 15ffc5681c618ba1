use bevy::prelude::*;

use crate::grid::GridModel;

/// Scrambles a board with random legal moves of the empty slot.
///
/// Every move is a legal slide, so the result can always be solved. Batches of
/// moves are repeated until no tile is left on its solved position.
#[derive(Debug, Clone)]
pub struct Shuffler {
    moves_per_batch: usize,
    trail: Vec<usize>,
    batches: usize,
}

impl Shuffler {
    pub const fn new(moves_per_batch: usize) -> Self {
        Self {
            moves_per_batch,
            trail: Vec::new(),
            batches: 0,
        }
    }

    /// Positions of the empty slot during the last shuffle, starting with the
    /// position it had before the first move.
    pub fn trail(&self) -> &[usize] {
        &self.trail
    }

    /// Batches run by the last shuffle.
    pub const fn batches(&self) -> usize {
        self.batches
    }

    pub fn shuffle(&mut self, grid: &mut GridModel, rng: &mut fastrand::Rng) {
        self.trail.clear();
        self.trail.push(grid.empty_index());
        self.batches = 0;

        let mut neighbors = Vec::with_capacity(4);
        loop {
            self.batches += 1;
            for _ in 0..self.moves_per_batch.max(1) {
                let empty = grid.empty_index();
                neighbors.clear();
                neighbors.extend(grid.adjacent_indices(empty));
                if neighbors.is_empty() {
                    return;
                }
                let Some(&target) = neighbors.get(rng.usize(..neighbors.len())) else {
                    continue;
                };
                grid.swap(empty, target);
                self.trail.push(target);
            }
            if grid.in_place_count() == 0 {
                break;
            }
        }

        debug!(
            "shuffled in {} batch(es), {} moves\n{grid}",
            self.batches,
            self.trail.len() - 1
        );
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new(100)
    }
}
