use std::fmt::{self, Display, Formatter};

use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

use crate::config::{validate_dimensions, ConfigError};

/// Direction a tile travels when it slides into the empty slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, StrumDisplay)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    /// Row and column step of one cell in this direction. Rows grow downwards.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GridCoord {
    pub row: usize,
    pub col: usize,
}

impl GridCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A tile carries the index of the cell it belongs to once the puzzle is solved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tile {
    id: usize,
    is_empty_slot: bool,
}

impl Tile {
    pub const fn id(&self) -> usize {
        self.id
    }

    pub const fn is_empty_slot(&self) -> bool {
        self.is_empty_slot
    }
}

/// The board. `cells[i]` is the tile currently sitting at position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
    empty_index: usize,
}

impl GridModel {
    /// Creates a solved board where the tile with id `empty_id` is the empty slot.
    pub fn new(rows: usize, cols: usize, empty_id: usize) -> Result<Self, ConfigError> {
        let ids: Vec<usize> = (0..rows * cols).collect();
        Self::from_ids(rows, cols, &ids, empty_id)
    }

    /// Builds a board from the tile ids in position order.
    pub fn from_ids(
        rows: usize,
        cols: usize,
        ids: &[usize],
        empty_id: usize,
    ) -> Result<Self, ConfigError> {
        validate_dimensions(rows, cols)?;
        let len = rows * cols;
        if empty_id >= len {
            return Err(ConfigError::EmptyIndexOutOfRange {
                index: empty_id,
                len,
            });
        }
        if !is_permutation(ids, len) {
            return Err(ConfigError::NotAPermutation { len });
        }
        let cells: Vec<Tile> = ids
            .iter()
            .map(|&id| Tile {
                id,
                is_empty_slot: id == empty_id,
            })
            .collect();
        let empty_index = cells
            .iter()
            .position(Tile::is_empty_slot)
            .ok_or(ConfigError::NotAPermutation { len })?;
        Ok(Self {
            rows,
            cols,
            cells,
            empty_index,
        })
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub const fn empty_index(&self) -> usize {
        self.empty_index
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.cells
    }

    pub fn tile_at(&self, index: usize) -> Option<&Tile> {
        self.cells.get(index)
    }

    /// Current position of the tile with the given id.
    pub fn position_of(&self, id: usize) -> Option<usize> {
        self.cells.iter().position(|tile| tile.id == id)
    }

    pub const fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new(index / self.cols, index % self.cols)
    }

    pub const fn coord_to_index(&self, coord: GridCoord) -> usize {
        coord.row * self.cols + coord.col
    }

    /// Index of the cell one step away from `index`, if it is on the board.
    pub fn neighbor(&self, index: usize, direction: MoveDirection) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        let coord = self.index_to_coord(index);
        let (d_row, d_col) = direction.offset();
        let row = coord.row.checked_add_signed(d_row)?;
        let col = coord.col.checked_add_signed(d_col)?;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.coord_to_index(GridCoord::new(row, col)))
    }

    /// Up to four orthogonal neighbours of `index`, never wrapping around edges.
    pub fn adjacent_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        MoveDirection::iter().filter_map(move |direction| self.neighbor(index, direction))
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.direction_between(a, b).is_some()
    }

    /// The direction that leads from `from` to the neighbouring cell `to`.
    pub fn direction_between(&self, from: usize, to: usize) -> Option<MoveDirection> {
        MoveDirection::iter().find(|&direction| self.neighbor(from, direction) == Some(to))
    }

    /// Exchanges the tiles at `i` and `j`. Adjacency is the caller's business.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i >= self.len() || j >= self.len() {
            return;
        }
        self.cells.swap(i, j);
        if self.empty_index == i {
            self.empty_index = j;
        } else if self.empty_index == j {
            self.empty_index = i;
        }
        debug_assert!(
            self.cells
                .get(self.empty_index)
                .is_some_and(Tile::is_empty_slot),
            "empty index out of sync with the flagged tile"
        );
    }

    pub fn is_solved(&self) -> bool {
        self.cells.iter().enumerate().all(|(i, tile)| tile.id == i)
    }

    /// Number of tiles sitting on their own solved position.
    pub fn in_place_count(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|(i, tile)| tile.id == *i)
            .count()
    }

    pub fn misplaced_count(&self) -> usize {
        self.len() - self.in_place_count()
    }

    /// Checks the board invariants: ids form a permutation and exactly one tile,
    /// found at `empty_index`, is the empty slot.
    pub fn is_consistent(&self) -> bool {
        let ids: Vec<usize> = self.cells.iter().map(Tile::id).collect();
        let empty_slots = self.cells.iter().filter(|tile| tile.is_empty_slot).count();
        is_permutation(&ids, self.rows * self.cols)
            && empty_slots == 1
            && self
                .cells
                .get(self.empty_index)
                .is_some_and(Tile::is_empty_slot)
    }
}

fn is_permutation(ids: &[usize], len: usize) -> bool {
    if ids.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &id in ids {
        match seen.get_mut(id) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

impl Display for GridModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for tile in row {
                if tile.is_empty_slot {
                    write!(f, "   ")?;
                } else {
                    write!(f, "{:>02} ", tile.id + 1)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
