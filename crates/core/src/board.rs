//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of [`Block`]s stored once, as a flat row-major array.
//! Grid access (`at(row, col)`), row access (`row(index)`) and flat access (`blocks()`)
//! are all computed views of that one buffer, so they can never disagree.
//!
//! Coordinates: x is the column (0..9, left to right), y is the row (0..19, bottom to top).
//! Every filled cell stores its own grid position; empty cells hold [`Block::EMPTY`].

use arrayvec::ArrayVec;

use crate::shapes::Shape;
use crate::types::{Block, Vec2i, BOARD_SIZE, COLS, ROWS, ROW_CLEAR_MAX};

/// Outcome of testing a shape's blocks against the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Every block is inside the board on an empty cell
    Valid,
    /// A block lands on a filled cell
    Overlap,
    /// A block lies outside the board
    Outside,
}

/// Full rows found after a lock, ascending, at most four
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClearResult {
    rows: ArrayVec<usize, ROW_CLEAR_MAX>,
}

impl ClearResult {
    /// Build a result from explicit row indices
    ///
    /// # Panics
    ///
    /// Panics on more than four rows, out-of-range rows or rows not strictly ascending.
    pub fn from_rows(rows: &[usize]) -> Self {
        assert!(rows.len() <= ROW_CLEAR_MAX, "at most {} rows clear at once", ROW_CLEAR_MAX);
        assert!(rows.iter().all(|&r| r < ROWS), "row index out of board");
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "rows must be ascending");

        let mut out = ArrayVec::new();
        out.extend(rows.iter().copied());
        Self { rows: out }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of blocks, row-major order (row * COLS + col)
    blocks: [Block; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            blocks: [Block::EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from a position, `None` when outside
    #[inline(always)]
    fn index(pos: Vec2i) -> Option<usize> {
        if Self::is_outside(pos) {
            return None;
        }
        Some((pos.y as usize) * COLS + (pos.x as usize))
    }

    /// Check if a position is out of bounds
    #[inline(always)]
    pub fn is_outside(pos: Vec2i) -> bool {
        pos.x < 0 || pos.y < 0 || pos.x >= COLS as i32 || pos.y >= ROWS as i32
    }

    pub fn width(&self) -> usize {
        COLS
    }

    pub fn height(&self) -> usize {
        ROWS
    }

    /// Block at (row, col)
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are off the board.
    pub fn at(&self, row: usize, col: usize) -> &Block {
        assert!(row < ROWS && col < COLS, "cell ({}, {}) off board", row, col);
        &self.blocks[row * COLS + col]
    }

    /// Block at an (x, y) position, `None` when outside
    pub fn get(&self, pos: Vec2i) -> Option<Block> {
        Self::index(pos).map(|idx| self.blocks[idx])
    }

    /// Store `block` at `pos`, stamping the position into it
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Vec2i, block: Block) -> bool {
        match Self::index(pos) {
            Some(idx) => {
                self.blocks[idx] = if block.is_empty() {
                    Block::EMPTY
                } else {
                    block.at(pos)
                };
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the board and holds a filled block
    pub fn is_occupied(&self, pos: Vec2i) -> bool {
        matches!(self.get(pos), Some(block) if !block.is_empty())
    }

    /// One row, left to right
    pub fn row(&self, index: usize) -> &[Block] {
        assert!(index < ROWS, "row {} off board", index);
        let start = index * COLS;
        &self.blocks[start..start + COLS]
    }

    /// Rows from the floor upwards
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.blocks.chunks_exact(COLS)
    }

    /// Flat row-major view
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_empty()).count()
    }

    /// Test the shape translated by `offset` against the board
    ///
    /// Bounds are checked before occupancy so an off-board probe never reads the grid.
    pub fn overlap(&self, shape: &Shape, offset: Vec2i) -> Placement {
        for block in shape.blocks() {
            let pos = block.position + shape.offset + offset;

            let Some(idx) = Self::index(pos) else {
                return Placement::Outside;
            };

            if !self.blocks[idx].is_empty() {
                return Placement::Overlap;
            }
        }

        Placement::Valid
    }

    /// Write the shape's blocks into the board
    ///
    /// Blocks that land outside are dropped. Returns how many were dropped.
    pub fn merge(&mut self, shape: &Shape) -> usize {
        let mut outside = 0;

        for block in shape.blocks() {
            let pos = block.position + shape.offset;
            match Self::index(pos) {
                Some(idx) => self.blocks[idx] = block.at(pos),
                None => outside += 1,
            }
        }

        outside
    }

    /// Check if a row is completely filled
    pub fn row_is_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        self.row(row).iter().all(|block| !block.is_empty())
    }

    /// Collect full rows, floor first, capped at four
    pub fn clearable_rows(&self) -> ClearResult {
        let mut rows = ArrayVec::new();

        for row in 0..ROWS {
            if rows.is_full() {
                break;
            }
            if self.row_is_full(row) {
                rows.push(row);
            }
        }

        ClearResult { rows }
    }

    /// Remove the rows in `clear` and drop everything above them
    ///
    /// Rows are processed highest first so that shifting never moves a row that is
    /// still waiting to be cleared. Returns false (and touches nothing) for an
    /// empty result.
    pub fn apply_clear(&mut self, clear: &ClearResult) -> bool {
        if clear.is_empty() {
            return false;
        }

        for &row in clear.row_indices().iter().rev() {
            self.remove_row(row);
        }

        true
    }

    /// Shift rows `row+1..ROWS` down by one onto `row` and empty the top row
    fn remove_row(&mut self, row: usize) {
        let start = row * COLS;
        let above = (row + 1) * COLS;

        // copy_within handles the overlapping ranges
        self.blocks.copy_within(above..BOARD_SIZE, start);

        for block in &mut self.blocks[start..(ROWS - 1) * COLS] {
            if !block.is_empty() {
                block.position.y -= 1;
            }
        }

        for block in &mut self.blocks[(ROWS - 1) * COLS..] {
            *block = Block::EMPTY;
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for block in &mut self.blocks {
            *block = Block::EMPTY;
        }
    }

    /// Formation tag per cell (0 = empty), top row first for display
    pub fn write_formation_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (row, cells) in self.rows().enumerate() {
            let dst = &mut out[ROWS - 1 - row];
            for (col, block) in cells.iter().enumerate() {
                dst[col] = block.formation().map(|f| f.tag() as u8).unwrap_or(0);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Formation;

    fn fill_row(board: &mut Board, row: i32, skip: &[i32]) {
        for x in 0..COLS as i32 {
            if !skip.contains(&x) {
                board.set(Vec2i::new(x, row), Block::filled(Formation::I, Vec2i::ZERO));
            }
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(Vec2i::new(0, 0)), Some(0));
        assert_eq!(Board::index(Vec2i::new(9, 0)), Some(9));
        assert_eq!(Board::index(Vec2i::new(0, 1)), Some(10));
        assert_eq!(Board::index(Vec2i::new(9, 19)), Some(199));
        assert_eq!(Board::index(Vec2i::new(-1, 0)), None);
        assert_eq!(Board::index(Vec2i::new(10, 0)), None);
        assert_eq!(Board::index(Vec2i::new(0, 20)), None);
    }

    #[test]
    fn test_views_share_storage() {
        let mut board = Board::new();
        board.set(Vec2i::new(5, 10), Block::filled(Formation::T, Vec2i::ZERO));

        assert!(!board.at(10, 5).is_empty());
        assert!(!board.row(10)[5].is_empty());
        assert!(!board.blocks()[10 * COLS + 5].is_empty());
        assert_eq!(board.at(10, 5).position, Vec2i::new(5, 10));
    }

    #[test]
    fn test_set_empty_normalizes() {
        let mut board = Board::new();
        let pos = Vec2i::new(1, 1);
        board.set(pos, Block::filled(Formation::O, Vec2i::ZERO));
        board.set(pos, Block { status: 0, position: pos });
        assert_eq!(board.get(pos), Some(Block::EMPTY));
    }

    #[test]
    fn test_clear_two_rows_compacts() {
        let mut board = Board::new();
        fill_row(&mut board, 0, &[9]);
        fill_row(&mut board, 1, &[]);
        fill_row(&mut board, 2, &[0]);
        fill_row(&mut board, 3, &[]);
        board.set(Vec2i::new(4, 19), Block::filled(Formation::S, Vec2i::ZERO));

        let clear = board.clearable_rows();
        assert_eq!(clear.row_indices(), &[1, 3]);
        assert!(board.apply_clear(&clear));

        // Row 2 fell to row 1, row 19's block fell to row 17
        assert!(board.at(1, 0).is_empty());
        assert!(!board.at(1, 9).is_empty());
        assert_eq!(board.at(1, 9).position, Vec2i::new(9, 1));
        assert!(!board.at(17, 4).is_empty());
        assert_eq!(board.at(17, 4).position, Vec2i::new(4, 17));
        assert!(board.row(18).iter().all(Block::is_empty));
        assert!(board.row(19).iter().all(Block::is_empty));
    }

    #[test]
    fn test_clearable_rows_caps_at_four() {
        let mut board = Board::new();
        for row in 0..6 {
            fill_row(&mut board, row, &[]);
        }
        assert_eq!(board.clearable_rows().row_indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_formation_grid_is_top_first() {
        let mut board = Board::new();
        board.set(Vec2i::new(0, 0), Block::filled(Formation::L, Vec2i::ZERO));
        let mut grid = [[0u8; COLS]; ROWS];
        board.write_formation_grid(&mut grid);
        assert_eq!(grid[ROWS - 1][0], Formation::L.tag() as u8);
        assert_eq!(grid[0][0], 0);
    }

    proptest::proptest! {
        #[test]
        fn prop_clear_removes_exactly_full_rows(
            full in proptest::collection::btree_set(0usize..ROWS, 0..=ROW_CLEAR_MAX),
            extra in proptest::collection::vec((0..COLS as i32, 0..ROWS as i32), 0..40),
        ) {
            let mut board = Board::new();
            for &(x, y) in &extra {
                // Leave column 0 free so only the chosen rows are full.
                if x != 0 {
                    board.set(Vec2i::new(x, y), Block::filled(Formation::Z, Vec2i::ZERO));
                }
            }
            for &row in &full {
                fill_row(&mut board, row as i32, &[]);
            }

            let before = board.filled_count();
            let clear = board.clearable_rows();
            proptest::prop_assert_eq!(clear.row_indices().to_vec(), full.iter().copied().collect::<Vec<_>>());

            board.apply_clear(&clear);
            proptest::prop_assert_eq!(board.filled_count(), before - full.len() * COLS);
            proptest::prop_assert_eq!(board.clearable_rows().count(), 0);
            for (index, block) in board.blocks().iter().enumerate() {
                if !block.is_empty() {
                    proptest::prop_assert_eq!(Board::index(block.position), Some(index));
                }
            }
        }
    }
}
