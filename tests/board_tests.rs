//! Board tests - grid access, merge and row clearing through the public API

use tetromino_rules::core::{Board, ClearResult, Placement, Shape};
use tetromino_rules::types::{Block, Formation, Vec2i, COLS, ROWS};

fn fill(board: &mut Board, x: i32, y: i32, formation: Formation) {
    assert!(board.set(Vec2i::new(x, y), Block::filled(formation, Vec2i::ZERO)));
}

fn fill_row(board: &mut Board, y: i32, formation: Formation) {
    for x in 0..COLS as i32 {
        fill(board, x, y, formation);
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), COLS);
    assert_eq!(board.height(), ROWS);
    assert_eq!(board.filled_count(), 0);

    for row in 0..ROWS {
        for col in 0..COLS {
            assert!(board.at(row, col).is_empty(), "cell ({}, {}) should be empty", col, row);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(Vec2i::new(-1, 0)), None);
    assert_eq!(board.get(Vec2i::new(0, -1)), None);
    assert_eq!(board.get(Vec2i::new(COLS as i32, 0)), None);
    assert_eq!(board.get(Vec2i::new(0, ROWS as i32)), None);
}

#[test]
fn test_board_set_stamps_position() {
    let mut board = Board::new();
    fill(&mut board, 5, 10, Formation::T);

    let block = board.get(Vec2i::new(5, 10)).unwrap();
    assert_eq!(block.formation(), Some(Formation::T));
    assert_eq!(block.position, Vec2i::new(5, 10));
    assert_eq!(board.at(10, 5), &block);
    assert_eq!(board.row(10)[5], block);
    assert_eq!(board.blocks()[10 * COLS + 5], block);

    assert!(!board.set(Vec2i::new(COLS as i32, 0), Block::filled(Formation::T, Vec2i::ZERO)));
}

#[test]
fn test_empty_board_has_nothing_to_clear() {
    let mut board = Board::new();
    fill(&mut board, 3, 4, Formation::S);
    board.clear();

    let clear = board.clearable_rows();
    assert_eq!(clear.count(), 0);

    let before = board.clone();
    assert!(!board.apply_clear(&clear));
    assert_eq!(board, before);
}

#[test]
fn test_zero_count_clear_leaves_partial_board_untouched() {
    let mut board = Board::new();
    for x in 0..COLS as i32 - 1 {
        fill(&mut board, x, 0, Formation::I);
    }
    fill(&mut board, 4, 7, Formation::Z);

    let before = board.clone();
    assert!(!board.apply_clear(&ClearResult::default()));
    assert_eq!(board, before);
}

#[test]
fn test_clear_rows_three_and_seven() {
    let mut board = Board::new();
    // Every row partially filled, rows 3 and 7 completely.
    for y in 0..ROWS as i32 {
        fill(&mut board, (y % COLS as i32).max(1) - 1, y, Formation::L);
    }
    fill_row(&mut board, 3, Formation::I);
    fill_row(&mut board, 7, Formation::I);
    fill(&mut board, 9, 8, Formation::T);

    let clear = board.clearable_rows();
    assert_eq!(clear.row_indices(), &[3, 7]);

    assert!(board.apply_clear(&clear));

    let moved = board.get(Vec2i::new(9, 6)).unwrap();
    assert_eq!(moved.formation(), Some(Formation::T));
    assert_eq!(moved.position, Vec2i::new(9, 6));
    assert!(board.row(18).iter().all(Block::is_empty));
    assert!(board.row(19).iter().all(Block::is_empty));
    assert_eq!(board.clearable_rows().count(), 0);
}

#[test]
fn test_clear_keeps_rows_below_in_place() {
    let mut board = Board::new();
    fill(&mut board, 2, 0, Formation::J);
    fill_row(&mut board, 1, Formation::O);
    fill(&mut board, 6, 2, Formation::S);

    let clear = board.clearable_rows();
    assert!(board.apply_clear(&clear));

    assert_eq!(board.get(Vec2i::new(2, 0)).unwrap().formation(), Some(Formation::J));
    assert_eq!(board.get(Vec2i::new(6, 1)).unwrap().formation(), Some(Formation::S));
    assert!(board.get(Vec2i::new(6, 2)).unwrap().is_empty());
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_four_row_clear_empties_board() {
    let mut board = Board::new();
    for y in 0..4 {
        fill_row(&mut board, y, Formation::I);
    }

    let clear = board.clearable_rows();
    assert_eq!(clear.row_indices(), &[0, 1, 2, 3]);
    assert!(board.apply_clear(&clear));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_merge_then_overlap() {
    for index in 0..19 {
        let mut board = Board::new();
        let mut shape = Shape::spawn(index);
        shape.offset.y -= 8;

        assert_eq!(board.overlap(&shape, Vec2i::ZERO), Placement::Valid);
        assert_eq!(board.merge(&shape), 0);
        assert_eq!(board.overlap(&shape, Vec2i::ZERO), Placement::Overlap);
        assert_eq!(board.filled_count(), 4);
    }
}

#[test]
fn test_overlap_reports_outside_before_filled() {
    let mut board = Board::new();
    let mut shape = Shape::spawn(0);
    shape.offset = Vec2i::new(-1, -2); // O in the bottom-left corner
    board.merge(&shape);

    assert_eq!(board.overlap(&shape, Vec2i::LEFT), Placement::Outside);
    assert_eq!(board.overlap(&shape, Vec2i::DOWN), Placement::Outside);
    assert_eq!(board.overlap(&shape, Vec2i::RIGHT), Placement::Overlap);
}

#[test]
fn test_formation_grid_is_top_row_first() {
    let mut board = Board::new();
    fill(&mut board, 0, 0, Formation::Z);
    fill(&mut board, 9, 19, Formation::O);

    let mut grid = [[0u8; COLS]; ROWS];
    board.write_formation_grid(&mut grid);
    assert_eq!(grid[ROWS - 1][0], Formation::Z.tag() as u8);
    assert_eq!(grid[0][9], Formation::O.tag() as u8);
    assert_eq!(grid.iter().flatten().filter(|&&c| c != 0).count(), 2);
}
