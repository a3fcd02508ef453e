//! Property tests for board placement, move resolution and long random rollouts

use proptest::prelude::*;
use tetromino_rules::core::{
    resolve_translation, rotate_index, Board, GameState, MoveOutcome, NullSink, Placement, Shape,
    CATALOG_LEN, FORMATION_RANGES,
};
use tetromino_rules::types::{Block, Formation, RotateDirection, Vec2i, COLS, ROWS};

fn board_from(cells: &[(i32, i32)]) -> Board {
    let mut board = Board::new();
    for &(x, y) in cells {
        board.set(Vec2i::new(x, y), Block::filled(Formation::T, Vec2i::ZERO));
    }
    board
}

fn shape_at(index: usize, x: i32, y: i32) -> Shape {
    Shape {
        index,
        offset: Vec2i::new(x, y),
    }
}

proptest! {
    #[test]
    fn overlap_valid_iff_all_cells_inside_and_empty(
        cells in prop::collection::vec((0..COLS as i32, 0..ROWS as i32), 0..60),
        index in 0..CATALOG_LEN,
        x in -4i32..12,
        y in -4i32..22,
    ) {
        let board = board_from(&cells);
        let shape = shape_at(index, x, y);

        let expected = shape
            .cells()
            .iter()
            .all(|&c| !Board::is_outside(c) && !board.is_occupied(c));
        prop_assert_eq!(board.overlap(&shape, Vec2i::ZERO) == Placement::Valid, expected);
    }

    #[test]
    fn zero_vector_is_always_mute(
        cells in prop::collection::vec((0..COLS as i32, 0..ROWS as i32), 0..60),
        index in 0..CATALOG_LEN,
        x in -4i32..12,
        y in -4i32..22,
        user in any::<bool>(),
    ) {
        let board = board_from(&cells);
        let shape = shape_at(index, x, y);

        let result = resolve_translation(&shape, &board, Vec2i::ZERO, user);
        prop_assert_eq!(result.outcome, MoveOutcome::Mute);
        prop_assert_eq!(result.new_position, shape.offset);
    }

    #[test]
    fn rotation_stays_inside_formation(index in 0..CATALOG_LEN, cw in any::<bool>()) {
        let direction = if cw { RotateDirection::Clockwise } else { RotateDirection::CounterClockwise };
        let rotated = rotate_index(index, direction);
        let range = FORMATION_RANGES.iter().find(|r| r.contains(index)).copied().unwrap();
        prop_assert!(range.contains(rotated));
        prop_assert_eq!(rotate_index(rotated, direction.opposite()), index);
    }

    #[test]
    fn merged_shape_overlaps_itself(index in 0..CATALOG_LEN, x in 0i32..6, y in 0i32..16) {
        let mut board = Board::new();
        let shape = shape_at(index, x, y);
        prop_assume!(board.overlap(&shape, Vec2i::ZERO) == Placement::Valid);

        board.merge(&shape);
        prop_assert_eq!(board.overlap(&shape, Vec2i::ZERO), Placement::Overlap);
    }

    #[test]
    fn random_rollout_keeps_counters_consistent(seed in any::<u32>(), steps in 1usize..400) {
        let mut state = GameState::new(seed).with_trace_sink(NullSink);
        let moves = [Vec2i::LEFT, Vec2i::RIGHT, Vec2i::DOWN, Vec2i::DOWN];
        let mut last_score = 0.0;
        let mut last_rows = 0;

        for step in 0..steps {
            if state.game_over() {
                break;
            }
            let pick = (seed as usize).wrapping_add(step * 7) % 6;
            match pick {
                0..=3 => { state.move_shape(moves[pick]); }
                4 => { state.rotate(RotateDirection::Clockwise); }
                _ => { state.tick(); }
            }

            prop_assert!(state.score() >= last_score);
            prop_assert!(state.rows() >= last_rows);
            prop_assert!(state.level() >= 1.0);
            prop_assert!(state.timer().duration >= 1);
            if !state.game_over() {
                prop_assert_eq!(state.board().overlap(state.shape(), Vec2i::ZERO), Placement::Valid);
            }
            prop_assert_eq!(state.board().clearable_rows().count(), 0);

            last_score = state.score();
            last_rows = state.rows();
        }
    }
}
