use serde_json::Value;
use tetromino_rules::core::{GameState, NullSink, Shape};
use tetromino_rules::types::{ChangeStatus, Formation, Vec2i, COLS, ROWS};

#[test]
fn snapshot_json_has_stable_shape() {
    let mut state = GameState::new(77).with_trace_sink(NullSink);
    state.set_shape(Shape::spawn(0));
    let json = state.snapshot().to_json().unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();

    for key in [
        "board",
        "shape",
        "next_shape",
        "rows",
        "level",
        "score",
        "timer",
        "game_over",
        "change_status",
    ] {
        assert!(v.get(key).is_some(), "missing {}", key);
    }

    assert_eq!(v["board"].as_array().unwrap().len(), ROWS);
    assert_eq!(v["shape"]["index"], 0);
    assert_eq!(v["shape"]["formation"], Formation::O.tag());
    assert_eq!(v["shape"]["offset"]["x"], 3);
    assert_eq!(v["shape"]["cells"].as_array().unwrap().len(), 4);
    assert_eq!(v["timer"]["duration"], 120);
    assert_eq!(v["level"], 1.0);
}

#[test]
fn snapshot_board_tracks_locked_cells() {
    let mut state = GameState::new(77).with_trace_sink(NullSink);
    state.set_shape(Shape::spawn(0));
    while state.force_shape(Vec2i::DOWN).map(|r| r.is_success()) == Some(true) {}

    let snap = state.snapshot();
    let tag = Formation::O.tag() as u8;
    // O rests in columns 4 and 5 of the two bottom rows; the grid is top row first.
    assert_eq!(snap.board[ROWS - 1][4], tag);
    assert_eq!(snap.board[ROWS - 1][5], tag);
    assert_eq!(snap.board[ROWS - 2][4], tag);
    assert_eq!(snap.board[ROWS - 2][5], tag);
    assert_eq!(snap.board.iter().flatten().filter(|&&c| c != 0).count(), 4);
    assert!(snap.board.iter().all(|row| row.len() == COLS));

    let status = ChangeStatus::from_bits(snap.change_status);
    assert!(status.contains(ChangeStatus::BOARD | ChangeStatus::NEXT_SHAPE));
    assert!(snap.playable());
}
