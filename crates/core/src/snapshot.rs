use serde::Serialize;

use crate::ruleset::Timer;
use crate::shapes::Shape;
use crate::types::{Vec2i, COLS, ROWS, SHAPE_BLOCKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ShapeSnapshot {
    pub index: usize,
    pub offset: Vec2i,
    /// Absolute board positions of the four blocks
    pub cells: [Vec2i; SHAPE_BLOCKS],
    /// Formation tag (1..=7)
    pub formation: u8,
}

impl From<Shape> for ShapeSnapshot {
    fn from(value: Shape) -> Self {
        Self {
            index: value.index,
            offset: value.offset,
            cells: value.cells(),
            formation: value.formation().tag() as u8,
        }
    }
}

impl Default for ShapeSnapshot {
    fn default() -> Self {
        Self::from(Shape::spawn(0))
    }
}

/// Read-only copy of everything a renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Formation tag per cell, top row first, 0 = empty
    pub board: [[u8; COLS]; ROWS],
    pub shape: ShapeSnapshot,
    pub next_shape: ShapeSnapshot,
    pub rows: u32,
    pub level: f64,
    pub score: f64,
    pub timer: Timer,
    pub game_over: bool,
    /// Raw change-status bits at snapshot time
    pub change_status: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; COLS]; ROWS];
        self.shape = ShapeSnapshot::default();
        self.next_shape = ShapeSnapshot::default();
        self.rows = 0;
        self.level = 0.0;
        self.score = 0.0;
        self.timer = Timer::default();
        self.game_over = false;
        self.change_status = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Compact JSON for external renderers and recordings
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; COLS]; ROWS],
            shape: ShapeSnapshot::default(),
            next_shape: ShapeSnapshot::default(),
            rows: 0,
            level: 0.0,
            score: 0.0,
            timer: Timer::default(),
            game_over: false,
            change_status: 0,
        }
    }
}
