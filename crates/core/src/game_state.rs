//! Game state module - owns the board, the active and next shapes, and the counters
//!
//! This is the only place engine state changes. Every mutator asks the resolver
//! what an input amounts to, applies that result, runs the lock/clear/score pipeline
//! when a shape lands, and records what changed in the frame's [`ChangeStatus`].
//!
//! The change status only accumulates. A renderer reads it once per frame and calls
//! [`GameState::clear_change_status`]; several effects from one input are all visible.
//!
//! Callers must serialize access: input handling and the gravity tick go through the
//! same `&mut GameState`.

use std::fmt;
use std::sync::Arc;

use crate::board::{Board, ClearResult, Placement};
use crate::resolver::{resolve_rotation, resolve_translation, MoveOutcome, MoveResult};
use crate::rng::SimpleRng;
use crate::ruleset::{Ruleset, StandardRuleset, Timer};
use crate::shapes::Shape;
use crate::snapshot::{GameSnapshot, ShapeSnapshot};
use crate::trace::{TraceSink, Tracer};
use crate::types::{ChangeStatus, RotateDirection, Vec2i};

/// Level a new game starts at
pub const START_LEVEL: f64 = 1.0;

/// How a translation request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drive {
    /// Player input: soft-drop score and timer reset apply
    User,
    /// Gravity or host-forced move: no score
    Forced,
}

/// Complete game state
#[derive(Clone)]
pub struct GameState {
    board: Board,
    shape: Shape,
    next_shape: Shape,
    rows: u32,
    level: f64,
    score: f64,
    timer: Timer,
    change_status: ChangeStatus,
    game_over: bool,
    rng: SimpleRng,
    ruleset: Arc<dyn Ruleset>,
    tracer: Tracer,
}

impl GameState {
    /// Create a new game with the given RNG seed and the standard ruleset
    pub fn new(seed: u32) -> Self {
        Self::with_ruleset(seed, Arc::new(StandardRuleset::new()))
    }

    /// Create a new game with a custom ruleset
    pub fn with_ruleset(seed: u32, ruleset: Arc<dyn Ruleset>) -> Self {
        let mut rng = SimpleRng::new(seed);
        let shape = Shape::random(&mut rng);
        let next_shape = Shape::random(&mut rng);
        let timer = Timer::with_duration(ruleset.timer_duration_for_level(START_LEVEL));

        let state = Self {
            board: Board::new(),
            shape,
            next_shape,
            rows: 0,
            level: START_LEVEL,
            score: 0.0,
            timer,
            change_status: ChangeStatus::EMPTY,
            game_over: false,
            rng,
            ruleset,
            tracer: Tracer::default(),
        };
        state.trace_init("new game");
        state
    }

    /// Replace the trace sink
    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.tracer = Tracer::new(sink);
        self
    }

    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.tracer = tracer;
    }

    /// Start over: empty board, two fresh shapes, counters back to zero
    ///
    /// The random sequence continues rather than restarting.
    pub fn reset(&mut self) {
        self.board.clear();
        self.shape = Shape::random(&mut self.rng);
        self.next_shape = Shape::random(&mut self.rng);
        self.rows = 0;
        self.level = START_LEVEL;
        self.score = 0.0;
        self.timer = Timer::with_duration(self.ruleset.timer_duration_for_level(START_LEVEL));
        self.game_over = false;
        self.change_status |= ChangeStatus::BOARD
            | ChangeStatus::SHAPE_OFFSET
            | ChangeStatus::SHAPE_INDEX
            | ChangeStatus::NEXT_SHAPE
            | ChangeStatus::ROWS
            | ChangeStatus::LEVEL
            | ChangeStatus::SCORE
            | ChangeStatus::TIMER_RESET;
        self.trace_init("reset");
    }

    fn trace_init(&self, what: &str) {
        self.tracer.emit(format_args!(
            "{}: ruleset={} shape={} next={} timer={}",
            what,
            self.ruleset.label(),
            self.shape.index,
            self.next_shape.index,
            self.timer.duration
        ));
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn next_shape(&self) -> &Shape {
        &self.next_shape
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn timer(&self) -> Timer {
        self.timer
    }

    pub fn ruleset(&self) -> &dyn Ruleset {
        self.ruleset.as_ref()
    }

    pub fn change_status(&self) -> ChangeStatus {
        self.change_status
    }

    /// True if anything changed since the last clear
    pub fn is_modified(&self) -> bool {
        !self.change_status.is_empty()
    }

    /// End-of-frame acknowledgement from the renderer
    pub fn clear_change_status(&mut self) {
        self.change_status.clear();
    }

    /// Replace the active shape (puzzle setups and tests)
    #[doc(hidden)]
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.change_status |= ChangeStatus::SHAPE_OFFSET | ChangeStatus::SHAPE_INDEX;
    }

    /// Replace the queued shape (puzzle setups and tests)
    #[doc(hidden)]
    pub fn set_next_shape(&mut self, shape: Shape) {
        self.next_shape = shape;
        self.change_status |= ChangeStatus::NEXT_SHAPE;
    }

    /// Player move: shift or soft drop
    ///
    /// A successful downward move scores and restarts the gravity countdown; a blocked
    /// downward move locks the shape. Returns `None` once the game is over.
    pub fn move_shape(&mut self, vector: Vec2i) -> Option<MoveResult> {
        self.translate(vector, Drive::User)
    }

    /// Unconditional move that never scores (gravity, host effects)
    pub fn force_shape(&mut self, vector: Vec2i) -> Option<MoveResult> {
        self.translate(vector, Drive::Forced)
    }

    /// Rotate in place; blocked rotations are ignored
    pub fn rotate(&mut self, direction: RotateDirection) -> Option<MoveResult> {
        if self.game_over {
            return None;
        }

        let result = resolve_rotation(&self.shape, &self.board, direction);
        if self.shape.apply(&result) {
            self.change_status |= ChangeStatus::SHAPE_INDEX | ChangeStatus::MOVE_SUCCEEDED;
        }
        Some(result)
    }

    /// Advance gravity by one tick
    ///
    /// Returns the forced drop's result on the tick the countdown elapses.
    pub fn tick(&mut self) -> Option<MoveResult> {
        if self.game_over {
            return None;
        }

        self.timer = self.ruleset.advance_timer(self.timer);
        if !self.timer.triggered {
            return None;
        }

        self.timer.reset();
        self.change_status |= ChangeStatus::TIMER_RESET;
        self.force_shape(Vec2i::DOWN)
    }

    fn translate(&mut self, vector: Vec2i, drive: Drive) -> Option<MoveResult> {
        if self.game_over {
            return None;
        }

        let result = resolve_translation(&self.shape, &self.board, vector, drive == Drive::User);

        match result.outcome {
            MoveOutcome::Mute | MoveOutcome::Failure => {}
            MoveOutcome::Success => {
                self.shape.apply(&result);
                self.change_status |= ChangeStatus::SHAPE_OFFSET | ChangeStatus::MOVE_SUCCEEDED;

                if drive == Drive::User && vector.y < 0 {
                    let award = self.ruleset.score_for_translation(&result)
                        * self.ruleset.level_score_multiplier(self.level);
                    self.add_score(award);
                    self.timer.reset();
                    self.change_status |= ChangeStatus::TIMER_RESET;
                }
            }
            MoveOutcome::Merge => self.lock_shape(),
            MoveOutcome::GameOver => self.end_game("blocked at spawn"),
        }

        Some(result)
    }

    fn add_score(&mut self, award: f64) {
        if award != 0.0 {
            self.score += award;
            self.change_status |= ChangeStatus::SCORE;
        }
    }

    fn end_game(&mut self, why: &str) {
        self.game_over = true;
        self.change_status |= ChangeStatus::GAME_OVER;
        self.tracer.emit(format_args!(
            "game over ({}): rows={} level={:.2} score={:.3}",
            why, self.rows, self.level, self.score
        ));
    }

    /// Lock the active shape, clear rows, score, and bring in the next shape
    fn lock_shape(&mut self) {
        let outside = self.board.merge(&self.shape);
        if outside > 0 {
            self.tracer.emit(format_args!(
                "lock: {} block(s) of shape {} at {} landed outside the board",
                outside, self.shape.index, self.shape.offset
            ));
        }
        self.change_status |= ChangeStatus::BOARD;

        let clear = self.board.clearable_rows();
        if self.board.apply_clear(&clear) {
            self.tracer
                .emit(format_args!("cleared rows {:?}", clear.row_indices()));
            self.award_clear(&clear);
        }

        self.shape = self.next_shape;
        self.next_shape = Shape::random(&mut self.rng);
        self.change_status |=
            ChangeStatus::SHAPE_OFFSET | ChangeStatus::SHAPE_INDEX | ChangeStatus::NEXT_SHAPE;

        if self.board.overlap(&self.shape, Vec2i::ZERO) != Placement::Valid {
            self.end_game("no room to spawn");
        }
    }

    fn award_clear(&mut self, clear: &ClearResult) {
        self.rows += clear.count() as u32;
        self.change_status |= ChangeStatus::ROWS;

        let increment = self.ruleset.level_increment_for_clear(self.level, clear);
        if increment != 0.0 {
            let before = self.level;
            self.level += increment;
            self.change_status |= ChangeStatus::LEVEL;

            let duration = self.ruleset.timer_duration_for_level(self.level);
            if duration != self.timer.duration {
                self.timer.duration = duration.max(1);
                self.tracer.emit(format_args!(
                    "level {:.2} -> {:.2}, gravity every {} ticks",
                    before, self.level, duration
                ));
            }
        }

        let award =
            self.ruleset.score_for_clear(clear) * self.ruleset.level_score_multiplier(self.level);
        self.add_score(award);
    }

    /// Fill a snapshot in place
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_formation_grid(&mut out.board);
        out.shape = ShapeSnapshot::from(self.shape);
        out.next_shape = ShapeSnapshot::from(self.next_shape);
        out.rows = self.rows;
        out.level = self.level;
        out.score = self.score;
        out.timer = self.timer;
        out.game_over = self.game_over;
        out.change_status = self.change_status.bits();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("ruleset", &self.ruleset.label())
            .field("shape", &self.shape)
            .field("next_shape", &self.next_shape)
            .field("rows", &self.rows)
            .field("level", &self.level)
            .field("score", &self.score)
            .field("timer", &self.timer)
            .field("change_status", &self.change_status)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
