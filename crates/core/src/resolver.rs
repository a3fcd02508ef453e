//! Move resolver - pure outcome of a translation or rotation attempt
//!
//! Nothing here mutates a board or a shape. Each attempt produces a [`MoveResult`]
//! describing what should happen; [`Shape::apply`] and the game state act on it.

use crate::board::{Board, Placement};
use crate::shapes::{rotate_index, Shape};
use crate::types::{RotateDirection, Vec2i};

/// What an attempt amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// Zero vector or no-op rotation; nothing changes
    Mute,
    /// Legal; the new offset or index is in the result
    Success,
    /// A downward move was blocked; the shape must lock into the board
    Merge,
    /// Blocked for any other reason; ignored
    Failure,
    /// Blocked while the shape still sits at its spawn offset
    GameOver,
}

/// Resolved attempt, consumed immediately by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveResult {
    pub outcome: MoveOutcome,
    /// Requested translation, zero for rotations
    pub vector: Vec2i,
    /// Shape offset after applying the result
    pub new_position: Vec2i,
    pub old_index: usize,
    /// Shape index after applying the result
    pub new_index: usize,
    pub user_initiated: bool,
}

impl MoveResult {
    fn translation(shape: &Shape, outcome: MoveOutcome, vector: Vec2i, user_initiated: bool) -> Self {
        let new_position = match outcome {
            MoveOutcome::Success => shape.offset + vector,
            _ => shape.offset,
        };
        Self {
            outcome,
            vector,
            new_position,
            old_index: shape.index,
            new_index: shape.index,
            user_initiated,
        }
    }

    fn rotation(shape: &Shape, outcome: MoveOutcome, new_index: usize, user_initiated: bool) -> Self {
        Self {
            outcome,
            vector: Vec2i::ZERO,
            new_position: shape.offset,
            old_index: shape.index,
            new_index,
            user_initiated,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == MoveOutcome::Success
    }

    /// Successful move towards the floor
    pub fn is_downward_success(&self) -> bool {
        self.is_success() && self.vector.y < 0
    }

    /// Successful orientation change
    pub fn is_rotation(&self) -> bool {
        self.old_index != self.new_index
    }
}

/// Resolve moving `shape` by `vector` on `board`
pub fn resolve_translation(
    shape: &Shape,
    board: &Board,
    vector: Vec2i,
    user_initiated: bool,
) -> MoveResult {
    if vector.is_zero() {
        return MoveResult::translation(shape, MoveOutcome::Mute, vector, user_initiated);
    }

    let outcome = match board.overlap(shape, vector) {
        Placement::Valid => MoveOutcome::Success,
        Placement::Outside | Placement::Overlap => {
            if shape.is_at_spawn() {
                MoveOutcome::GameOver
            } else if vector.y < 0 {
                MoveOutcome::Merge
            } else {
                MoveOutcome::Failure
            }
        }
    };

    MoveResult::translation(shape, outcome, vector, user_initiated)
}

/// Resolve rotating `shape` in place on `board`
///
/// No kicks: the rotated orientation either fits at the same offset or the
/// rotation fails.
pub fn resolve_rotation(shape: &Shape, board: &Board, direction: RotateDirection) -> MoveResult {
    resolve_rotation_by(shape, board, direction, true)
}

/// [`resolve_rotation`] with an explicit initiator
pub fn resolve_rotation_by(
    shape: &Shape,
    board: &Board,
    direction: RotateDirection,
    user_initiated: bool,
) -> MoveResult {
    if direction == RotateDirection::None {
        return MoveResult::rotation(shape, MoveOutcome::Mute, shape.index, user_initiated);
    }

    let new_index = rotate_index(shape.index, direction);
    let probe = shape.with_index(new_index);

    match board.overlap(&probe, Vec2i::ZERO) {
        Placement::Valid => {
            MoveResult::rotation(shape, MoveOutcome::Success, new_index, user_initiated)
        }
        _ => MoveResult::rotation(shape, MoveOutcome::Failure, shape.index, user_initiated),
    }
}

impl Shape {
    /// Apply a successful result; anything else is ignored
    ///
    /// Returns true if the shape changed.
    pub fn apply(&mut self, result: &MoveResult) -> bool {
        if result.outcome != MoveOutcome::Success {
            return false;
        }

        let before = *self;
        self.offset = result.new_position;
        self.index = result.new_index;
        *self != before
    }
}
