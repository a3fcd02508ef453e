//! Core rules engine - pure, deterministic, and testable
//!
//! This crate holds the whole falling-block rule set: the board, the shape catalog,
//! move resolution, row clearing, scoring, levels and the gravity timer. It has
//! **no dependencies** on rendering, input devices, or I/O.
//!
//! - **Deterministic**: the same seed produces the same shape sequence
//! - **Pluggable rules**: scoring and timing live behind the [`Ruleset`] trait
//! - **Allocation-free hot path**: moves, locks and clears work on fixed arrays
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, overlap checks, merge and row clearing
//! - [`shapes`]: static catalog of the 19 orientations and rotation lookup
//! - [`resolver`]: turns a move or rotation request into a [`MoveResult`]
//! - [`ruleset`]: scoring, level and timer policy ([`StandardRuleset`])
//! - [`game_state`]: owns everything and applies resolved results
//! - [`snapshot`]: plain copy of the state for renderers
//! - [`rng`]: small LCG used for shape selection
//! - [`trace`]: optional event lines through the `log` facade
//!
//! # Coordinates
//!
//! `x` is the column (0..10, left to right) and `y` the row (0..20, floor to top).
//! Gravity is the vector `(0, -1)`.
//!
//! # Example
//!
//! ```
//! use tetromino_rules_core::{GameState, MoveOutcome};
//! use tetromino_rules_core::types::Vec2i;
//!
//! let mut game = GameState::new(12345);
//!
//! let result = game.move_shape(Vec2i::LEFT).unwrap();
//! assert_eq!(result.outcome, MoveOutcome::Success);
//!
//! // Drop until the shape locks
//! while game.move_shape(Vec2i::DOWN).map(|r| r.outcome) == Some(MoveOutcome::Success) {}
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod resolver;
pub mod rng;
pub mod ruleset;
pub mod shapes;
pub mod snapshot;
pub mod trace;

pub use tetromino_rules_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearResult, Placement};
pub use game_state::{GameState, START_LEVEL};
pub use resolver::{resolve_rotation, resolve_rotation_by, resolve_translation, MoveOutcome, MoveResult};
pub use rng::SimpleRng;
pub use ruleset::{ConfigError, Ruleset, RulesetConfig, StandardRuleset, Timer};
pub use shapes::{
    catalog_entry, index_range_for, random_shape_index, rotate_index, CatalogEntry, IndexRange,
    Shape, CATALOG, CATALOG_LEN, FORMATION_RANGES,
};
pub use snapshot::{GameSnapshot, ShapeSnapshot};
pub use trace::{LogSink, NullSink, TraceSink, Tracer, LOG_TARGET};
