//! Core types module - shared value types and constants
//!
//! This crate defines the plain data used throughout the rules engine.
//! Everything here is a `Copy` value type with no behaviour beyond simple algebra
//! and bit manipulation, so it can be shared freely between the engine and any renderer.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (x = 0 is the left wall)
//! - **Rows**: 20 (y = 0 is the floor, y = 19 is the top row)
//!
//! Pieces spawn near the top and fall towards `y = 0`, so a downward move is a
//! vector with a negative `y` component ([`Vec2i::DOWN`]).
//!
//! # Block Status Layout
//!
//! | Bits | Mask | Meaning |
//! |------|------|---------|
//! | 0 | `0x0000_0001` | filled flag |
//! | 1..=28 | `0x1FFF_FFFE` | reserved time/metadata bits |
//! | 29..=31 | `0xE000_0000` | formation tag (1..=7) |
//!
//! # Examples
//!
//! ```
//! use tetromino_rules_types::{Block, Formation, Vec2i, COLS, ROWS};
//!
//! let block = Block::filled(Formation::T, Vec2i::new(4, 0));
//! assert!(!block.is_empty());
//! assert_eq!(block.formation(), Some(Formation::T));
//!
//! assert!(Block::EMPTY.is_empty());
//! assert_eq!(Vec2i::new(3, 16) + Vec2i::DOWN, Vec2i::new(3, 15));
//!
//! assert_eq!(COLS, 10);
//! assert_eq!(ROWS, 20);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, BitOr, BitOrAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Board height in rows (20)
pub const ROWS: usize = 20;

/// Board width in columns (10)
pub const COLS: usize = 10;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = ROWS * COLS;

/// Number of blocks in every shape
pub const SHAPE_BLOCKS: usize = 4;

/// Most rows a single lock can complete with four-block pieces
pub const ROW_CLEAR_MAX: usize = 4;

/// Integer 2D vector used for board positions and move offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Vec2i = Vec2i::new(0, 0);
    /// One row towards the floor
    pub const DOWN: Vec2i = Vec2i::new(0, -1);
    pub const LEFT: Vec2i = Vec2i::new(-1, 0);
    pub const RIGHT: Vec2i = Vec2i::new(1, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

impl Add for Vec2i {
    type Output = Vec2i;

    fn add(self, rhs: Vec2i) -> Vec2i {
        Vec2i::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2i {
    fn add_assign(&mut self, rhs: Vec2i) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2i {
    type Output = Vec2i;

    fn sub(self, rhs: Vec2i) -> Vec2i {
        Vec2i::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2i {
    type Output = Vec2i;

    fn neg(self) -> Vec2i {
        Vec2i::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vec2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Float 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2f {
    type Output = Vec2f;

    fn add(self, rhs: Vec2f) -> Vec2f {
        Vec2f::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2f {
    type Output = Vec2f;

    fn sub(self, rhs: Vec2f) -> Vec2f {
        Vec2f::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<Vec2i> for Vec2f {
    fn from(v: Vec2i) -> Self {
        Vec2f::new(v.x as f32, v.y as f32)
    }
}

/// Integer 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3i {
    type Output = Vec3i;

    fn add(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3i {
    type Output = Vec3i;

    fn sub(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Float 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3f {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3f {
    type Output = Vec3f;

    fn add(self, rhs: Vec3f) -> Vec3f {
        Vec3f::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3f {
    type Output = Vec3f;

    fn sub(self, rhs: Vec3f) -> Vec3f {
        Vec3f::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// The seven tetromino formations
///
/// The discriminant is the 3-bit tag stored in the top bits of a [`Block`] status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formation {
    O = 1,
    I = 2,
    S = 3,
    Z = 4,
    L = 5,
    J = 6,
    T = 7,
}

impl Formation {
    /// All formations in catalog order
    pub const ALL: [Formation; 7] = [
        Formation::O,
        Formation::I,
        Formation::S,
        Formation::Z,
        Formation::L,
        Formation::J,
        Formation::T,
    ];

    /// 3-bit tag (1..=7)
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// Inverse of [`Formation::tag`]; 0 and out-of-range tags yield `None`
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Formation::O),
            2 => Some(Formation::I),
            3 => Some(Formation::S),
            4 => Some(Formation::Z),
            5 => Some(Formation::L),
            6 => Some(Formation::J),
            7 => Some(Formation::T),
            _ => None,
        }
    }

    /// Parse formation from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_rules_types::Formation;
    ///
    /// assert_eq!(Formation::from_str("l"), Some(Formation::L));
    /// assert_eq!(Formation::from_str("O"), Some(Formation::O));
    /// assert_eq!(Formation::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(Formation::O),
            "i" => Some(Formation::I),
            "s" => Some(Formation::S),
            "z" => Some(Formation::Z),
            "l" => Some(Formation::L),
            "j" => Some(Formation::J),
            "t" => Some(Formation::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Formation::O => "o",
            Formation::I => "i",
            Formation::S => "s",
            Formation::Z => "z",
            Formation::L => "l",
            Formation::J => "j",
            Formation::T => "t",
        }
    }
}

/// Filled flag
pub const BLOCK_FILLED: u32 = 0x0000_0001;

/// Reserved time/metadata bits, carried through untouched
pub const BLOCK_META: u32 = 0x1FFF_FFFE;

/// Formation tag bits
pub const BLOCK_FORMATION: u32 = 0xE000_0000;

const BLOCK_FORMATION_SHIFT: u32 = 29;

/// A single board cell or shape block
///
/// Only the filled bit decides emptiness. An empty block's position is meaningless,
/// so never compare against [`Block::EMPTY`] to test for emptiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub status: u32,
    pub position: Vec2i,
}

impl Block {
    pub const EMPTY: Block = Block {
        status: 0,
        position: Vec2i::new(-1, -1),
    };

    /// Filled block of `formation` at `position`
    pub const fn filled(formation: Formation, position: Vec2i) -> Self {
        Self {
            status: BLOCK_FILLED | (formation.tag() << BLOCK_FORMATION_SHIFT),
            position,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.status & BLOCK_FILLED == 0
    }

    /// Formation tag, only meaningful for filled blocks
    pub fn formation(&self) -> Option<Formation> {
        if self.is_empty() {
            return None;
        }
        Formation::from_tag((self.status & BLOCK_FORMATION) >> BLOCK_FORMATION_SHIFT)
    }

    pub fn meta(&self) -> u32 {
        (self.status & BLOCK_META) >> 1
    }

    /// Replace the reserved metadata bits, leaving filled flag and formation alone
    pub fn with_meta(self, meta: u32) -> Self {
        Self {
            status: (self.status & !BLOCK_META) | ((meta << 1) & BLOCK_META),
            ..self
        }
    }

    /// Same block moved to `position`
    pub fn at(self, position: Vec2i) -> Self {
        Self { position, ..self }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Rotation request
///
/// The discriminant is the step applied to a catalog index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDirection {
    Clockwise = 1,
    CounterClockwise = -1,
    None = 0,
}

impl RotateDirection {
    pub const fn step(self) -> i32 {
        self as i32
    }

    pub const fn opposite(self) -> Self {
        match self {
            RotateDirection::Clockwise => RotateDirection::CounterClockwise,
            RotateDirection::CounterClockwise => RotateDirection::Clockwise,
            RotateDirection::None => RotateDirection::None,
        }
    }

    /// Parse direction from string
    ///
    /// Accepts "cw" | "clockwise", "ccw" | "counterclockwise", "none" (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cw" | "clockwise" => Some(RotateDirection::Clockwise),
            "ccw" | "counterclockwise" => Some(RotateDirection::CounterClockwise),
            "none" => Some(RotateDirection::None),
            _ => None,
        }
    }
}

/// Accumulated "what changed" flags for a frame
///
/// Mutators only ever add flags. The renderer reads them and clears the set once
/// per frame.
///
/// ```
/// use tetromino_rules_types::ChangeStatus;
///
/// let mut status = ChangeStatus::EMPTY;
/// status |= ChangeStatus::SHAPE_OFFSET;
/// status |= ChangeStatus::SCORE;
/// assert!(status.contains(ChangeStatus::SCORE));
/// assert!(!status.contains(ChangeStatus::BOARD));
/// status.clear();
/// assert!(status.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChangeStatus(u32);

impl ChangeStatus {
    pub const EMPTY: ChangeStatus = ChangeStatus(0);
    pub const SHAPE_OFFSET: ChangeStatus = ChangeStatus(0x0001);
    pub const SHAPE_INDEX: ChangeStatus = ChangeStatus(0x0002);
    pub const NEXT_SHAPE: ChangeStatus = ChangeStatus(0x0004);
    pub const BOARD: ChangeStatus = ChangeStatus(0x0008);
    pub const ROWS: ChangeStatus = ChangeStatus(0x0010);
    pub const LEVEL: ChangeStatus = ChangeStatus(0x0020);
    pub const SCORE: ChangeStatus = ChangeStatus(0x0040);
    pub const MOVE_SUCCEEDED: ChangeStatus = ChangeStatus(0x0080);
    pub const TIMER_RESET: ChangeStatus = ChangeStatus(0x0100);
    pub const GAME_OVER: ChangeStatus = ChangeStatus(0x0200);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        ChangeStatus(bits)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `other` is set
    pub fn contains(self, other: ChangeStatus) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: ChangeStatus) {
        self.0 |= other.0;
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl BitOr for ChangeStatus {
    type Output = ChangeStatus;

    fn bitor(self, rhs: ChangeStatus) -> ChangeStatus {
        ChangeStatus(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChangeStatus {
    fn bitor_assign(&mut self, rhs: ChangeStatus) {
        self.0 |= rhs.0;
    }
}
