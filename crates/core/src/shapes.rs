//! Shapes module - fixed orientation catalog and rotation index math
//!
//! Every orientation of every formation is one catalog entry. Rotating a shape never
//! transforms coordinates; it just moves the shape's index to the neighbouring entry
//! of the same formation, wrapping at the ends of the formation's index range.
//!
//! | Formation | Indices | Orientations |
//! |-----------|---------|--------------|
//! | O | 0 | 1 |
//! | I | 1..=2 | 2 |
//! | S | 3..=4 | 2 |
//! | Z | 5..=6 | 2 |
//! | L | 7..=10 | 4 |
//! | J | 11..=14 | 4 |
//! | T | 15..=18 | 4 |
//!
//! Block positions are offsets from the shape's own offset inside a 4x4 box, with
//! y growing upwards like the board.

use crate::rng::SimpleRng;
use crate::types::{Block, Formation, RotateDirection, Vec2i, SHAPE_BLOCKS};

/// Number of catalog entries
pub const CATALOG_LEN: usize = 19;

/// One orientation of one formation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Board offset a freshly spawned shape of this orientation starts at
    pub spawn_offset: Vec2i,
    /// Filled blocks, positions relative to the shape offset
    pub blocks: [Block; SHAPE_BLOCKS],
}

const fn entry(formation: Formation, spawn: (i32, i32), cells: [(i32, i32); 4]) -> CatalogEntry {
    CatalogEntry {
        spawn_offset: Vec2i::new(spawn.0, spawn.1),
        blocks: [
            Block::filled(formation, Vec2i::new(cells[0].0, cells[0].1)),
            Block::filled(formation, Vec2i::new(cells[1].0, cells[1].1)),
            Block::filled(formation, Vec2i::new(cells[2].0, cells[2].1)),
            Block::filled(formation, Vec2i::new(cells[3].0, cells[3].1)),
        ],
    }
}

/// The orientation table, grouped by formation
pub static CATALOG: [CatalogEntry; CATALOG_LEN] = [
    // O
    entry(Formation::O, (3, 15), [(1, 2), (2, 2), (1, 3), (2, 3)]),
    // I
    entry(Formation::I, (4, 16), [(1, 0), (1, 1), (1, 2), (1, 3)]),
    entry(Formation::I, (3, 17), [(0, 2), (1, 2), (2, 2), (3, 2)]),
    // S
    entry(Formation::S, (3, 16), [(2, 1), (1, 2), (2, 2), (1, 3)]),
    entry(Formation::S, (3, 16), [(1, 2), (2, 2), (2, 3), (3, 3)]),
    // Z
    entry(Formation::Z, (3, 16), [(1, 1), (1, 2), (2, 2), (2, 3)]),
    entry(Formation::Z, (3, 16), [(2, 2), (3, 2), (1, 3), (2, 3)]),
    // L
    entry(Formation::L, (3, 16), [(1, 1), (2, 1), (1, 2), (1, 3)]),
    entry(Formation::L, (4, 17), [(0, 1), (0, 2), (1, 2), (2, 2)]),
    entry(Formation::L, (4, 16), [(1, 1), (1, 2), (0, 3), (1, 3)]),
    entry(Formation::L, (4, 16), [(0, 2), (1, 2), (2, 2), (2, 3)]),
    // J
    entry(Formation::J, (3, 16), [(1, 1), (2, 1), (2, 2), (2, 3)]),
    entry(Formation::J, (3, 16), [(1, 2), (2, 2), (3, 2), (1, 3)]),
    entry(Formation::J, (2, 16), [(2, 1), (2, 2), (2, 3), (3, 3)]),
    entry(Formation::J, (3, 17), [(3, 1), (1, 2), (2, 2), (3, 2)]),
    // T
    entry(Formation::T, (3, 16), [(1, 1), (1, 2), (2, 2), (1, 3)]),
    entry(Formation::T, (4, 17), [(1, 1), (0, 2), (1, 2), (2, 2)]),
    entry(Formation::T, (4, 16), [(1, 1), (0, 2), (1, 2), (1, 3)]),
    entry(Formation::T, (4, 16), [(0, 2), (1, 2), (2, 2), (1, 3)]),
];

/// Inclusive catalog index range of one formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub min: usize,
    pub max: usize,
}

impl IndexRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.min && index <= self.max
    }

    pub fn len(&self) -> usize {
        self.max - self.min + 1
    }
}

/// Formation ranges in catalog order (same order as [`Formation::ALL`])
pub const FORMATION_RANGES: [IndexRange; 7] = [
    IndexRange::new(0, 0),
    IndexRange::new(1, 2),
    IndexRange::new(3, 4),
    IndexRange::new(5, 6),
    IndexRange::new(7, 10),
    IndexRange::new(11, 14),
    IndexRange::new(15, 18),
];

/// Catalog entry for `index`
///
/// # Panics
///
/// Panics if `index` is not a catalog index.
pub fn catalog_entry(index: usize) -> &'static CatalogEntry {
    assert!(index < CATALOG_LEN, "shape index {} out of catalog", index);
    &CATALOG[index]
}

/// Index range of the formation containing `index`
///
/// First range whose `max` is at or above `index`.
pub fn index_range_for(index: usize) -> IndexRange {
    assert!(index < CATALOG_LEN, "shape index {} out of catalog", index);
    FORMATION_RANGES
        .iter()
        .copied()
        .find(|range| index <= range.max)
        .unwrap_or(FORMATION_RANGES[FORMATION_RANGES.len() - 1])
}

/// Step `index` one orientation in `direction`, wrapping inside its formation
pub fn rotate_index(index: usize, direction: RotateDirection) -> usize {
    let range = index_range_for(index);
    let stepped = index as i64 + direction.step() as i64;

    if stepped > range.max as i64 {
        range.min
    } else if stepped < range.min as i64 {
        range.max
    } else {
        stepped as usize
    }
}

/// Pick one formation's first index, uniformly among the seven
///
/// New shapes always start in their canonical orientation.
pub fn random_shape_index(rng: &mut SimpleRng) -> usize {
    let pick = rng.next_range(FORMATION_RANGES.len() as u32) as usize;
    FORMATION_RANGES[pick].min
}

/// The active (or next) piece
///
/// Only the index and offset are per-piece state; blocks are looked up from the
/// catalog on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub index: usize,
    pub offset: Vec2i,
}

impl Shape {
    /// Shape at its catalog spawn offset
    pub fn spawn(index: usize) -> Self {
        Self {
            index,
            offset: catalog_entry(index).spawn_offset,
        }
    }

    /// Random canonical shape at its spawn offset
    pub fn random(rng: &mut SimpleRng) -> Self {
        Self::spawn(random_shape_index(rng))
    }

    /// Same offset, different orientation (used to probe rotations)
    pub fn with_index(self, index: usize) -> Self {
        assert!(index < CATALOG_LEN, "shape index {} out of catalog", index);
        Self { index, ..self }
    }

    pub fn blocks(&self) -> &'static [Block; SHAPE_BLOCKS] {
        &catalog_entry(self.index).blocks
    }

    pub fn spawn_offset(&self) -> Vec2i {
        catalog_entry(self.index).spawn_offset
    }

    pub fn formation(&self) -> Formation {
        let range = index_range_for(self.index);
        let slot = FORMATION_RANGES
            .iter()
            .position(|r| *r == range)
            .unwrap_or(0);
        Formation::ALL[slot]
    }

    /// True while the shape has not left its spawn offset
    pub fn is_at_spawn(&self) -> bool {
        self.offset == self.spawn_offset()
    }

    /// Absolute board positions of the four blocks
    pub fn cells(&self) -> [Vec2i; SHAPE_BLOCKS] {
        let blocks = *self.blocks();
        blocks.map(|block| block.position + self.offset)
    }
}
