//! Error taxonomy
//!
//! Only level loading can fail. Collisions, hazards and exits are ordinary
//! tick outcomes and never show up here.

use thiserror::Error;

use crate::sim::TileId;

/// Malformed or inconsistent level data, raised once at load time
#[derive(Debug, Error)]
pub enum DataError {
    #[error("level grid has no cells")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({x}, {y}) holds malformed value {value:?}")]
    MalformedCell { x: usize, y: usize, value: String },

    #[error("cell ({x}, {y}) references unknown tile {id:02}")]
    InvalidTileReference { x: usize, y: usize, id: TileId },

    #[error("start cell ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("start cell ({x}, {y}) is not passable")]
    StartBlocked { x: i32, y: i32 },

    #[error("tile {0:02} is defined more than once")]
    DuplicateTile(TileId),

    #[error("tile id 00 is reserved for empty cells")]
    ReservedTileId,

    #[error("level {stage}-{level} not found")]
    LevelNotFound { stage: u32, level: u32 },

    #[error("malformed level pack: {0}")]
    Pack(#[from] serde_json::Error),

    #[error("cannot read level pack: {0}")]
    Io(#[from] std::io::Error),
}

/// Failed query against the tile catalog or a decoded grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("tile {0:02} not found")]
    NotFound(TileId),

    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
}
