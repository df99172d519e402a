//! Tile Runner - a tile-grid maze game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tiles, level decoding, movement, collisions, session)
//! - `data`: Level data source (built-in pack, JSON level packs)
//! - `settings`: Runtime configuration
//! - `demo`: Seeded autopilot input

pub mod data;
pub mod demo;
pub mod error;
pub mod settings;
pub mod sim;

pub use data::{LevelPack, LevelSource};
pub use demo::DemoPilot;
pub use error::{DataError, LookupError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Maximum per-axis speed magnitude (pixels per tick)
    pub const SPEED: i32 = 8;
    /// Per-tick acceleration step and friction decay
    pub const INERTIA: i32 = 1;

    /// Default grid cell edge length in pixels
    pub const DEFAULT_TILE_SIZE: i32 = 32;
    /// Default player bounding box edge in pixels
    pub const DEFAULT_UNIT_SIZE: i32 = 24;
}
