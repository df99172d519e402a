//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one input sample per tick
//! - Integer pixel math only
//! - Grid and catalog are read-only once a level is entered
//! - No rendering, input or storage dependencies

pub mod level;
pub mod session;
pub mod tick;
pub mod tiles;
pub mod unit;

pub use level::{LINE_BREAK, LevelDefinition, LevelGrid, RawLevel};
pub use session::{Session, SessionPhase, SessionStats, TickReport};
pub use tick::{Axis, GameEvent, Intent, Terrain, TickInput, accelerate, advance, tick};
pub use tiles::{DrawableRef, EMPTY_TILE, TileCatalog, TileDefinition, TileId, TileKind};
pub use unit::{CellSpan, Movement, PlayerUnit, Unit};
