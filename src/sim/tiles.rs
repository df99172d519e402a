//! Tile definitions and the per-level tile catalog

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, LookupError};

/// Tile identifier as written in level data ("00".."99")
pub type TileId = u16;

/// Reserved id for empty cells; needs no catalog entry
pub const EMPTY_TILE: TileId = 0;

/// Opaque render handle, passed through to the render sink untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawableRef(pub u32);

/// Gameplay class of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Obstacle,
    Dangerous,
    Exit,
}

impl TileKind {
    /// Dangerous and Exit tiles can be entered; entering them raises events
    pub fn is_passable(self) -> bool {
        self != TileKind::Obstacle
    }
}

/// One row of the tile table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDefinition {
    pub id: TileId,
    pub name: String,
    pub kind: TileKind,
    #[serde(default)]
    pub drawable: DrawableRef,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl TileDefinition {
    pub fn new(id: TileId, name: impl Into<String>, kind: TileKind, drawable: DrawableRef) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            drawable,
            visible: true,
        }
    }
}

/// Immutable id -> definition map, built once per level entry
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    tiles: HashMap<TileId, TileDefinition>,
}

impl TileCatalog {
    /// Build a catalog, rejecting duplicate ids and definitions for the reserved empty id
    pub fn new(definitions: impl IntoIterator<Item = TileDefinition>) -> Result<Self, DataError> {
        let mut tiles = HashMap::new();
        for def in definitions {
            if def.id == EMPTY_TILE {
                return Err(DataError::ReservedTileId);
            }
            let id = def.id;
            if tiles.insert(id, def).is_some() {
                return Err(DataError::DuplicateTile(id));
            }
        }
        Ok(Self { tiles })
    }

    pub fn lookup(&self, id: TileId) -> Result<&TileDefinition, LookupError> {
        self.tiles.get(&id).ok_or(LookupError::NotFound(id))
    }

    /// True for the empty id and for every catalogued id
    pub fn contains(&self, id: TileId) -> bool {
        id == EMPTY_TILE || self.tiles.contains_key(&id)
    }

    pub fn kind_of(&self, id: TileId) -> Result<TileKind, LookupError> {
        if id == EMPTY_TILE {
            return Ok(TileKind::Empty);
        }
        self.lookup(id).map(|def| def.kind)
    }

    /// Unknown ids are reported as impassable
    pub fn is_passable(&self, id: TileId) -> bool {
        self.kind_of(id).map(TileKind::is_passable).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
