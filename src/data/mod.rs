//! Level data source
//!
//! Storage is outside the simulation: a source hands out tile definitions and
//! raw level rows, and the sim decodes and validates them on level entry.

mod builtin;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::sim::{RawLevel, TileDefinition};

/// Anything that can serve the tile table and level rows
pub trait LevelSource {
    fn tile_definitions(&self) -> Vec<TileDefinition>;

    fn raw_level(&self, stage: u32, level: u32) -> Option<RawLevel>;

    /// Level that follows `(stage, level)`: the next level in the stage, else
    /// the first level of the next stage
    fn next_level(&self, stage: u32, level: u32) -> Option<(u32, u32)> {
        [(stage, level + 1), (stage + 1, 1)]
            .into_iter()
            .find(|&(s, l)| self.raw_level(s, l).is_some())
    }
}

/// Tile table plus level rows, serialized as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPack {
    pub tiles: Vec<TileDefinition>,
    pub levels: Vec<RawLevel>,
}

impl LevelPack {
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a pack from a JSON file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let json = fs::read_to_string(path)?;
        let pack = Self::from_json(&json)?;
        log::info!(
            "Loaded level pack {} ({} tiles, {} levels)",
            path.display(),
            pack.tiles.len(),
            pack.levels.len()
        );
        Ok(pack)
    }
}

impl LevelSource for LevelPack {
    fn tile_definitions(&self) -> Vec<TileDefinition> {
        self.tiles.clone()
    }

    fn raw_level(&self, stage: u32, level: u32) -> Option<RawLevel> {
        self.levels
            .iter()
            .find(|raw| raw.stage == stage && raw.level == level)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{LevelDefinition, TileCatalog, TileKind};

    #[test]
    fn test_builtin_levels_decode() {
        let pack = LevelPack::builtin();
        let catalog = TileCatalog::new(pack.tile_definitions()).unwrap();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.kind_of(8), Ok(TileKind::Dangerous));
        assert_eq!(catalog.kind_of(9), Ok(TileKind::Exit));

        for raw in &pack.levels {
            LevelDefinition::decode(raw, &catalog).unwrap();
        }
        let first = LevelDefinition::decode(&pack.raw_level(1, 1).unwrap(), &catalog).unwrap();
        assert_eq!((first.grid.width(), first.grid.height()), (15, 17));
    }

    #[test]
    fn test_next_level_order() {
        let pack = LevelPack::builtin();
        assert_eq!(pack.next_level(1, 1), Some((1, 2)));
        assert_eq!(pack.next_level(1, 2), None);

        let mut extended = pack.clone();
        let mut stage_two = extended.levels[0].clone();
        stage_two.stage = 2;
        extended.levels.push(stage_two);
        assert_eq!(extended.next_level(1, 2), Some((2, 1)));
    }

    #[test]
    fn test_pack_json_round_trip() {
        let pack = LevelPack::builtin();
        let json = pack.to_json().unwrap();
        assert!(json.contains("\"Dangerous\""));
        assert_eq!(LevelPack::from_json(&json).unwrap(), pack);
    }

    #[test]
    fn test_pack_json_defaults_and_errors() {
        let json = r#"{
            "tiles": [{ "id": 4, "name": "Rock", "kind": "Obstacle" }],
            "levels": [{ "stage": 1, "level": 1, "start_x": 0, "start_y": 0, "tile_data": "00,04" }]
        }"#;
        let pack = LevelPack::from_json(json).unwrap();
        assert!(pack.tiles[0].visible);
        assert_eq!(pack.tiles[0].drawable.0, 0);

        assert!(matches!(LevelPack::from_json("{ not json"), Err(DataError::Pack(_))));
        assert!(matches!(
            LevelPack::load(Path::new("/nonexistent/pack.json")),
            Err(DataError::Io(_))
        ));
    }
}
