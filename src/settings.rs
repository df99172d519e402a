//! Runtime settings
//!
//! Read from an optional JSON file; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TILE_SIZE, DEFAULT_UNIT_SIZE};
use crate::sim::DrawableRef;

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Edge length of a grid cell in pixels
    pub tile_size: i32,
    /// Player bounding box width in pixels
    pub unit_width: i32,
    /// Player bounding box height in pixels
    pub unit_height: i32,
    pub player_drawable: DrawableRef,

    // === Levels ===
    /// JSON level pack; the built-in pack is used when unset
    pub level_pack: Option<PathBuf>,
    pub first_stage: u32,
    pub first_level: u32,

    // === Demo runner ===
    /// Seed for the demo autopilot
    pub demo_seed: u64,
    /// Step limit for a headless run
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            unit_width: DEFAULT_UNIT_SIZE,
            unit_height: DEFAULT_UNIT_SIZE,
            player_drawable: DrawableRef(0),

            level_pack: None,
            first_stage: 1,
            first_level: 1,

            demo_seed: 12345,
            max_ticks: 10_000,
        }
    }
}

impl Settings {
    /// Player box size, at least one pixel and never larger than a tile
    pub fn unit_size(&self) -> IVec2 {
        IVec2::new(self.unit_width, self.unit_height).clamp(IVec2::ONE, IVec2::splat(self.tile_size.max(1)))
    }

    /// Clamp geometry to at least one pixel, with the player fitting inside one tile
    pub fn sanitized(mut self) -> Self {
        self.tile_size = self.tile_size.max(1);
        let size = self.unit_size();
        self.unit_width = size.x;
        self.unit_height = size.y;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings.sanitized();
                }
                Err(err) => log::warn!("Ignoring malformed settings {}: {}", path.display(), err),
            },
            Err(err) => log::warn!("Cannot read settings {}: {}", path.display(), err),
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "tile_size": 16, "first_level": 2 }"#).unwrap();
        assert_eq!(settings.tile_size, 16);
        assert_eq!(settings.first_level, 2);
        assert_eq!(settings.unit_width, DEFAULT_UNIT_SIZE);
        assert!(settings.level_pack.is_none());
    }

    #[test]
    fn test_sanitized_clamps_geometry() {
        let settings = Settings {
            tile_size: 0,
            unit_width: -4,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.tile_size, 1);
        assert_eq!(settings.unit_width, 1);
        assert_eq!(settings.unit_height, 1);
    }

    #[test]
    fn test_unit_never_larger_than_tile() {
        let settings = Settings {
            tile_size: 16,
            ..Settings::default()
        };
        assert_eq!(settings.unit_size(), IVec2::splat(16));

        let settings = settings.sanitized();
        assert_eq!((settings.unit_width, settings.unit_height), (16, 16));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let settings = Settings::load(Path::new("/nonexistent/tile-runner.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            level_pack: Some(PathBuf::from("levels/pack.json")),
            demo_seed: 7,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
