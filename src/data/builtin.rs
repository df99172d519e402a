//! Levels shipped with the game

use super::LevelPack;
use crate::sim::{DrawableRef, LINE_BREAK, RawLevel, TileDefinition, TileKind};

const STAGE_1_LEVEL_1: [&str; 17] = [
    "01,01,01,01,01,01,01,01,01,01,01,01,01,01,01",
    "01,03,03,03,03,03,03,03,03,03,03,03,03,03,01",
    "01,03,00,00,00,00,00,00,00,00,00,00,00,03,01",
    "01,03,00,00,00,00,00,00,00,00,00,07,07,03,01",
    "01,03,07,00,00,00,00,00,00,00,07,07,07,03,01",
    "01,03,05,05,06,05,00,00,00,05,06,05,05,03,01",
    "01,03,03,00,08,00,00,00,00,00,08,00,03,03,01",
    "01,03,00,00,00,00,00,00,00,00,00,00,00,03,01",
    "01,03,00,00,00,00,00,00,00,00,00,00,00,03,01",
    "01,03,00,00,00,00,04,04,04,00,00,00,00,03,01",
    "01,03,00,00,04,04,03,03,03,04,04,00,00,03,01",
    "01,03,00,00,03,00,00,00,00,00,03,00,00,03,01",
    "01,03,00,00,00,00,00,00,00,00,00,00,00,03,01",
    "01,03,00,00,00,00,00,09,00,00,00,00,07,03,01",
    "01,03,03,00,00,00,02,02,02,00,00,00,03,03,01",
    "01,03,03,04,04,04,02,02,02,04,04,04,03,03,01",
    "01,01,01,01,01,01,01,01,01,01,01,01,01,01,01",
];

const STAGE_1_LEVEL_2: [&str; 7] = [
    "01,01,01,01,01,01,01,01,01,01,01",
    "01,00,00,00,08,00,00,00,00,00,01",
    "01,00,03,00,03,00,03,03,03,00,01",
    "01,00,03,00,00,00,00,00,03,00,01",
    "01,00,03,03,03,00,03,00,03,08,01",
    "01,00,00,00,00,00,03,00,00,09,01",
    "01,01,01,01,01,01,01,01,01,01,01",
];

/// Rows joined the way stored level data is, trailing separator included
fn tile_data(rows: &[&str]) -> String {
    rows.iter().map(|row| format!("{row}{LINE_BREAK}")).collect()
}

impl LevelPack {
    /// The stock tile table and levels
    pub fn builtin() -> Self {
        let mut tiles: Vec<TileDefinition> = (1..=7)
            .map(|id| {
                TileDefinition::new(
                    id,
                    format!("Tile {id:02}"),
                    TileKind::Obstacle,
                    DrawableRef(u32::from(id)),
                )
            })
            .collect();
        tiles.push(TileDefinition::new(
            8,
            "Dangerous Tile 01",
            TileKind::Dangerous,
            DrawableRef(8),
        ));
        tiles.push(TileDefinition::new(9, "Exit Tile", TileKind::Exit, DrawableRef(9)));

        let levels = vec![
            RawLevel {
                stage: 1,
                level: 1,
                start_x: 7,
                start_y: 3,
                tile_data: tile_data(&STAGE_1_LEVEL_1),
            },
            RawLevel {
                stage: 1,
                level: 2,
                start_x: 1,
                start_y: 1,
                tile_data: tile_data(&STAGE_1_LEVEL_2),
            },
        ];

        Self { tiles, levels }
    }
}
