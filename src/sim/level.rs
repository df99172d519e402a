//! Level grid decoding
//!
//! Level rows arrive as text: cells are comma-separated, zero-padded tile ids
//! and rows are joined by [`LINE_BREAK`] (plain newlines are accepted too).
//! Decoding validates everything up front so the simulator never has to.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::tiles::{TileCatalog, TileId};
use crate::error::{DataError, LookupError};

/// Row separator used by stored level data
pub const LINE_BREAK: &str = "//";

/// A level row as stored by the data source, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLevel {
    pub stage: u32,
    pub level: u32,
    pub start_x: i32,
    pub start_y: i32,
    pub tile_data: String,
}

/// Rectangular matrix of tile ids, row-major, row index growing downward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGrid {
    width: usize,
    height: usize,
    cells: Vec<TileId>,
}

impl LevelGrid {
    /// Parse tile text, checking shape and that every id is known to `catalog`
    pub fn parse(text: &str, catalog: &TileCatalog) -> Result<Self, DataError> {
        let mut width = 0;
        let mut height = 0;
        let mut cells = Vec::new();

        for (y, row) in split_rows(text).enumerate() {
            let start_len = cells.len();
            for (x, value) in row.split(',').map(str::trim).enumerate() {
                let id = parse_cell(value).ok_or_else(|| DataError::MalformedCell {
                    x,
                    y,
                    value: value.to_string(),
                })?;
                if !catalog.contains(id) {
                    return Err(DataError::InvalidTileReference { x, y, id });
                }
                cells.push(id);
            }

            let found = cells.len() - start_len;
            if y == 0 {
                width = found;
            } else if found != width {
                return Err(DataError::NonRectangular {
                    row: y,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }

        if width == 0 || height == 0 {
            return Err(DataError::EmptyGrid);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Tile id at column `x`, row `y`
    pub fn tile_at(&self, x: i32, y: i32) -> Result<TileId, LookupError> {
        if !self.contains(IVec2::new(x, y)) {
            return Err(LookupError::OutOfBounds { x, y });
        }
        Ok(self.cells[y as usize * self.width + x as usize])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileId]> {
        self.cells.chunks(self.width)
    }

    /// Canonical text form: two-digit ids, rows joined by [`LINE_BREAK`]
    pub fn encode(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|id| format!("{id:02}"))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join(LINE_BREAK)
    }
}

/// A decoded, validated level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    pub stage: u32,
    pub level: u32,
    /// Player start cell, guaranteed in bounds and passable
    pub start: IVec2,
    pub grid: LevelGrid,
}

impl LevelDefinition {
    pub fn decode(raw: &RawLevel, catalog: &TileCatalog) -> Result<Self, DataError> {
        let grid = LevelGrid::parse(&raw.tile_data, catalog)?;

        let (x, y) = (raw.start_x, raw.start_y);
        let start_tile = grid.tile_at(x, y).map_err(|_| DataError::StartOutOfBounds {
            x,
            y,
            width: grid.width(),
            height: grid.height(),
        })?;
        if !catalog.is_passable(start_tile) {
            return Err(DataError::StartBlocked { x, y });
        }

        log::info!(
            "Decoded level {}-{} ({}x{}, start {},{})",
            raw.stage,
            raw.level,
            grid.width(),
            grid.height(),
            x,
            y
        );

        Ok(Self {
            stage: raw.stage,
            level: raw.level,
            start: IVec2::new(x, y),
            grid,
        })
    }
}

fn split_rows(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_BREAK)
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|row| !row.is_empty())
}

fn parse_cell(value: &str) -> Option<TileId> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tiles::{DrawableRef, TileDefinition, TileKind};

    fn catalog() -> TileCatalog {
        TileCatalog::new([
            TileDefinition::new(1, "Wall", TileKind::Obstacle, DrawableRef(1)),
            TileDefinition::new(9, "Exit", TileKind::Exit, DrawableRef(9)),
        ])
        .unwrap()
    }

    fn raw(tile_data: &str, start_x: i32, start_y: i32) -> RawLevel {
        RawLevel {
            stage: 1,
            level: 1,
            start_x,
            start_y,
            tile_data: tile_data.to_string(),
        }
    }

    #[test]
    fn test_decode_three_by_three() {
        let grid = LevelGrid::parse("00,00,00\n00,01,00\n00,00,00", &catalog()).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 3));
        for y in 0..3 {
            for x in 0..3 {
                let expected = if (x, y) == (1, 1) { 1 } else { 0 };
                assert_eq!(grid.tile_at(x, y), Ok(expected));
            }
        }
    }

    #[test]
    fn test_line_break_token_and_trailing_separator() {
        let grid = LevelGrid::parse("01,01//01,09//", &catalog()).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.tile_at(1, 1), Ok(9));
        assert_eq!(grid.encode(), "01,01//01,09");
    }

    #[test]
    fn test_encode_then_parse_restores_grid() {
        let catalog = catalog();
        let grid = LevelGrid::parse("01,01,01,01\n01,00,09,01\n01,01,01,01", &catalog).unwrap();
        let encoded = grid.encode();
        assert_eq!(encoded, "01,01,01,01//01,00,09,01//01,01,01,01");
        assert_eq!(LevelGrid::parse(&encoded, &catalog).unwrap(), grid);
    }

    #[test]
    fn test_row_index_grows_downward() {
        let grid = LevelGrid::parse("09,00//00,01", &catalog()).unwrap();
        assert_eq!(grid.tile_at(0, 0), Ok(9));
        assert_eq!(grid.tile_at(1, 1), Ok(1));
        assert_eq!(grid.tile_at(1, 0), Ok(0));
    }

    #[test]
    fn test_unknown_tile_is_rejected() {
        let err = LevelGrid::parse("00,05,00", &catalog()).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidTileReference { x: 1, y: 0, id: 5 }
        ));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = LevelGrid::parse("00,00,00//00,00", &catalog()).unwrap_err();
        assert!(matches!(
            err,
            DataError::NonRectangular {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_malformed_and_empty_input() {
        assert!(matches!(
            LevelGrid::parse("00,x1", &catalog()),
            Err(DataError::MalformedCell { x: 1, .. })
        ));
        assert!(matches!(
            LevelGrid::parse("00,,00", &catalog()),
            Err(DataError::MalformedCell { x: 1, .. })
        ));
        assert!(matches!(
            LevelGrid::parse(" // ", &catalog()),
            Err(DataError::EmptyGrid)
        ));
    }

    #[test]
    fn test_tile_at_out_of_bounds() {
        let grid = LevelGrid::parse("00,00//00,00", &catalog()).unwrap();
        assert_eq!(grid.tile_at(-1, 0), Err(LookupError::OutOfBounds { x: -1, y: 0 }));
        assert_eq!(grid.tile_at(0, 2), Err(LookupError::OutOfBounds { x: 0, y: 2 }));
    }

    #[test]
    fn test_start_cell_validation() {
        let catalog = catalog();
        let level = LevelDefinition::decode(&raw("01,01//00,09", 0, 1), &catalog).unwrap();
        assert_eq!(level.start, IVec2::new(0, 1));

        assert!(matches!(
            LevelDefinition::decode(&raw("01,01//00,09", 2, 1), &catalog),
            Err(DataError::StartOutOfBounds { x: 2, y: 1, .. })
        ));
        assert!(matches!(
            LevelDefinition::decode(&raw("01,01//00,09", 0, 0), &catalog),
            Err(DataError::StartBlocked { x: 0, y: 0 })
        ));
    }
}
