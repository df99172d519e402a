//! Units on the tile grid
//!
//! A [`Unit`] is position and bounding geometry only. The player composes a
//! unit with [`Movement`] state; nothing else in the game moves.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::tiles::DrawableRef;

/// Inclusive rectangle of grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub min: IVec2,
    pub max: IVec2,
}

impl CellSpan {
    /// Cells overlapped by a box of `size` pixels with its top-left at `position`
    pub fn covering(position: IVec2, size: IVec2, tile_size: i32) -> Self {
        let far = position + size - IVec2::ONE;
        Self {
            min: IVec2::new(position.x.div_euclid(tile_size), position.y.div_euclid(tile_size)),
            max: IVec2::new(far.x.div_euclid(tile_size), far.y.div_euclid(tile_size)),
        }
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        cell.cmpge(self.min).all() && cell.cmple(self.max).all()
    }

    /// Row-major iteration, top-left first
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| IVec2::new(x, y)))
    }
}

/// Grid-resident entity: pixel position, bounding box and current cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    position: IVec2,
    size: IVec2,
    cell: IVec2,
    drawable: DrawableRef,
}

impl Unit {
    pub fn new(position: IVec2, size: IVec2, drawable: DrawableRef, tile_size: i32) -> Self {
        let size = size.max(IVec2::ONE);
        Self {
            position,
            size,
            cell: center_cell(position, size, tile_size),
            drawable,
        }
    }

    /// Place a unit centred inside `cell`
    pub fn centered_in(cell: IVec2, size: IVec2, drawable: DrawableRef, tile_size: i32) -> Self {
        let position = cell * tile_size + (IVec2::splat(tile_size) - size) / 2;
        Self::new(position, size, drawable, tile_size)
    }

    /// Top-left corner in pixels
    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// Cell holding the centre of the bounding box
    pub fn cell(&self) -> IVec2 {
        self.cell
    }

    pub fn drawable(&self) -> DrawableRef {
        self.drawable
    }

    pub fn occupied_cells(&self, tile_size: i32) -> CellSpan {
        CellSpan::covering(self.position, self.size, tile_size)
    }

    pub(super) fn place(&mut self, position: IVec2, tile_size: i32) {
        self.position = position;
        self.cell = center_cell(position, self.size, tile_size);
    }
}

fn center_cell(position: IVec2, size: IVec2, tile_size: i32) -> IVec2 {
    let center = position + size / 2;
    IVec2::new(center.x.div_euclid(tile_size), center.y.div_euclid(tile_size))
}

/// Per-axis velocity state carried only by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Movement {
    pub speed: IVec2,
    pub acceleration: IVec2,
    /// Position before collision clamping on the last tick
    pub unmodified: IVec2,
}

/// The player-controlled unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUnit {
    unit: Unit,
    movement: Movement,
}

impl PlayerUnit {
    /// Fresh player at rest, centred in the start cell
    pub fn spawn(start: IVec2, size: IVec2, drawable: DrawableRef, tile_size: i32) -> Self {
        let unit = Unit::centered_in(start, size, drawable, tile_size);
        let movement = Movement {
            unmodified: unit.position(),
            ..Default::default()
        };
        Self { unit, movement }
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn movement(&self) -> &Movement {
        &self.movement
    }

    pub fn position(&self) -> IVec2 {
        self.unit.position()
    }

    pub fn speed(&self) -> IVec2 {
        self.movement.speed
    }

    pub fn acceleration(&self) -> IVec2 {
        self.movement.acceleration
    }

    pub fn unmodified(&self) -> IVec2 {
        self.movement.unmodified
    }

    pub fn cell(&self) -> IVec2 {
        self.unit.cell()
    }

    pub(super) fn parts_mut(&mut self) -> (&mut Unit, &mut Movement) {
        (&mut self.unit, &mut self.movement)
    }

    #[cfg(test)]
    pub(crate) fn with_movement(mut self, position: IVec2, speed: IVec2, acceleration: IVec2, tile_size: i32) -> Self {
        self.unit.place(position, tile_size);
        self.movement = Movement {
            speed,
            acceleration,
            unmodified: position,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_of_aligned_box() {
        let span = CellSpan::covering(IVec2::new(32, 64), IVec2::splat(32), 32);
        assert_eq!(span.min, IVec2::new(1, 2));
        assert_eq!(span.max, IVec2::new(1, 2));
        assert_eq!(span.iter().count(), 1);
    }

    #[test]
    fn test_span_straddling_cells() {
        let span = CellSpan::covering(IVec2::new(20, 5), IVec2::splat(24), 32);
        assert_eq!(span.min, IVec2::new(0, 0));
        assert_eq!(span.max, IVec2::new(1, 0));
        let cells: Vec<_> = span.iter().collect();
        assert_eq!(cells, vec![IVec2::new(0, 0), IVec2::new(1, 0)]);
    }

    #[test]
    fn test_span_negative_pixels_floor() {
        let span = CellSpan::covering(IVec2::new(-1, 0), IVec2::splat(8), 32);
        assert_eq!(span.min, IVec2::new(-1, 0));
        assert!(span.contains(IVec2::new(0, 0)));
    }

    #[test]
    fn test_spawn_centres_in_start_cell() {
        let player = PlayerUnit::spawn(IVec2::new(7, 3), IVec2::splat(24), DrawableRef(2), 32);
        assert_eq!(player.position(), IVec2::new(7 * 32 + 4, 3 * 32 + 4));
        assert_eq!(player.cell(), IVec2::new(7, 3));
        assert_eq!(player.speed(), IVec2::ZERO);
        assert_eq!(player.acceleration(), IVec2::ZERO);
        assert_eq!(player.unmodified(), player.position());
        let span = player.unit().occupied_cells(32);
        assert_eq!((span.min, span.max), (IVec2::new(7, 3), IVec2::new(7, 3)));
    }
}
