//! Fixed-step movement and collision
//!
//! One call to [`tick`] samples one input, runs acceleration and speed on
//! each axis, sweeps the tentative move against the grid, then reports tile
//! events for the final position. Axes are resolved independently so a
//! blocked axis never stops the other one (wall sliding).

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::level::LevelGrid;
use super::tiles::{TileCatalog, TileKind};
use super::unit::{CellSpan, Movement, PlayerUnit};
use crate::consts::{INERTIA, SPEED};

/// Input on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intent {
    Negative,
    #[default]
    None,
    Positive,
}

impl Intent {
    pub fn from_signum(value: i32) -> Self {
        match value.signum() {
            -1 => Intent::Negative,
            1 => Intent::Positive,
            _ => Intent::None,
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Intent::Negative => -1,
            Intent::None => 0,
            Intent::Positive => 1,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub x: Intent,
    pub y: Intent,
}

impl TickInput {
    /// Build from raw axis values; only the sign is used
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: Intent::from_signum(x),
            y: Intent::from_signum(y),
        }
    }

    pub fn intent(&self, axis: Axis) -> Intent {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    #[inline]
    pub fn get(self, v: IVec2) -> i32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    pub fn set(self, v: &mut IVec2, value: i32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }

    /// Cell whose coordinate on this axis is `line` and on the other is `cross`
    fn cell(self, line: i32, cross: i32) -> IVec2 {
        match self {
            Axis::X => IVec2::new(line, cross),
            Axis::Y => IVec2::new(cross, line),
        }
    }
}

/// Outcomes reported by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Movement on `axis` was cut short by `truncated` pixels
    Blocked { axis: Axis, truncated: i32 },
    /// Player overlaps a dangerous tile
    PlayerHazardContact { cell: IVec2 },
    /// Player overlaps an exit tile
    LevelCompleted { cell: IVec2 },
}

/// Read-only view of a level for collision probing
#[derive(Debug, Clone, Copy)]
pub struct Terrain<'a> {
    grid: &'a LevelGrid,
    catalog: &'a TileCatalog,
    tile_size: i32,
}

impl<'a> Terrain<'a> {
    pub fn new(grid: &'a LevelGrid, catalog: &'a TileCatalog, tile_size: i32) -> Self {
        Self {
            grid,
            catalog,
            tile_size: tile_size.max(1),
        }
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Kind of tile at `cell`; anything off the grid is an obstacle
    pub fn kind_at(&self, cell: IVec2) -> TileKind {
        self.grid
            .tile_at(cell.x, cell.y)
            .ok()
            .and_then(|id| self.catalog.kind_of(id).ok())
            .unwrap_or(TileKind::Obstacle)
    }

    /// Whether a box at `position` would overlap any obstacle
    pub fn overlaps_obstacle(&self, position: IVec2, size: IVec2) -> bool {
        CellSpan::covering(position, size, self.tile_size)
            .iter()
            .any(|cell| self.kind_at(cell) == TileKind::Obstacle)
    }

    /// Sweep a box `delta` pixels along `axis`.
    ///
    /// Only the cell lines newly entered by the leading edge are probed, nearest
    /// first. Returns the clamped coordinate (flush against the first blocking
    /// line) or `None` if the full move is clear.
    pub fn sweep(&self, origin: IVec2, size: IVec2, axis: Axis, delta: i32) -> Option<i32> {
        if delta == 0 {
            return None;
        }
        let t = self.tile_size;
        let start = axis.get(origin);
        let extent = axis.get(size);
        let target = start + delta;

        let cross = axis.other();
        let cross_min = cross.get(origin).div_euclid(t);
        let cross_max = (cross.get(origin) + cross.get(size) - 1).div_euclid(t);
        let line_blocked = |line: i32| {
            (cross_min..=cross_max).any(|c| self.kind_at(axis.cell(line, c)) == TileKind::Obstacle)
        };

        if delta > 0 {
            let first = (start + extent - 1).div_euclid(t) + 1;
            let last = (target + extent - 1).div_euclid(t);
            (first..=last)
                .find(|&line| line_blocked(line))
                .map(|line| line * t - extent)
        } else {
            let first = start.div_euclid(t) - 1;
            let last = target.div_euclid(t);
            (last..=first)
                .rev()
                .find(|&line| line_blocked(line))
                .map(|line| (line + 1) * t)
        }
    }
}

/// Acceleration and speed phases for one axis. Returns `(speed, acceleration)`.
pub fn accelerate(speed: i32, acceleration: i32, intent: Intent) -> (i32, i32) {
    let mut speed = speed.clamp(-SPEED, SPEED);
    let mut acceleration = acceleration;

    match intent.sign() {
        0 => {
            acceleration = step_toward_zero(acceleration);
            if acceleration == 0 {
                speed = step_toward_zero(speed);
            }
        }
        dir => {
            acceleration = (acceleration + INERTIA * dir).clamp(-SPEED - speed, SPEED - speed);
        }
    }

    speed = (speed + acceleration).clamp(-SPEED, SPEED);
    (speed, acceleration)
}

fn step_toward_zero(value: i32) -> i32 {
    if value > 0 {
        (value - INERTIA).max(0)
    } else {
        (value + INERTIA).min(0)
    }
}

fn stop_axis(movement: &mut Movement, axis: Axis) {
    axis.set(&mut movement.speed, 0);
    axis.set(&mut movement.acceleration, 0);
}

/// Advance the player by one fixed step
pub fn tick(player: &mut PlayerUnit, terrain: &Terrain, input: &TickInput) -> Vec<GameEvent> {
    let tile_size = terrain.tile_size();
    let (unit, movement) = player.parts_mut();
    let origin = unit.position();
    let size = unit.size();

    for axis in Axis::ALL {
        let (speed, acceleration) = accelerate(
            axis.get(movement.speed),
            axis.get(movement.acceleration),
            input.intent(axis),
        );
        axis.set(&mut movement.speed, speed);
        axis.set(&mut movement.acceleration, acceleration);
    }
    movement.unmodified = origin + movement.speed;

    // Each axis sweeps from the tick's starting position.
    let mut resolved = movement.unmodified;
    let mut blocked = [false; 2];
    for (i, axis) in Axis::ALL.into_iter().enumerate() {
        if let Some(stop) = terrain.sweep(origin, size, axis, axis.get(movement.speed)) {
            axis.set(&mut resolved, stop);
            stop_axis(movement, axis);
            blocked[i] = true;
        }
    }

    // Both axes clear alone but the diagonal lands in a corner: X keeps its
    // move and Y is swept again from there.
    if terrain.overlaps_obstacle(resolved, size) {
        let slid = IVec2::new(resolved.x, origin.y);
        if let Some(stop) = terrain.sweep(slid, size, Axis::Y, resolved.y - origin.y) {
            resolved.y = stop;
            stop_axis(movement, Axis::Y);
            blocked[1] = true;
        }
    }

    unit.place(resolved, tile_size);

    let mut events = Vec::new();
    for (i, axis) in Axis::ALL.into_iter().enumerate() {
        if blocked[i] {
            let truncated = (axis.get(movement.unmodified) - axis.get(resolved)).abs();
            log::debug!("Blocked on {:?} by {} px at {:?}", axis, truncated, resolved);
            events.push(GameEvent::Blocked { axis, truncated });
        }
    }

    let occupied = unit.occupied_cells(tile_size);
    let mut hazard = None;
    let mut exit = None;
    for cell in occupied.iter() {
        match terrain.kind_at(cell) {
            TileKind::Dangerous if hazard.is_none() => hazard = Some(cell),
            TileKind::Exit if exit.is_none() => exit = Some(cell),
            _ => {}
        }
    }
    // Death precludes completion.
    if let Some(cell) = hazard {
        events.push(GameEvent::PlayerHazardContact { cell });
    } else if let Some(cell) = exit {
        events.push(GameEvent::LevelCompleted { cell });
    }

    events
}

/// Run up to `ticks` steps with the same input, stopping after a hazard or exit
pub fn advance(player: &mut PlayerUnit, terrain: &Terrain, input: &TickInput, ticks: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        let step = tick(player, terrain, input);
        let terminal = step.iter().any(|e| {
            matches!(
                e,
                GameEvent::PlayerHazardContact { .. } | GameEvent::LevelCompleted { .. }
            )
        });
        events.extend(step);
        if terminal {
            break;
        }
    }
    events
}
