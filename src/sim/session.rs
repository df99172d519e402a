//! Play-session state machine
//!
//! `Loading -> Active -> {HazardDeath | Exit} -> Loading -> ...`, ending in
//! `Finished` once the source has no next level. Every load builds a fresh
//! catalog, grid and player, so nothing carries over a level transition.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::level::LevelDefinition;
use super::tick::{GameEvent, Terrain, TickInput, tick};
use super::tiles::{DrawableRef, TileCatalog};
use super::unit::PlayerUnit;
use crate::data::LevelSource;
use crate::error::DataError;
use crate::settings::Settings;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// A level is pending; the next step (re)tries loading it
    Loading,
    /// Simulator runs each step
    Active,
    /// Player touched a hazard; the next step restarts the level
    HazardDeath,
    /// Player reached an exit; the next step loads the following level
    Exit,
    /// No levels left
    Finished,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Simulator ticks run across all levels
    pub ticks: u64,
    pub deaths: u32,
    pub levels_completed: u32,
}

/// Result of one [`Session::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub phase: SessionPhase,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone)]
struct ActiveLevel {
    catalog: TileCatalog,
    level: LevelDefinition,
    player: PlayerUnit,
}

pub struct Session<S: LevelSource> {
    source: S,
    tile_size: i32,
    unit_size: IVec2,
    player_drawable: DrawableRef,
    pending: (u32, u32),
    current: Option<ActiveLevel>,
    phase: SessionPhase,
    stats: SessionStats,
}

impl<S: LevelSource> Session<S> {
    /// Create a session and load the first level named by `settings`
    pub fn start(source: S, settings: &Settings) -> Result<Self, DataError> {
        let mut session = Self {
            source,
            tile_size: settings.tile_size.max(1),
            unit_size: settings.unit_size(),
            player_drawable: settings.player_drawable,
            pending: (settings.first_stage, settings.first_level),
            current: None,
            phase: SessionPhase::Loading,
            stats: SessionStats::default(),
        };
        session.load()?;
        Ok(session)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Stage and level currently loaded or pending
    pub fn stage_level(&self) -> (u32, u32) {
        self.pending
    }

    pub fn player(&self) -> Option<&PlayerUnit> {
        self.current.as_ref().map(|c| &c.player)
    }

    pub fn level(&self) -> Option<&LevelDefinition> {
        self.current.as_ref().map(|c| &c.level)
    }

    pub fn catalog(&self) -> Option<&TileCatalog> {
        self.current.as_ref().map(|c| &c.catalog)
    }

    /// Advance the session by one step
    pub fn step(&mut self, input: &TickInput) -> Result<TickReport, DataError> {
        let mut events = Vec::new();

        match self.phase {
            SessionPhase::Loading => self.load()?,
            SessionPhase::Active => {
                if let Some(current) = self.current.as_mut() {
                    let terrain = Terrain::new(&current.level.grid, &current.catalog, self.tile_size);
                    events = tick(&mut current.player, &terrain, input);
                    self.stats.ticks += 1;
                }
                self.apply_events(&events);
            }
            SessionPhase::HazardDeath => {
                self.phase = SessionPhase::Loading;
                self.load()?;
            }
            SessionPhase::Exit => {
                let (stage, level) = self.pending;
                match self.source.next_level(stage, level) {
                    Some(next) => {
                        self.pending = next;
                        self.phase = SessionPhase::Loading;
                        self.load()?;
                    }
                    None => {
                        log::info!("All levels complete after {} ticks", self.stats.ticks);
                        self.current = None;
                        self.phase = SessionPhase::Finished;
                    }
                }
            }
            SessionPhase::Finished => {}
        }

        Ok(TickReport {
            phase: self.phase,
            events,
        })
    }

    fn apply_events(&mut self, events: &[GameEvent]) {
        let (stage, level) = self.pending;
        for event in events {
            match event {
                GameEvent::PlayerHazardContact { cell } => {
                    log::info!("Player died on level {}-{} at cell {:?}", stage, level, cell);
                    self.stats.deaths += 1;
                    self.phase = SessionPhase::HazardDeath;
                    return;
                }
                GameEvent::LevelCompleted { cell } => {
                    log::info!("Level {}-{} completed at cell {:?}", stage, level, cell);
                    self.stats.levels_completed += 1;
                    self.phase = SessionPhase::Exit;
                    return;
                }
                GameEvent::Blocked { .. } => {}
            }
        }
    }

    /// Load the pending level. On failure the session stays in `Loading`.
    fn load(&mut self) -> Result<(), DataError> {
        let (stage, level) = self.pending;
        self.current = None;
        self.phase = SessionPhase::Loading;

        let catalog = TileCatalog::new(self.source.tile_definitions())?;
        let raw = self
            .source
            .raw_level(stage, level)
            .ok_or(DataError::LevelNotFound { stage, level })?;
        let level = LevelDefinition::decode(&raw, &catalog)?;
        let player = PlayerUnit::spawn(level.start, self.unit_size, self.player_drawable, self.tile_size);

        log::info!(
            "Level {}-{} loaded ({} tiles in catalog)",
            level.stage,
            level.level,
            catalog.len()
        );
        self.current = Some(ActiveLevel {
            catalog,
            level,
            player,
        });
        self.phase = SessionPhase::Active;
        Ok(())
    }
}
