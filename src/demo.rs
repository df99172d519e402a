//! Demo autopilot
//!
//! Stands in for a human at the keyboard: picks a random direction, holds it
//! for a while, then picks another. Seeded, so a run replays exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::TickInput;

const MIN_HOLD_TICKS: u32 = 4;
const MAX_HOLD_TICKS: u32 = 24;

pub struct DemoPilot {
    rng: Pcg32,
    current: TickInput,
    hold: u32,
}

impl DemoPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            current: TickInput::default(),
            hold: 0,
        }
    }

    /// Input for the next tick
    pub fn next_input(&mut self) -> TickInput {
        if self.hold == 0 {
            self.current = TickInput::new(self.rng.random_range(-1..=1), self.rng.random_range(-1..=1));
            self.hold = self.rng.random_range(MIN_HOLD_TICKS..=MAX_HOLD_TICKS);
        }
        self.hold -= 1;
        self.current
    }
}
