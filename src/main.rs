//! Headless runner: plays the levels with the demo autopilot and logs what happens.
//!
//! Usage: `tile-runner [settings.json]`, verbosity through `RUST_LOG`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use tile_runner::sim::{Session, SessionPhase};
    use tile_runner::{DemoPilot, LevelPack, Settings};

    env_logger::init();
    log::info!("Tile Runner (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let pack = match &settings.level_pack {
        Some(path) => LevelPack::load(path).unwrap_or_else(|err| {
            log::warn!("Falling back to built-in levels: {}", err);
            LevelPack::builtin()
        }),
        None => LevelPack::builtin(),
    };

    let mut session = match Session::start(pack, &settings) {
        Ok(session) => session,
        Err(err) => {
            log::error!("Cannot start session: {}", err);
            std::process::exit(1);
        }
    };

    let mut pilot = DemoPilot::new(settings.demo_seed);
    for _ in 0..settings.max_ticks {
        match session.step(&pilot.next_input()) {
            Ok(report) if report.phase == SessionPhase::Finished => break,
            Ok(_) => {}
            Err(err) => {
                log::error!("Level load failed: {}", err);
                std::process::exit(1);
            }
        }
    }

    let stats = session.stats();
    let (stage, level) = session.stage_level();
    log::info!(
        "Run over at level {}-{}: {} ticks, {} deaths, {} levels completed",
        stage,
        level,
        stats.ticks,
        stats.deaths,
        stats.levels_completed
    );
    if let Some(player) = session.player() {
        println!(
            "player at {:?} (cell {:?}), speed {:?}",
            player.position(),
            player.cell(),
            player.speed()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the deliverable on wasm
}
