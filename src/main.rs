//! Tilt Arena entry point
//!
//! Runs a headless match on a manual clock and prints the final scoreboard.
//!
//! Usage: `tilt-arena [settings.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use tilt_arena::audio::{AudioManager, LogSound};
use tilt_arena::consts::{FINAL_FRAMES, FRAME_MILLIS, MAX_HEADLESS_FRAMES};
use tilt_arena::render::HeadlessRenderer;
use tilt_arena::sim::{ManualClock, SimContext, WorldParts};
use tilt_arena::{Match, Settings, SimResult};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Tilt Arena (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> SimResult<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_path(path)?,
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    log::info!("Seed {}", seed);

    let clock = ManualClock::new();
    let parts = WorldParts {
        ctx: SimContext::seeded(seed).with_volume(settings.volume),
        renderer: Box::new(HeadlessRenderer::new()),
        audio: AudioManager::new(Box::new(LogSound)),
        clock: Box::new(clock.clone()),
    };
    let mut game = Match::new(parts, settings)?;

    let mut frames = 0;
    while !game.is_finished() && frames < MAX_HEADLESS_FRAMES {
        clock.advance_millis(FRAME_MILLIS);
        game.update()?;
        frames += 1;
    }

    if game.is_finished() {
        for _ in 0..FINAL_FRAMES {
            clock.advance_millis(FRAME_MILLIS);
            game.update()?;
        }
    } else {
        log::warn!("Match called off after {} frames", frames);
    }

    let json = serde_json::to_string_pretty(game.scoreboard())?;
    log::info!("Final scoreboard after {} rounds", game.round());
    println!("{}", json);
    Ok(())
}
