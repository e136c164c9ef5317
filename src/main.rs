//! Trick or Treat headless driver
//!
//! Runs a session with the autopilot at the wheel: a fixed-step accumulator
//! loop feeds the simulation, every frame is rendered into a command recorder,
//! and game events are logged. Usage:
//!
//! ```text
//! RUST_LOG=info trick-or-treat [settings.json] [levels.json]
//! ```

use std::path::Path;

use trick_or_treat::Settings;
use trick_or_treat::consts::{MAX_SUBSTEPS, SIM_DT};
use trick_or_treat::renderer::CommandRecorder;
use trick_or_treat::sim::level::LevelTable;
use trick_or_treat::sim::{GameEvent, GameSession, autopilot};

/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 30.0;
/// Frames between autopilot moves
const FRAMES_PER_MOVE: u64 = 6;
/// Give up after this much simulated time (seconds)
const TIME_LIMIT: f32 = 15.0 * 60.0;

struct Driver {
    session: GameSession,
    recorder: CommandRecorder,
    accumulator: f32,
    max_frame_dt: f32,
    frame: u64,
}

impl Driver {
    fn new(session: GameSession) -> Self {
        let max_frame_dt = session.settings().max_frame_dt;
        Self {
            session,
            recorder: CommandRecorder::new(),
            accumulator: 0.0,
            max_frame_dt,
            frame: 0,
        }
    }

    /// One display frame
    fn frame(&mut self, dt: f32) {
        self.accumulator += dt.min(self.max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.session.update(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.frame % FRAMES_PER_MOVE == 0 {
            if let Some(direction) = autopilot::next_move(&self.session) {
                let outcome = self.session.handle_input(direction);
                log::trace!("{:?} -> {:?}", direction, outcome);
            }
        }

        self.recorder.clear();
        self.session.render(&mut self.recorder);
        if !self.recorder.is_balanced() {
            log::warn!("frame {}: unbalanced save/restore", self.frame);
        }

        for event in self.session.drain_events() {
            log_event(&event);
        }
        self.frame += 1;
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LevelStarted { level, restart: false } => log::info!("Level {}", level),
        GameEvent::LevelStarted { level, restart: true } => log::info!("Level {} (again)", level),
        GameEvent::PlayerDied { cause, .. } => log::info!("Caught: {:?}", cause),
        GameEvent::CostumeIntroduced { title, caption, .. } => log::info!("{}! {}", title, caption),
        GameEvent::SessionComplete => log::info!("Happy Halloween! All the candy is yours."),
        other => log::debug!("{:?}", other),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Trick or Treat (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();
    let levels = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| LevelTable::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(levels) => levels,
            Err(e) => {
                log::error!("Could not load levels from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => LevelTable::builtin(),
    };

    let session = match GameSession::new(levels, settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Could not start session: {}", e);
            std::process::exit(1);
        }
    };

    let mut driver = Driver::new(session);
    let mut elapsed = 0.0;
    while !driver.session.is_complete() && elapsed < TIME_LIMIT {
        driver.frame(FRAME_DT);
        elapsed += FRAME_DT;
    }

    if driver.session.is_complete() {
        log::info!("Finished in {:.1}s of game time ({} frames)", elapsed, driver.frame);
    } else {
        log::info!(
            "Stopped on level {} after {:.0}s of game time",
            driver.session.current_level(),
            elapsed
        );
    }
}
