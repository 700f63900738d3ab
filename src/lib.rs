//! Tilt Arena - a balance game on a tilting platform
//!
//! Core modules:
//! - `sim`: Simulation (bodies, surface tilt, forces, collisions, the world tick)
//! - `game`: Match runner (rounds, scoring, final winner)
//! - `render`: Renderer capability and a headless implementation
//! - `audio`: Sound effects for game events
//! - `settings`: Match settings from JSON
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod render;
pub mod scoreboard;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ModelKind, SimError, SimResult};
pub use game::{Match, MatchPhase};
pub use scoreboard::Scoreboard;
pub use settings::Settings;
pub use tuning::{ForceAccumulation, Tuning};

/// Game configuration constants
pub mod consts {
    /// Frame period used by the headless runner (60 Hz)
    pub const FRAME_MILLIS: u64 = 16;
    /// Frames a headless match may run before it is called off (one hour of play)
    pub const MAX_HEADLESS_FRAMES: u64 = 60 * 60 * 1000 / FRAME_MILLIS;
    /// Frames of the final-winner screen rendered before the runner exits
    pub const FINAL_FRAMES: u64 = 120;
}
