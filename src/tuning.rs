//! Data-driven game balance
//!
//! Every physics constant lives here so a settings file can override it.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// How `Body::add_force`/`Body::add_velocity` combine with the existing value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceAccumulation {
    /// `force = force + f`
    #[default]
    Accumulate,
    /// `force = f + f`, discarding what was accumulated
    LegacyDoubling,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Gravitational acceleration (m/s²), applied along -Y
    pub gravity: f64,
    pub static_friction: f64,
    pub kinetic_friction: f64,
    /// Restitution between two players (0 = perfectly inelastic, 1 = elastic)
    pub player_restitution: f64,
    /// Restitution between a player and a pillar
    pub pillar_restitution: f64,

    pub num_pillars: usize,
    pub player_mass: f64,
    pub player_radius: f64,
    pub pillar_mass: f64,
    pub pillar_radius: f64,
    pub surface_radius: f64,
    /// Upward force given to a pillar when it is knocked off
    pub pillar_knock_force: f64,
    pub crown_mass: f64,
    /// Height of the crown above the winner
    pub crown_lift: f64,

    /// Tilt bound (degrees) that forces a direction flip
    pub max_rotation: f64,
    /// Maximum tilt change per second (degrees)
    pub change_factor: f64,
    /// Mean seconds between random direction flips
    pub change_after_secs: f64,

    pub keyboard_push_force: f64,
    pub opponent_push_force: f64,
    /// Opponents head back to the center beyond this fraction of the surface radius
    pub opponent_retreat_fraction: f64,

    pub force_accumulation: ForceAccumulation,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            static_friction: 0.1,
            kinetic_friction: 0.03, // 0.15 is rubber on ice
            player_restitution: 0.5,
            pillar_restitution: 1.0,

            num_pillars: 24,
            player_mass: 3.0,
            player_radius: 0.7,
            pillar_mass: 10.0,
            pillar_radius: 0.1,
            surface_radius: 6.6,
            pillar_knock_force: 1e5,
            crown_mass: 1.0,
            crown_lift: 1.3,

            max_rotation: 15.0,
            change_factor: 30.0,
            change_after_secs: 5.0,

            keyboard_push_force: 15.0,
            opponent_push_force: 12.0,
            opponent_retreat_fraction: 0.6,

            force_accumulation: ForceAccumulation::Accumulate,
        }
    }
}

impl Tuning {
    /// Reject values the integrator or the tilt model cannot work with
    pub fn validate(&self) -> SimResult<()> {
        let positive = [
            ("player_mass", self.player_mass),
            ("pillar_mass", self.pillar_mass),
            ("crown_mass", self.crown_mass),
            ("player_radius", self.player_radius),
            ("pillar_radius", self.pillar_radius),
            ("surface_radius", self.surface_radius),
            ("change_after_secs", self.change_after_secs),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(SimError::InvalidArgument(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
