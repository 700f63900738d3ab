//! Player controllers
//!
//! A controller turns an intent into force on its player once per tick. Which kind a
//! player gets is decided when the player is created.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, GameObject};
use super::math::Vector3;
use crate::tuning::Tuning;

/// Push intent from the human player, set by the input layer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Desired direction on the ground plane (x, z); length is clamped to 1
    pub push: DVec2,
}

/// Start-of-tick view of another player
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub center: DVec2,
    pub velocity: Vector3,
    pub on_surface: bool,
}

/// What a controller may look at when deciding
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    /// Surface orientation, degrees
    pub tilt: Vector3,
    pub surface_radius: f64,
    pub players: &'a [PlayerSnapshot],
    pub input: PlayerInput,
}

impl WorldView<'_> {
    /// Closest on-surface player other than `id`
    pub fn nearest_opponent(&self, id: u32, from: DVec2) -> Option<&PlayerSnapshot> {
        self.players
            .iter()
            .filter(|p| p.id != id && p.on_surface)
            .min_by(|a, b| {
                a.center
                    .distance_squared(from)
                    .partial_cmp(&b.center.distance_squared(from))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

pub trait PlayerController {
    fn update(&mut self, player: &mut Body, view: &WorldView<'_>);
}

/// Driven by the human's push intent
#[derive(Debug, Clone)]
pub struct KeyboardController {
    push_force: f64,
}

impl KeyboardController {
    pub fn new(push_force: f64) -> Self {
        Self { push_force }
    }
}

impl PlayerController for KeyboardController {
    fn update(&mut self, player: &mut Body, view: &WorldView<'_>) {
        if !player.on_surface {
            return;
        }
        let push = view.input.push.clamp_length_max(1.0);
        if push == DVec2::ZERO {
            return;
        }
        player.add_force(Vector3::new(push.x, 0.0, push.y) * self.push_force);
    }
}

/// Computer opponent: stays away from the edge and rams the nearest player
#[derive(Debug, Clone)]
pub struct OpponentController {
    id: u32,
    push_force: f64,
    retreat_fraction: f64,
}

impl OpponentController {
    pub fn new(id: u32, push_force: f64, retreat_fraction: f64) -> Self {
        Self {
            id,
            push_force,
            retreat_fraction,
        }
    }

    fn target(&self, from: DVec2, view: &WorldView<'_>) -> DVec2 {
        if from.length() > view.surface_radius * self.retreat_fraction {
            return DVec2::ZERO;
        }
        view.nearest_opponent(self.id, from)
            .map(|p| p.center)
            .unwrap_or(DVec2::ZERO)
    }
}

impl PlayerController for OpponentController {
    fn update(&mut self, player: &mut Body, view: &WorldView<'_>) {
        if !player.on_surface {
            return;
        }
        let from = player.center();
        let dir = (self.target(from, view) - from).normalize_or_zero();
        if dir == DVec2::ZERO {
            return;
        }
        player.add_force(Vector3::new(dir.x, 0.0, dir.y) * self.push_force);
    }
}

/// Id of the player driven from the keyboard
pub const KEYBOARD_PLAYER_ID: u32 = 1;

/// Decides which controller a new player gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerPolicy {
    pub human_player: bool,
}

impl ControllerPolicy {
    pub fn controller_for(&self, id: u32, tuning: &Tuning) -> Box<dyn PlayerController> {
        if self.human_player && id == KEYBOARD_PLAYER_ID {
            Box::new(KeyboardController::new(tuning.keyboard_push_force))
        } else {
            Box::new(OpponentController::new(
                id,
                tuning.opponent_push_force,
                tuning.opponent_retreat_fraction,
            ))
        }
    }
}

impl Default for ControllerPolicy {
    fn default() -> Self {
        Self { human_player: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ModelHandle;

    const EPS: f64 = 1e-9;

    fn snapshot(id: u32, x: f64, z: f64, on_surface: bool) -> PlayerSnapshot {
        PlayerSnapshot {
            id,
            center: DVec2::new(x, z),
            velocity: Vector3::ZERO,
            on_surface,
        }
    }

    fn view<'a>(players: &'a [PlayerSnapshot], input: PlayerInput) -> WorldView<'a> {
        WorldView {
            tilt: Vector3::ZERO,
            surface_radius: 6.6,
            players,
            input,
        }
    }

    fn player_at(x: f64, z: f64) -> Body {
        Body::new(ModelHandle(0), 3.0, 0.7).with_position(Vector3::new(x, 0.0, z))
    }

    #[test]
    fn test_keyboard_applies_clamped_push() {
        let mut controller = KeyboardController::new(15.0);
        let mut body = player_at(0.0, 0.0);
        let input = PlayerInput {
            push: DVec2::new(3.0, 4.0),
        };
        controller.update(&mut body, &view(&[], input));
        assert!((body.force - Vector3::new(9.0, 0.0, 12.0)).length() < EPS);
    }

    #[test]
    fn test_keyboard_idle_when_airborne() {
        let mut controller = KeyboardController::new(15.0);
        let mut body = player_at(0.0, 0.0);
        body.on_surface = false;
        let input = PlayerInput { push: DVec2::X };
        controller.update(&mut body, &view(&[], input));
        assert_eq!(body.force, Vector3::ZERO);
    }

    #[test]
    fn test_opponent_chases_nearest_on_surface() {
        let players = [
            snapshot(2, 1.0, 0.0, true),
            snapshot(3, 0.0, 0.5, false),
            snapshot(4, 0.0, -3.0, true),
        ];
        let mut controller = OpponentController::new(2, 12.0, 0.6);
        let mut body = player_at(1.0, 0.0);
        controller.update(&mut body, &view(&players, PlayerInput::default()));

        let expected = Vector3::new(-1.0, 0.0, -3.0).normalize() * 12.0;
        assert!((body.force - expected).length() < EPS);
    }

    #[test]
    fn test_opponent_retreats_from_edge() {
        let players = [snapshot(2, 5.0, 0.0, true), snapshot(3, 6.0, 0.0, true)];
        let mut controller = OpponentController::new(2, 12.0, 0.6);
        let mut body = player_at(5.0, 0.0);
        controller.update(&mut body, &view(&players, PlayerInput::default()));
        assert!((body.force - Vector3::new(-12.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_policy_picks_keyboard_for_player_one() {
        let tuning = Tuning::default();
        let policy = ControllerPolicy::default();
        let mut body = player_at(0.0, 0.0);

        // Player 1 ignores other players and follows input only
        let players = [snapshot(1, 0.0, 0.0, true), snapshot(2, 1.0, 0.0, true)];
        let mut keyboard = policy.controller_for(1, &tuning);
        keyboard.update(&mut body, &view(&players, PlayerInput::default()));
        assert_eq!(body.force, Vector3::ZERO);

        let mut opponent = policy.controller_for(2, &tuning);
        let mut other = player_at(1.0, 0.0);
        opponent.update(&mut other, &view(&players, PlayerInput::default()));
        assert!(other.force.x < 0.0);

        let autopilot = ControllerPolicy { human_player: false };
        let mut auto = autopilot.controller_for(1, &tuning);
        auto.update(&mut body, &view(&players, PlayerInput::default()));
        assert!(body.force.x > 0.0);
    }
}
