//! The game world
//!
//! Owns the surface, the pillar ring and the players, and runs one physics tick per
//! frame when enough time has passed:
//! 1. tilt the surface
//! 2. per player, in load order: on-surface check, gravity, surface forces, controller,
//!    integration, pillar collisions, player collisions
//! 3. integrate the pillars
//! 4. hand events to the audio layer
//!
//! Rendering follows, every frame, whether or not physics ran.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::body::{Body, GameObject};
use super::clock::TimeSource;
use super::collision::resolve_contact;
use super::context::SimContext;
use super::controller::{ControllerPolicy, PlayerController, PlayerInput, PlayerSnapshot, WorldView};
use super::forces::{Friction, surface_forces};
use super::math::Vector3;
use super::physics::PhysicsEngine;
use super::surface::{Surface, TiltParams};
use crate::audio::AudioManager;
use crate::error::{ModelKind, SimError, SimResult};
use crate::render::Renderer;
use crate::tuning::Tuning;

/// A physics tick only runs once more than this has passed since the last one
pub const PHYSICS_INTERVAL: Duration = Duration::from_millis(15);
/// Longer gaps (pause, stall, round start) are dropped instead of simulated
pub const MAX_PHYSICS_GAP: Duration = Duration::from_millis(100);

/// Things that happened during a tick or a round transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFell { player: u32 },
    PillarHit { pillar: usize, player: u32 },
    RoundStarted { round: u32 },
    RoundWon { player: u32 },
    FinalWinner { player: u32 },
}

/// A body together with the controller that drives it
pub struct Player {
    id: u32,
    pub body: Body,
    controller: Box<dyn PlayerController>,
}

impl Player {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            center: self.body.center(),
            velocity: self.body.velocity,
            on_surface: self.body.on_surface,
        }
    }
}

/// Collaborators a world is built from; they outlive every round
pub struct WorldParts {
    pub ctx: SimContext,
    pub renderer: Box<dyn Renderer>,
    pub audio: AudioManager,
    pub clock: Box<dyn TimeSource>,
}

/// Plain copy of a body's drawable state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyState {
    pub id: Option<u32>,
    pub position: Vector3,
    pub orientation: Vector3,
    pub on_surface: bool,
}

impl BodyState {
    fn of(body: &Body, id: Option<u32>) -> Self {
        Self {
            id,
            position: body.position,
            orientation: body.orientation,
            on_surface: body.on_surface,
        }
    }
}

/// Everything a renderer on another thread needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub tilt: Vector3,
    pub pillars: Vec<BodyState>,
    pub players: Vec<BodyState>,
    pub winner: Option<u32>,
}

pub struct World {
    ctx: SimContext,
    tuning: Tuning,
    policy: ControllerPolicy,
    renderer: Box<dyn Renderer>,
    audio: AudioManager,
    clock: Box<dyn TimeSource>,
    physics: PhysicsEngine,
    running: bool,
    last_physics: Duration,
    ticks: u64,

    surface: Option<Surface>,
    pillars: Vec<Body>,
    players: Vec<Player>,
    winner: Option<u32>,
    crown: Option<Body>,
    input: PlayerInput,
    events: Vec<GameEvent>,
}

impl World {
    pub fn new(parts: WorldParts, tuning: Tuning, policy: ControllerPolicy) -> Self {
        let last_physics = parts.clock.now();
        Self {
            ctx: parts.ctx,
            physics: PhysicsEngine::new(tuning.gravity),
            tuning,
            policy,
            renderer: parts.renderer,
            audio: parts.audio,
            clock: parts.clock,
            running: true,
            last_physics,
            ticks: 0,
            surface: None,
            pillars: Vec::new(),
            players: Vec::new(),
            winner: None,
            crown: None,
            input: PlayerInput::default(),
            events: Vec::new(),
        }
    }

    /// Clear everything loaded for a round; the collaborators stay
    pub fn reset(&mut self) {
        self.surface = None;
        self.pillars.clear();
        self.players.clear();
        self.winner = None;
        self.crown = None;
        self.input = PlayerInput::default();
        self.events.clear();
        self.running = true;
        self.last_physics = self.clock.now();
    }

    // === Loading ===

    fn load_model(&mut self, kind: ModelKind, path: &str) -> SimResult<crate::render::ModelHandle> {
        self.renderer
            .load_model(path)
            .ok_or_else(|| SimError::ResourceLoad {
                kind,
                path: path.to_string(),
            })
    }

    pub fn load_surface(&mut self, path: &str) -> SimResult<()> {
        let model = self.load_model(ModelKind::Surface, path)?;
        let params = TiltParams {
            max_rotation: self.tuning.max_rotation,
            change_factor: self.tuning.change_factor,
            change_after_secs: self.tuning.change_after_secs,
        };
        self.surface = Some(Surface::new(model, self.tuning.surface_radius, params));
        log::info!("Surface loaded from {}", path);
        Ok(())
    }

    /// Place the pillar ring on the surface edge. The ring never grows past
    /// `num_pillars`, however often this is called.
    pub fn load_pillars(&mut self, path: &str) -> SimResult<()> {
        let model = self.load_model(ModelKind::Pillar, path)?;
        let edge = self
            .surface
            .as_ref()
            .ok_or(SimError::SurfaceNotLoaded)?
            .radius();

        let count = self.tuning.num_pillars;
        let step = std::f64::consts::TAU / count.max(1) as f64;
        let mut index = 0;
        while self.pillars.len() < count {
            let angle = step * index as f64;
            if angle >= std::f64::consts::TAU {
                break;
            }
            let pillar = Body::new(model, self.tuning.pillar_mass, self.tuning.pillar_radius)
                .with_accumulation(self.tuning.force_accumulation)
                .with_position(Vector3::new(angle.cos() * edge, 0.0, angle.sin() * edge));
            self.pillars.push(pillar);
            index += 1;
        }
        log::info!("{} pillars placed", self.pillars.len());
        Ok(())
    }

    /// Add a player; call once per player before the round starts
    pub fn load_player(&mut self, path: &str, id: u32) -> SimResult<&Player> {
        let model = self.load_model(ModelKind::Player, path)?;
        let body = Body::new(model, self.tuning.player_mass, self.tuning.player_radius)
            .with_accumulation(self.tuning.force_accumulation);
        let controller = self.policy.controller_for(id, &self.tuning);
        self.players.push(Player {
            id,
            body,
            controller,
        });
        log::info!("Player {} loaded", id);
        Ok(&self.players[self.players.len() - 1])
    }

    pub fn load_crown(&mut self, path: &str) -> SimResult<()> {
        let model = self.load_model(ModelKind::Crown, path)?;
        self.crown = Some(Body::new(
            model,
            self.tuning.crown_mass,
            self.tuning.player_radius,
        ));
        Ok(())
    }

    /// Spread the players evenly on a ring around the center
    pub fn place_players_on_ring(&mut self, radius: f64) {
        let count = self.players.len().max(1) as f64;
        for (i, player) in self.players.iter_mut().enumerate() {
            let angle = std::f64::consts::TAU * i as f64 / count;
            player.body.position = Vector3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
        }
    }

    // === Running ===

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn run(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// One frame: a physics tick if it is due, then the render pass
    pub fn update(&mut self) {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_physics);

        let mut due = self.running && elapsed > PHYSICS_INTERVAL;
        if elapsed > MAX_PHYSICS_GAP {
            log::debug!("Dropping physics gap of {:?}", elapsed);
            due = false;
            self.last_physics = now;
        }

        if due {
            if let Err(e) = self.step(elapsed.as_secs_f64()) {
                log::error!("Physics tick failed, skipping: {}", e);
            }
            self.last_physics = now;
        }

        self.render();
    }

    /// Advance the simulation by `dt` seconds, bypassing the clock
    pub fn step(&mut self, dt: f64) -> SimResult<()> {
        let surface = self.surface.as_mut().ok_or(SimError::SurfaceNotLoaded)?;
        surface.update(dt, self.ctx.rng.as_mut());

        let tilt = surface.orientation;
        let surface_radius = surface.radius();

        for pillar in &mut self.pillars {
            pillar.set_orientation(0.0, tilt.y, tilt.z);
        }
        // Knocked pillars fall; a pillar knocked this tick keeps its pure upward kick
        for pillar in self.pillars.iter_mut().filter(|p| !p.on_surface) {
            self.physics.apply_gravity(pillar);
        }

        let snapshots: Vec<PlayerSnapshot> = self.players.iter().map(Player::snapshot).collect();
        let view = WorldView {
            tilt,
            surface_radius,
            players: &snapshots,
            input: self.input,
        };

        let mut events = Vec::new();
        let moved = self.move_bodies(&view, dt, &mut events);

        // Events raised before a failure are still delivered
        for event in &events {
            self.audio.dispatch(event, self.ctx.volume);
        }
        self.events.extend(events);
        moved?;

        self.ticks += 1;
        Ok(())
    }

    fn move_bodies(&mut self, view: &WorldView<'_>, dt: f64, events: &mut Vec<GameEvent>) -> SimResult<()> {
        for i in 0..self.players.len() {
            self.check_on_surface(i, events);
            self.drive_player(i, view, dt)?;
            self.collide_with_pillars(i, events)?;
            self.collide_with_players(i)?;
        }

        for pillar in &mut self.pillars {
            self.physics.integrate(pillar, dt)?;
        }
        Ok(())
    }

    fn check_on_surface(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        let Some(surface) = &self.surface else { return };
        let player = &mut self.players[index];
        let overlap = surface.overlapping_distance(&player.body);
        if overlap < player.body.radius() / 2.0 {
            if player.body.on_surface {
                log::info!("Player {} fell off", player.id);
                events.push(GameEvent::PlayerFell { player: player.id });
            }
            player.body.on_surface = false;
        }
    }

    fn drive_player(&mut self, index: usize, view: &WorldView<'_>, dt: f64) -> SimResult<()> {
        let physics = self.physics;
        let friction = Friction {
            static_coefficient: self.tuning.static_friction,
            kinetic_coefficient: self.tuning.kinetic_friction,
        };
        let player = &mut self.players[index];
        let body = &mut player.body;

        physics.apply_gravity(body);

        if !body.on_surface {
            player.controller.update(body, view);
            return physics.integrate(body, dt);
        }

        let forces = surface_forces(view.tilt.y, view.tilt.z, body.force, body.velocity, friction);
        body.force = forces.push;
        player.controller.update(body, view);
        let pushed = body.force != forces.push;
        body.set_orientation(body.orientation.x, view.tilt.y, view.tilt.z);

        let before = body.velocity;
        physics.integrate(body, dt)?;

        // Friction alone brings a slow body to rest rather than reversing it
        if forces.within_static && !pushed && before != Vector3::ZERO && before.dot(body.velocity) <= 0.0 {
            body.velocity = Vector3::ZERO;
        }
        Ok(())
    }

    fn collide_with_pillars(&mut self, index: usize, events: &mut Vec<GameEvent>) -> SimResult<()> {
        let player = &mut self.players[index];
        for (k, pillar) in self.pillars.iter_mut().enumerate() {
            if !pillar.on_surface {
                continue;
            }
            let overlap = player.body.overlapping_distance(pillar);
            if overlap > 0.0 {
                pillar.force = Vector3::new(0.0, self.tuning.pillar_knock_force, 0.0);
                pillar.on_surface = false;
                log::debug!("Player {} knocked pillar {}", player.id, k);
                events.push(GameEvent::PillarHit {
                    pillar: k,
                    player: player.id,
                });
                resolve_contact(&mut player.body, pillar, overlap, self.tuning.pillar_restitution)?;
            }
        }
        Ok(())
    }

    fn collide_with_players(&mut self, index: usize) -> SimResult<()> {
        for other in 0..self.players.len() {
            if other == index {
                continue;
            }
            let (player, other) = pair_mut(&mut self.players, index, other);
            let overlap = player.body.overlapping_distance(&other.body);
            if overlap > 0.0 {
                resolve_contact(
                    &mut player.body,
                    &mut other.body,
                    overlap,
                    self.tuning.player_restitution,
                )?;
            }
        }
        Ok(())
    }

    // === Rendering ===

    fn render(&mut self) {
        if let Some(surface) = &self.surface {
            self.renderer.render_game_object(surface);
        }
        for pillar in &self.pillars {
            self.renderer.render_game_object(pillar);
        }
        for player in &self.players {
            self.renderer.render_game_object(&player.body);
        }
        if self.winner.is_some() {
            self.show_crown();
        }
    }

    fn show_crown(&mut self) {
        let Some(winner) = self.winner.and_then(|id| self.players.iter().find(|p| p.id == id)) else {
            return;
        };
        let Some(crown) = self.crown.as_mut() else { return };

        let pos = winner.body.position;
        let orientation = winner.body.orientation;
        crown.position = Vector3::new(pos.x, pos.y + self.tuning.crown_lift, pos.z);
        crown.set_orientation(0.0, orientation.y, orientation.z);
        self.renderer.render_game_object(crown);
    }

    /// Draw only the match winner, centered, wearing the crown
    pub fn show_final_winner(&mut self) {
        let Some(id) = self.winner else { return };
        let Some(winner) = self.players.iter_mut().find(|p| p.id == id) else {
            return;
        };
        winner.body.position = Vector3::ZERO;
        let x = winner.body.orientation.x - 0.5;
        winner.body.set_orientation(x, 0.0, 0.0);
        self.renderer.render_game_object(&winner.body);

        self.show_crown();
    }

    // === Control & queries ===

    /// Manual additive tilt in degrees
    pub fn tilt_surface(&mut self, dy: f64, dz: f64) {
        match self.surface.as_mut() {
            Some(surface) => surface.tilt(dy, dz),
            None => log::warn!("Cannot tilt before the surface is loaded"),
        }
    }

    pub fn set_winner(&mut self, winner: Option<u32>) {
        self.winner = winner;
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Players still standing, in load order
    pub fn standing_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.body.on_surface)
    }

    pub fn pillars(&self) -> &[Body] {
        &self.pillars
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn crown(&self) -> Option<&Body> {
        self.crown.as_ref()
    }

    pub fn set_input(&mut self, input: PlayerInput) {
        self.input = input;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Signal an event that happens outside physics (round flow) right away
    pub fn announce(&mut self, event: GameEvent) {
        self.audio.dispatch(&event, self.ctx.volume);
        self.events.push(event);
    }

    /// Events since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.ticks,
            tilt: self.surface.as_ref().map(|s| s.orientation).unwrap_or_default(),
            pillars: self.pillars.iter().map(|p| BodyState::of(p, None)).collect(),
            players: self
                .players
                .iter()
                .map(|p| BodyState::of(&p.body, Some(p.id)))
                .collect(),
            winner: self.winner,
        }
    }
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
