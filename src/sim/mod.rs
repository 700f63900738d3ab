//! Simulation module
//!
//! Everything that moves lives here. Rules for code in this module:
//! - Randomness only through `SimContext`
//! - Time only through a `TimeSource`
//! - Stable iteration order (load order for players, ring order for pillars)
//! - Drawing and sound only through the `Renderer` and `SoundEngine` capabilities

pub mod body;
pub mod clock;
pub mod collision;
pub mod context;
pub mod controller;
pub mod forces;
pub mod math;
pub mod physics;
pub mod surface;
pub mod world;

pub use body::{Body, GameObject};
pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use collision::{collide, overlapping_distance, resolve_contact, restitution_exchange};
pub use context::{SimContext, UniformSource};
pub use controller::{
    ControllerPolicy, KEYBOARD_PLAYER_ID, KeyboardController, OpponentController, PlayerController,
    PlayerInput, PlayerSnapshot, WorldView,
};
pub use forces::{Friction, SurfaceForces, surface_forces};
pub use math::{Matrix4, Matrix4Ext, Vector3, Vector3Ext};
pub use physics::PhysicsEngine;
pub use surface::{Surface, TiltParams};
pub use world::{
    BodyState, GameEvent, MAX_PHYSICS_GAP, PHYSICS_INTERVAL, Player, World, WorldParts,
    WorldSnapshot,
};
