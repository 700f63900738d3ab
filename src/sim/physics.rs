//! Semi-implicit Euler integration of a single body

use super::body::Body;
use super::math::{Vector3, Vector3Ext};
use crate::error::SimResult;

#[derive(Debug, Clone, Copy)]
pub struct PhysicsEngine {
    /// Gravitational acceleration, pointing down
    pub gravity: Vector3,
}

impl PhysicsEngine {
    pub fn new(gravity: f64) -> Self {
        Self {
            gravity: Vector3::new(0.0, -gravity, 0.0),
        }
    }

    /// Add the body's weight to its force accumulator
    pub fn apply_gravity(&self, body: &mut Body) {
        body.add_force(self.gravity * body.mass());
    }

    /// Advance velocity then position by `dt` seconds and clear the accumulated force.
    /// A massless body is rejected and left untouched.
    pub fn integrate(&self, body: &mut Body, dt: f64) -> SimResult<()> {
        let acceleration = body.force.try_div(body.mass())?;
        body.velocity += acceleration * dt;
        body.position += body.velocity * dt;
        body.force = Vector3::ZERO;
        Ok(())
    }
}
