//! Physical bodies and the shared game-object contract

use glam::DVec2;

use super::collision::overlapping_distance;
use super::math::{Vector3, Vector3Ext};
use crate::render::ModelHandle;
use crate::tuning::ForceAccumulation;

/// Anything the renderer can draw and the world can test for overlap.
///
/// Footprints are circles on the X-Z plane; height never takes part in overlap.
pub trait GameObject {
    fn model(&self) -> ModelHandle;
    fn position(&self) -> Vector3;
    /// Rotation angles in degrees about X, Y and Z
    fn orientation(&self) -> Vector3;
    fn scaling(&self) -> Vector3;
    fn radius(&self) -> f64;

    /// Footprint center (x, z)
    fn center(&self) -> DVec2 {
        self.position().planar()
    }

    /// Penetration depth of the two footprints, 0 when apart
    fn overlapping_distance(&self, other: &dyn GameObject) -> f64 {
        overlapping_distance(self.center(), self.radius(), other.center(), other.radius())
    }
}

/// A circular-footprint entity: player, pillar or the crown
#[derive(Debug, Clone)]
pub struct Body {
    model: ModelHandle,
    mass: f64,
    radius: f64,
    accumulation: ForceAccumulation,
    pub position: Vector3,
    pub velocity: Vector3,
    /// Force accumulated this tick; cleared by integration
    pub force: Vector3,
    /// Degrees
    pub orientation: Vector3,
    pub scaling: Vector3,
    pub on_surface: bool,
}

impl Body {
    pub fn new(model: ModelHandle, mass: f64, radius: f64) -> Self {
        Self {
            model,
            mass,
            radius,
            accumulation: ForceAccumulation::Accumulate,
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
            force: Vector3::ZERO,
            orientation: Vector3::ZERO,
            scaling: Vector3::ONE,
            on_surface: true,
        }
    }

    pub fn with_accumulation(mut self, accumulation: ForceAccumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn add_force(&mut self, force: Vector3) {
        self.force = match self.accumulation {
            ForceAccumulation::Accumulate => self.force + force,
            ForceAccumulation::LegacyDoubling => force + force,
        };
    }

    pub fn add_velocity(&mut self, velocity: Vector3) {
        self.velocity = match self.accumulation {
            ForceAccumulation::Accumulate => self.velocity + velocity,
            ForceAccumulation::LegacyDoubling => velocity + velocity,
        };
    }

    pub fn set_orientation(&mut self, x: f64, y: f64, z: f64) {
        self.orientation = Vector3::new(x, y, z);
    }

    /// Move away from whatever lies along `direction` by `dist` on the ground plane.
    ///
    /// A zero planar direction has no angle, so nothing moves.
    pub fn retract(&mut self, direction: Vector3, dist: f64) {
        if direction.x == 0.0 && direction.z == 0.0 {
            return;
        }
        let alpha = direction.z.atan2(direction.x);
        self.position += Vector3::new(-dist * alpha.cos(), 0.0, -dist * alpha.sin());
    }
}

impl GameObject for Body {
    fn model(&self) -> ModelHandle {
        self.model
    }

    fn position(&self) -> Vector3 {
        self.position
    }

    fn orientation(&self) -> Vector3 {
        self.orientation
    }

    fn scaling(&self) -> Vector3 {
        self.scaling
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn body(mass: f64, radius: f64) -> Body {
        Body::new(ModelHandle(0), mass, radius)
    }

    #[test]
    fn test_add_force_accumulates() {
        let mut b = body(3.0, 0.7);
        b.add_force(Vector3::new(1.0, 0.0, 0.0));
        b.add_force(Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(b.force, Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_legacy_add_force_doubles_argument() {
        let mut b = body(3.0, 0.7).with_accumulation(ForceAccumulation::LegacyDoubling);
        b.force = Vector3::new(100.0, 0.0, 0.0);
        b.add_force(Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(b.force, Vector3::new(0.0, -2.0, 0.0));

        b.add_velocity(Vector3::new(0.5, 0.0, 0.0));
        assert_eq!(b.velocity, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_retract_moves_away_from_other() {
        let mut b = body(3.0, 0.7);
        b.retract(Vector3::new(1.0, 0.0, 0.0), 0.4);
        assert!((b.position - Vector3::new(-0.4, 0.0, 0.0)).length() < EPS);

        let mut b = body(3.0, 0.7);
        b.retract(Vector3::new(0.0, 7.0, -2.0), 0.5);
        assert!((b.position - Vector3::new(0.0, 0.0, 0.5)).length() < EPS);
    }

    #[test]
    fn test_retract_degenerate_direction_is_noop() {
        let mut b = body(3.0, 0.7).with_position(Vector3::new(1.0, 2.0, 3.0));
        b.retract(Vector3::new(0.0, 5.0, 0.0), 1.0);
        assert_eq!(b.position, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_overlap_ignores_height() {
        let a = body(3.0, 0.7);
        let b = body(3.0, 0.7).with_position(Vector3::new(1.0, -50.0, 0.0));
        assert!((a.overlapping_distance(&b) - 0.4).abs() < EPS);
        assert!((b.overlapping_distance(&a) - 0.4).abs() < EPS);
    }
}
