//! The tilting platform
//!
//! Each axis (Y and Z) drifts by a random amount every tick in its current direction.
//! Past the bound the direction is turned back toward level; inside it the direction
//! flips at random with a mean interval of `change_after_secs`.

use super::body::GameObject;
use super::context::UniformSource;
use super::math::Vector3;
use crate::render::ModelHandle;

#[derive(Debug, Clone, Copy)]
pub struct TiltParams {
    /// Degrees
    pub max_rotation: f64,
    /// Degrees per second
    pub change_factor: f64,
    pub change_after_secs: f64,
}

#[derive(Debug, Clone, Copy)]
enum TiltAxis {
    Y,
    Z,
}

#[derive(Debug, Clone)]
pub struct Surface {
    model: ModelHandle,
    radius: f64,
    params: TiltParams,
    position: Vector3,
    scaling: Vector3,
    /// Degrees; only Y and Z ever change on their own
    pub orientation: Vector3,
    change_direction: Vector3,
    change_size: Vector3,
}

impl Surface {
    pub fn new(model: ModelHandle, radius: f64, params: TiltParams) -> Self {
        Self {
            model,
            radius,
            params,
            position: Vector3::ZERO,
            scaling: Vector3::new(10.0, 5.0, 10.0),
            orientation: Vector3::ZERO,
            change_direction: Vector3::new(0.0, 1.0, 1.0),
            change_size: Vector3::ZERO,
        }
    }

    /// Advance the tilt by `dt` seconds
    pub fn update(&mut self, dt: f64, rng: &mut dyn UniformSource) {
        let change_max = self.params.change_factor * dt;
        self.change_size.y = rng.next_unit() * change_max;
        self.change_size.z = rng.next_unit() * change_max;

        self.update_axis(TiltAxis::Y, dt, rng);
        self.update_axis(TiltAxis::Z, dt, rng);

        self.orientation += self.change_direction * self.change_size;
    }

    fn update_axis(&mut self, axis: TiltAxis, dt: f64, rng: &mut dyn UniformSource) {
        let (angle, direction) = match axis {
            TiltAxis::Y => (self.orientation.y, &mut self.change_direction.y),
            TiltAxis::Z => (self.orientation.z, &mut self.change_direction.z),
        };

        // No random draw is taken while past the bound. The direction points back toward
        // level instead of flipping; a plain flip can keep walking away from the bound.
        if angle.abs() > self.params.max_rotation {
            *direction = -angle.signum();
        } else if rng.next_unit() < dt / self.params.change_after_secs {
            *direction = -*direction;
        }
    }

    /// Manual additive tilt (degrees)
    pub fn tilt(&mut self, dy: f64, dz: f64) {
        self.orientation += Vector3::new(0.0, dy, dz);
    }

    pub fn tilt_y(&self) -> f64 {
        self.orientation.y
    }

    pub fn tilt_z(&self) -> f64 {
        self.orientation.z
    }
}

impl GameObject for Surface {
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
