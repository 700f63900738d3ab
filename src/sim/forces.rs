//! Splitting the forces on a body into push, normal and friction on the tilted surface

use super::math::{Matrix4, Matrix4Ext, Vector3};

/// Result of decomposing a body's force against the surface plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceForces {
    /// Net horizontal force after friction (zero when held by static friction)
    pub push: Vector3,
    /// Normal force magnitude
    pub normal: f64,
    /// True when the driving force alone cannot overcome static friction
    pub within_static: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Friction {
    pub static_coefficient: f64,
    pub kinetic_coefficient: f64,
}

/// Decompose `force` for a body moving at `velocity` on a surface tilted by
/// `tilt_y`/`tilt_z` degrees.
///
/// The force is moved into surface-local axes: local Y is the surface normal and gives
/// the normal force, local X/Z drive the body. A moving body, or one pushed harder than
/// static friction allows, gets kinetic friction against its motion (or against the
/// push when still). Otherwise the body stays put.
pub fn surface_forces(
    tilt_y: f64,
    tilt_z: f64,
    force: Vector3,
    velocity: Vector3,
    friction: Friction,
) -> SurfaceForces {
    let y_rad = tilt_y.to_radians();
    let z_rad = tilt_z.to_radians();

    let z_axis = Vector3::new(-z_rad.sin(), z_rad.cos(), 0.0);
    let y_axis = Vector3::new(0.0, -y_rad.sin(), y_rad.cos());

    let basis = Matrix4::axis_translation(z_axis, y_axis);
    let local = basis.transform_point3(force);

    let horizontal = Vector3::new(local.x, 0.0, local.z);
    let normal = -local.y;

    let max_static = friction.static_coefficient * normal;
    let within_static = horizontal.length() <= max_static;
    let moving = velocity.length() != 0.0;

    if !within_static || moving {
        let against = if moving {
            -velocity.normalize_or_zero()
        } else {
            -horizontal.normalize_or_zero()
        };
        let kinetic = against * (friction.kinetic_coefficient * normal);
        SurfaceForces {
            push: horizontal + kinetic,
            normal,
            within_static,
        }
    } else {
        SurfaceForces {
            push: Vector3::ZERO,
            normal,
            within_static,
        }
    }
}
