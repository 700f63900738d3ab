//! Vector and matrix helpers
//!
//! The simulation runs in `f64` on glam's `DVec3`/`DMat4`. The few operations the
//! game needs beyond glam live on the extension traits here.

use glam::{DMat4, DVec2, DVec3, DVec4};

use crate::error::{SimError, SimResult};

/// 3D vector used for positions, velocities, forces and orientation angles
pub type Vector3 = DVec3;

/// 4x4 transform, only ever used as a basis change
pub type Matrix4 = DMat4;

pub trait Vector3Ext {
    /// Divide by a scalar, rejecting zero
    fn try_div(self, scalar: f64) -> SimResult<Vector3>;

    /// Signed angle (radians) from `self` to `other`, projected onto the X-Z plane
    fn angle_between(self, other: Vector3) -> f64;

    /// Footprint center on the ground plane: (x, z)
    fn planar(self) -> DVec2;
}

impl Vector3Ext for Vector3 {
    fn try_div(self, scalar: f64) -> SimResult<Vector3> {
        if scalar == 0.0 {
            return Err(SimError::InvalidArgument("division of vector by zero scalar".into()));
        }
        Ok(self / scalar)
    }

    fn angle_between(self, other: Vector3) -> f64 {
        other.z.atan2(other.x) - self.z.atan2(self.x)
    }

    #[inline]
    fn planar(self) -> DVec2 {
        DVec2::new(self.x, self.z)
    }
}

pub trait Matrix4Ext {
    /// Basis change with rows `(y_axis x z_axis, y_axis, z_axis)` and no translation
    fn axis_translation(y_axis: Vector3, z_axis: Vector3) -> Matrix4;

    /// Element at `(row, col)`
    fn at(&self, row: usize, col: usize) -> f64;
}

impl Matrix4Ext for Matrix4 {
    fn axis_translation(y_axis: Vector3, z_axis: Vector3) -> Matrix4 {
        let x_axis = y_axis.cross(z_axis);
        // glam stores columns; build the rows as columns and transpose
        DMat4::from_cols(
            x_axis.extend(0.0),
            y_axis.extend(0.0),
            z_axis.extend(0.0),
            DVec4::W,
        )
        .transpose()
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.col(col)[row]
    }
}
