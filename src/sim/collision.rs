//! Collision detection and response for circular footprints
//!
//! Bodies overlap when their X-Z circles intersect. Response is a retraction of the
//! moving body by the penetration depth followed by a 1-D restitution exchange applied
//! to the full velocity vectors. That exchange is not split along the contact normal,
//! so oblique hits are only approximate; the game has always played that way.

use glam::DVec2;

use super::body::{Body, GameObject};
use super::math::{Vector3, Vector3Ext};
use crate::error::SimResult;

/// Penetration depth of two circles, 0 when they do not overlap
#[inline]
pub fn overlapping_distance(center_a: DVec2, radius_a: f64, center_b: DVec2, radius_b: f64) -> f64 {
    let dist = center_a.distance(center_b);
    let reach = radius_a + radius_b;
    if dist >= reach {
        return 0.0;
    }
    reach - dist
}

/// Velocities after a collision with coefficient of restitution `cr`.
///
/// `v1 = (m1*u1 + m2*u2 + m2*cr*(u2-u1)) / (m1+m2)`, and symmetrically for `v2`.
pub fn restitution_exchange(
    m1: f64,
    u1: Vector3,
    m2: f64,
    u2: Vector3,
    cr: f64,
) -> SimResult<(Vector3, Vector3)> {
    let total = m1 + m2;
    let v1 = (u1 * m1 + u2 * m2 + (u2 - u1) * (m2 * cr)).try_div(total)?;
    let v2 = (u2 * m2 + u1 * m1 + (u1 - u2) * (m1 * cr)).try_div(total)?;
    Ok((v1, v2))
}

/// Apply the restitution exchange to two bodies in place
pub fn collide(a: &mut Body, b: &mut Body, cr: f64) -> SimResult<()> {
    let (v1, v2) = restitution_exchange(a.mass(), a.velocity, b.mass(), b.velocity, cr)?;
    a.velocity = v1;
    b.velocity = v2;
    Ok(())
}

/// Push `a` out of `b` by `overlap`, then exchange velocities
pub fn resolve_contact(a: &mut Body, b: &mut Body, overlap: f64, cr: f64) -> SimResult<()> {
    let toward = b.center() - a.center();
    a.retract(Vector3::new(toward.x, 0.0, toward.y), overlap);
    collide(a, b, cr)
}
