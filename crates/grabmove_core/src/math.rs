//! Small vector helpers shared by the engagement tracker and the motion
//! integrator.
//!
//! World space is glam's right-handed, Y-up frame.  "Horizontal" always
//! means the XZ plane.

use glam::Vec3;

/// Guard for squared lengths and distances.  Anything below this is treated
/// as a degenerate (direction-less) vector.
pub const EPSILON: f32 = 1e-6;

/// Zero the vertical component of `v`.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Scale `v` down so its length does not exceed `max`.
///
/// The direction is preserved and the vector is never amplified; vectors
/// already within bounds (or too short to have a direction) come back
/// unchanged.
#[inline]
pub fn clamp_length(v: Vec3, max: f32) -> Vec3 {
    let len = v.length();
    if len > max && len > EPSILON {
        v * (max / len)
    } else {
        v
    }
}

/// Signed yaw in radians that turns `from` onto `to` about the +Y axis.
///
/// Both vectors are flattened first.  The sign follows the right-hand rule
/// around +Y, so `Quat::from_rotation_y(signed_yaw(a, b)?) * a` points along
/// `b`; turning +X onto +Z yields `-PI / 2`.
///
/// Returns `None` when either flattened vector is degenerate.
pub fn signed_yaw(from: Vec3, to: Vec3) -> Option<f32> {
    let a = flatten(from);
    let b = flatten(to);
    if a.length_squared() < EPSILON || b.length_squared() < EPSILON {
        return None;
    }
    let a = a.normalize();
    let b = b.normalize();
    Some(a.cross(b).y.atan2(a.dot(b)))
}

/// Interpolation weight for one frame of exponential smoothing at `rate`
/// (per second).  Saturates at 1 so a long frame snaps to the target rather
/// than overshooting it.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}
