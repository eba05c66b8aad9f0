//! Rig pose: position, rotation (quaternion), uniform scale.
//!
//! `RigPose` is `Copy` and `Default`, making it cheap to snapshot as a
//! baseline.  Call `.matrix()` to get the combined model matrix for whatever
//! renders the rig.

use glam::{Mat4, Quat, Vec3};

/// World-space pose of the player rig.
///
/// # Example
/// ```rust,ignore
/// use grabmove_core::RigPose;
/// use glam::Vec3;
///
/// let mut pose = RigPose::from_position(Vec3::new(1.0, 0.0, 0.0));
/// pose.rotate_y(std::f32::consts::FRAC_PI_2);
/// let m = pose.matrix();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigPose {
    /// World-space position.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
    /// Uniform scale factor (never negative).
    pub scale: f32,
}

impl Default for RigPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigPose {
    /// Origin, identity rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: 1.0,
    };

    /// Construct with a world-space position, identity rotation and scale.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Build the TRS model matrix (`T * R * S`).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }

    /// Apply a translation offset in world space.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate around the world Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }

    /// Set the uniform scale, clamping negatives to zero.
    pub fn set_scale(&mut self, s: f32) {
        self.scale = s.max(0.0);
    }

    /// Heading about +Y in radians, measured from `-Z`.
    pub fn yaw(&self) -> f32 {
        let f = self.forward();
        (-f.x).atan2(-f.z)
    }

    /// Forward direction in world space (`−Z` rotated by the quaternion).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Right direction in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Up direction in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}
