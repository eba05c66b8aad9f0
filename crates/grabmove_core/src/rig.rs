//! The player rig: its pose plus an optional collision-aware mover.

use glam::Vec3;

use crate::mover::CollisionMover;
use crate::transform::RigPose;

/// Mutable rig state written by the locomotion controller.
///
/// Other systems (renderer, UI) should read [`Rig::pose`] only between
/// frames, never while an update is running.
#[derive(Default)]
pub struct Rig {
    pub pose: RigPose,
    mover: Option<Box<dyn CollisionMover>>,
}

impl std::fmt::Debug for Rig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rig")
            .field("pose", &self.pose)
            .field("has_mover", &self.mover.is_some())
            .finish()
    }
}

impl Rig {
    pub fn new(pose: RigPose) -> Self {
        Self { pose, mover: None }
    }

    /// Builder-style variant of [`set_mover`](Self::set_mover).
    pub fn with_mover(mut self, mover: impl CollisionMover + 'static) -> Self {
        self.set_mover(mover);
        self
    }

    pub fn set_mover(&mut self, mover: impl CollisionMover + 'static) {
        self.mover = Some(Box::new(mover));
    }

    pub fn clear_mover(&mut self) {
        self.mover = None;
    }

    pub fn has_active_mover(&self) -> bool {
        self.mover.as_ref().is_some_and(|m| m.is_enabled())
    }

    pub fn pose(&self) -> &RigPose {
        &self.pose
    }

    /// Move the rig by `delta`, through the mover when one is present and
    /// enabled.  Returns the displacement that was applied.
    pub fn apply_displacement(&mut self, delta: Vec3) -> Vec3 {
        let achieved = match self.mover.as_mut() {
            Some(mover) if mover.is_enabled() => mover.move_by(&self.pose, delta),
            _ => delta,
        };
        self.pose.translate(achieved);
        achieved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::BoundsMover;

    #[test]
    fn direct_move_without_mover() {
        let mut rig = Rig::default();
        let got = rig.apply_displacement(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(got, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rig.pose.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn mover_result_is_applied() {
        let mut rig = Rig::default().with_mover(|_: &RigPose, d: Vec3| d * 0.25);
        rig.apply_displacement(Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(rig.pose.position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn disabled_mover_is_bypassed() {
        let mut bounds = BoundsMover::new(Vec3::splat(-0.1), Vec3::splat(0.1));
        bounds.enabled = false;
        let mut rig = Rig::default().with_mover(bounds);
        assert!(!rig.has_active_mover());
        rig.apply_displacement(Vec3::X);
        assert_eq!(rig.pose.position, Vec3::X);
    }

    #[test]
    fn cleared_mover_no_longer_blocks() {
        let mut rig = Rig::default().with_mover(BoundsMover::new(Vec3::ZERO, Vec3::ZERO));
        rig.apply_displacement(Vec3::X);
        assert_eq!(rig.pose().position, Vec3::ZERO);

        rig.clear_mover();
        assert!(!rig.has_active_mover());
        rig.apply_displacement(Vec3::X);
        assert_eq!(rig.pose().position, Vec3::X);
    }
}
