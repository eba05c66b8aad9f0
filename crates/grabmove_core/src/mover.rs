//! Collision-aware movement capability.
//!
//! A rig may own something that resolves obstructions (a character
//! controller, a kinematic capsule sweep, a play-area fence).  It is handed
//! the requested displacement and answers with the displacement it actually
//! achieved.  The rig applies that answer itself, so the pose keeps a single
//! writer.

use glam::Vec3;

use crate::transform::RigPose;

/// Resolves a requested rig displacement against the world.
pub trait CollisionMover {
    /// Attempt to move from `from` by `requested`; return the displacement
    /// actually achieved.
    fn move_by(&mut self, from: &RigPose, requested: Vec3) -> Vec3;

    /// A disabled mover is bypassed and the rig moves freely.
    fn is_enabled(&self) -> bool {
        true
    }
}

impl<F> CollisionMover for F
where
    F: FnMut(&RigPose, Vec3) -> Vec3,
{
    fn move_by(&mut self, from: &RigPose, requested: Vec3) -> Vec3 {
        self(from, requested)
    }
}

/// Confines the rig position to an axis-aligned box (a room, with `min.y`
/// acting as the floor).
///
/// Requests are only ever shortened, per axis, at the wall they would cross.
/// A rig that is already outside the box may move back toward it but never
/// further away, and is never pulled in by more than it asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsMover {
    pub min: Vec3,
    pub max: Vec3,
    pub enabled: bool,
}

impl BoundsMover {
    /// Box spanning `a` and `b` in any corner order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            enabled: true,
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

impl CollisionMover for BoundsMover {
    fn move_by(&mut self, from: &RigPose, requested: Vec3) -> Vec3 {
        let at = from.position;
        // widen the box to include the current position so nothing is extended
        let target = (at + requested).clamp(self.min.min(at), self.max.max(at));
        let achieved = target - at;
        if achieved != requested {
            log::trace!("bounds blocked move: requested {requested:?}, achieved {achieved:?}");
        }
        achieved
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
