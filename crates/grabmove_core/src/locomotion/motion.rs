//! Motion integration: grab state + anchor positions → rig displacement,
//! yaw and scale.
//!
//! Pulling a hand toward you drags the world toward you, so the rig moves by
//! the *negative* of the hand displacement.  Every translation request is
//! clamped to `max_step_per_frame` before it reaches the rig; the bound is
//! deliberately not scaled by `dt` so a hitching frame can never request a
//! larger jump.

use glam::{Quat, Vec3};
use log::trace;

use super::engagement::EngagementTracker;
use crate::config::GrabConfig;
use crate::input::{FrameInput, Hand};
use crate::math::{clamp_length, flatten, signed_yaw, smoothing_factor, EPSILON};
use crate::rig::Rig;

/// Which branch of the integrator ran this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Idle,
    OneHand(Hand),
    TwoHand,
}

/// What the integrator did in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionReport {
    pub mode: DragMode,
    /// Clamped, negated displacement handed to the rig.
    pub requested: Vec3,
    /// Displacement the rig actually made (differs when a mover blocks).
    pub applied: Vec3,
    /// Signed yaw target relative to the gesture baseline, radians.
    pub yaw: Option<f32>,
    /// Uniform scale written to the rig.
    pub scale: Option<f32>,
}

impl MotionReport {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Stateless integrator; all gesture state lives in the tracker and rig.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionIntegrator;

impl MotionIntegrator {
    pub fn new() -> Self {
        Self
    }

    /// Compute and commit this frame's rig motion.  Must run after the
    /// tracker has been updated for the same `input`.
    pub fn update(
        &self,
        config: &GrabConfig,
        tracker: &EngagementTracker,
        input: &FrameInput,
        rig: &mut Rig,
    ) -> MotionReport {
        let left = tracker.state(Hand::Left).is_grabbing;
        let right = tracker.state(Hand::Right).is_grabbing;

        let report = match (left, right) {
            (false, false) => MotionReport::idle(),
            (true, false) => self.one_hand(config, tracker, input, rig, Hand::Left),
            (false, true) => self.one_hand(config, tracker, input, rig, Hand::Right),
            (true, true) => self.two_hand(config, tracker, input, rig),
        };
        if report.mode != DragMode::Idle {
            trace!(
                "{:?}: requested {:?} applied {:?} yaw {:?} scale {:?}",
                report.mode,
                report.requested,
                report.applied,
                report.yaw,
                report.scale
            );
        }
        report
    }

    fn one_hand(
        &self,
        config: &GrabConfig,
        tracker: &EngagementTracker,
        input: &FrameInput,
        rig: &mut Rig,
        hand: Hand,
    ) -> MotionReport {
        let (Some(now), Some(start)) = (
            input.hand(hand).position(),
            tracker.state(hand).grab_start_world_position,
        ) else {
            return MotionReport::idle();
        };

        let (requested, applied) = translate(config, now - start, rig);
        MotionReport {
            mode: DragMode::OneHand(hand),
            requested,
            applied,
            ..Default::default()
        }
    }

    fn two_hand(
        &self,
        config: &GrabConfig,
        tracker: &EngagementTracker,
        input: &FrameInput,
        rig: &mut Rig,
    ) -> MotionReport {
        let (Some(l_now), Some(r_now), Some(l_start), Some(r_start)) = (
            input.left.position(),
            input.right.position(),
            tracker.state(Hand::Left).grab_start_world_position,
            tracker.state(Hand::Right).grab_start_world_position,
        ) else {
            return MotionReport::idle();
        };

        let avg_start = 0.5 * (l_start + r_start);
        let avg_now = 0.5 * (l_now + r_now);
        let (requested, applied) = translate(config, avg_now - avg_start, rig);

        let mut report = MotionReport {
            mode: DragMode::TwoHand,
            requested,
            applied,
            ..Default::default()
        };

        let (Some(two), Some(base)) = (tracker.two_hand_baseline(), tracker.rig_baseline()) else {
            return report;
        };

        if config.enable_two_hand_yaw {
            // degenerate (coincident or vertically stacked hands): skip yaw only
            if let Some(yaw) = signed_yaw(two.vector, r_now - l_now) {
                let target = Quat::from_rotation_y(yaw) * base.rotation;
                let t = smoothing_factor(config.turn_smoothing_rate, input.sanitized_dt());
                rig.pose.rotation = rig.pose.rotation.slerp(target, t).normalize();
                report.yaw = Some(yaw);
            }
        }

        if config.enable_two_hand_scale {
            let ratio = if two.distance <= EPSILON {
                1.0
            } else {
                l_now.distance(r_now) / two.distance
            };
            let scale = base.scale * config.scale_range.clamp(ratio);
            rig.pose.set_scale(scale);
            report.scale = Some(scale);
        }

        report
    }
}

/// Flatten (if configured), clamp, negate and apply a hand displacement.
/// Returns `(requested, applied)`.
fn translate(config: &GrabConfig, hand_delta: Vec3, rig: &mut Rig) -> (Vec3, Vec3) {
    let delta = if config.lock_vertical_movement {
        flatten(hand_delta)
    } else {
        hand_delta
    };
    let requested = -clamp_length(delta, config.max_step_per_frame);
    let applied = rig.apply_displacement(requested);
    (requested, applied)
}
