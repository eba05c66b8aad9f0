//! Engagement tracking: raw per-hand signal → debounced grab state, plus
//! the baselines every grab gesture is measured against.
//!
//! The tracker runs first in each frame.  It decides the new grab booleans,
//! and only then snapshots baselines, so the motion integrator never sees a
//! baseline captured a frame late or from a half-applied transition.

use glam::{Quat, Vec3};
use log::debug;

use crate::config::{GrabConfig, InputMode};
use crate::input::{FrameInput, Hand};
use crate::transform::RigPose;

/// Grab state for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngagementState {
    pub is_grabbing: bool,
    /// Anchor world position at the instant the grab began.  `Some` exactly
    /// while `is_grabbing` is true.
    pub grab_start_world_position: Option<Vec3>,
}

impl EngagementState {
    fn begin(&mut self, at: Vec3) {
        self.is_grabbing = true;
        self.grab_start_world_position = Some(at);
    }

    fn release(&mut self) {
        *self = Self::default();
    }
}

/// Rig pose at the start of the current grab gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigBaseline {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl From<&RigPose> for RigBaseline {
    fn from(pose: &RigPose) -> Self {
        Self {
            position: pose.position,
            rotation: pose.rotation,
            scale: pose.scale,
        }
    }
}

/// Hand separation captured when both hands became grabbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoHandBaseline {
    /// Left anchor → right anchor.
    pub vector: Vec3,
    pub distance: f32,
}

impl TwoHandBaseline {
    pub fn between(left: Vec3, right: Vec3) -> Self {
        let vector = right - left;
        Self {
            vector,
            distance: vector.length(),
        }
    }
}

/// Grab-state transitions produced by one tracker update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabEvent {
    Began(Hand),
    Ended(Hand),
    TwoHandBegan,
    TwoHandEnded,
}

/// Result of [`EngagementTracker::update`] for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngagementUpdate {
    pub left: EngagementState,
    pub right: EngagementState,
    pub rig_baseline: Option<RigBaseline>,
    pub two_hand: Option<TwoHandBaseline>,
    /// Transitions in the order they happened this frame.
    pub events: Vec<GrabEvent>,
}

/// Owns both hands' engagement state and the gesture baselines.
#[derive(Debug, Clone, Default)]
pub struct EngagementTracker {
    left: EngagementState,
    right: EngagementState,
    rig_baseline: Option<RigBaseline>,
    two_hand: Option<TwoHandBaseline>,
}

impl EngagementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, hand: Hand) -> &EngagementState {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    fn state_mut(&mut self, hand: Hand) -> &mut EngagementState {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }

    pub fn rig_baseline(&self) -> Option<&RigBaseline> {
        self.rig_baseline.as_ref()
    }

    pub fn two_hand_baseline(&self) -> Option<&TwoHandBaseline> {
        self.two_hand.as_ref()
    }

    pub fn any_grabbing(&self) -> bool {
        self.left.is_grabbing || self.right.is_grabbing
    }

    pub fn both_grabbing(&self) -> bool {
        self.left.is_grabbing && self.right.is_grabbing
    }

    /// Release both hands and forget every baseline.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply the mode-dependent threshold to a raw signal.
    fn engaged(config: &GrabConfig, was_grabbing: bool, raw: f32) -> bool {
        match config.input_mode {
            InputMode::Buttons => raw > config.activation_threshold,
            InputMode::ContinuousPinch if was_grabbing => raw > config.release_threshold,
            InputMode::ContinuousPinch => raw > config.activation_threshold,
        }
    }

    /// Advance one frame.
    ///
    /// `pose` is the rig pose *before* this frame's motion; it is what gets
    /// snapshotted when a gesture starts.
    pub fn update(
        &mut self,
        config: &GrabConfig,
        input: &FrameInput,
        pose: &RigPose,
    ) -> EngagementUpdate {
        let mut events = Vec::new();

        for hand in [Hand::Left, Hand::Right] {
            let sample = input.hand(hand);
            let state = self.state(hand);
            let engaged = sample.anchor.is_some()
                && Self::engaged(config, state.is_grabbing, sample.engagement);

            match (state.is_grabbing, engaged, sample.position()) {
                (false, true, Some(at)) => {
                    self.state_mut(hand).begin(at);
                    self.rig_baseline = Some(RigBaseline::from(pose));
                    debug!("{hand:?} grab began at {at:?}");
                    events.push(GrabEvent::Began(hand));
                }
                (true, false, _) => {
                    self.state_mut(hand).release();
                    debug!("{hand:?} grab ended");
                    events.push(GrabEvent::Ended(hand));
                }
                _ => {}
            }
        }

        if self.both_grabbing() {
            if self.two_hand.is_none() {
                if let (Some(l), Some(r)) = (input.left.position(), input.right.position()) {
                    self.rig_baseline = Some(RigBaseline::from(pose));
                    let baseline = TwoHandBaseline::between(l, r);
                    debug!("two-hand grab began, separation {:.3}", baseline.distance);
                    self.two_hand = Some(baseline);
                    events.push(GrabEvent::TwoHandBegan);
                }
            }
        } else if self.two_hand.take().is_some() {
            debug!("two-hand grab ended");
            events.push(GrabEvent::TwoHandEnded);
        }

        EngagementUpdate {
            left: self.left,
            right: self.right,
            rig_baseline: self.rig_baseline,
            two_hand: self.two_hand,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{HandAnchor, HandInput};

    fn frame(left: HandInput, right: HandInput) -> FrameInput {
        FrameInput::new(left, right, 1.0 / 72.0)
    }

    fn pinch(x: f32, s: f32) -> HandInput {
        HandInput::strength(HandAnchor::at(Vec3::new(x, 1.0, 0.0)), s)
    }

    fn button(p: Vec3, down: bool) -> HandInput {
        HandInput::pressed(HandAnchor::at(p), down)
    }

    #[test]
    fn button_mode_uses_single_cutoff() {
        let cfg = GrabConfig::controllers();
        let mut t = EngagementTracker::new();
        let pose = RigPose::default();
        let a = HandAnchor::at(Vec3::ZERO);

        t.update(&cfg, &frame(HandInput::strength(a, 0.7), HandInput::missing()), &pose);
        assert!(!t.state(Hand::Left).is_grabbing, "cutoff is strict");

        t.update(&cfg, &frame(HandInput::strength(a, 0.71), HandInput::missing()), &pose);
        assert!(t.state(Hand::Left).is_grabbing);

        t.update(&cfg, &frame(HandInput::strength(a, 0.69), HandInput::missing()), &pose);
        assert!(!t.state(Hand::Left).is_grabbing);
    }

    #[test]
    fn pinch_hysteresis_holds_until_release_threshold() {
        let cfg = GrabConfig::hands();
        let mut t = EngagementTracker::new();
        let pose = RigPose::default();

        // below activation: never starts
        t.update(&cfg, &frame(pinch(0.0, 0.55), HandInput::missing()), &pose);
        assert!(!t.state(Hand::Left).is_grabbing);

        t.update(&cfg, &frame(pinch(0.0, 0.65), HandInput::missing()), &pose);
        assert!(t.state(Hand::Left).is_grabbing);

        // noisy signal between the thresholds keeps the grab
        for s in [0.5, 0.41, 0.59, 0.45] {
            t.update(&cfg, &frame(pinch(0.0, s), HandInput::missing()), &pose);
            assert!(t.state(Hand::Left).is_grabbing, "released at {s}");
        }

        t.update(&cfg, &frame(pinch(0.0, 0.4), HandInput::missing()), &pose);
        assert!(!t.state(Hand::Left).is_grabbing);

        // re-engaging requires the activation threshold again
        t.update(&cfg, &frame(pinch(0.0, 0.55), HandInput::missing()), &pose);
        assert!(!t.state(Hand::Left).is_grabbing);
    }

    #[test]
    fn grab_start_is_anchor_position_of_that_frame() {
        let cfg = GrabConfig::controllers();
        let mut t = EngagementTracker::new();
        let p = Vec3::new(0.123_456_7, 1.337, -0.5);
        let input = frame(HandInput::missing(), button(p, true));
        let out = t.update(&cfg, &input, &RigPose::default());
        assert_eq!(out.right.grab_start_world_position, Some(p));
        assert_eq!(out.events, vec![GrabEvent::Began(Hand::Right)]);
    }

    #[test]
    fn release_clears_record() {
        let cfg = GrabConfig::controllers();
        let mut t = EngagementTracker::new();
        let pose = RigPose::default();
        t.update(&cfg, &frame(button(Vec3::ZERO, true), HandInput::missing()), &pose);
        let out = t.update(&cfg, &frame(button(Vec3::ZERO, false), HandInput::missing()), &pose);
        assert_eq!(out.left, EngagementState::default());
        assert_eq!(out.events, vec![GrabEvent::Ended(Hand::Left)]);
    }

    #[test]
    fn missing_anchor_forces_release() {
        let cfg = GrabConfig::controllers();
        let mut t = EngagementTracker::new();
        let pose = RigPose::default();
        t.update(&cfg, &frame(button(Vec3::ZERO, true), HandInput::missing()), &pose);
        let lost = HandInput { anchor: None, engagement: 1.0 };
        t.update(&cfg, &frame(lost, HandInput::missing()), &pose);
        assert!(!t.any_grabbing());
    }

    #[test]
    fn rig_baseline_snapshots_pose_at_grab_start() {
        let cfg = GrabConfig::controllers();
        let mut t = EngagementTracker::new();
        let mut pose = RigPose::from_position(Vec3::new(3.0, 0.0, 1.0));
        pose.set_scale(1.5);
        t.update(&cfg, &frame(button(Vec3::ZERO, true), HandInput::missing()), &pose);
        let b = *t.rig_baseline().unwrap();
        assert_eq!(b.position, pose.position);
        assert_eq!(b.scale, 1.5);

        // later frames while still grabbing do not re-snapshot
        let moved = RigPose::from_position(Vec3::new(9.0, 0.0, 9.0));
        t.update(&cfg, &frame(button(Vec3::ZERO, true), HandInput::missing()), &moved);
        assert_eq!(t.rig_baseline().unwrap().position, pose.position);
    }

    #[test]
    fn second_hand_resnapshots_rig_and_sets_two_hand_baseline() {
        let cfg = GrabConfig::controllers();
        let mut t = EngagementTracker::new();
        let l = Vec3::new(-0.5, 1.0, 0.0);
        let r = Vec3::new(0.5, 1.0, 0.0);

        t.update(&cfg, &frame(button(l, true), button(r, false)), &RigPose::default());
        assert!(t.two_hand_baseline().is_none());

        let later = RigPose::from_position(Vec3::new(0.0, 0.0, -2.0));
        let out = t.update(&cfg, &frame(button(l, true), button(r, true)), &later);
        assert_eq!(out.events, vec![GrabEvent::Began(Hand::Right), GrabEvent::TwoHandBegan]);
        let two = out.two_hand.unwrap();
        assert_eq!(two.vector, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(two.distance, 1.0);
        assert_eq!(out.rig_baseline.unwrap().position, later.position);
    }

    #[test]
    fn two_hand_baseline_resets_and_recomputes() {
        let cfg = GrabConfig::controllers();
        let mut t = EngagementTracker::new();
        let pose = RigPose::default();

        t.update(&cfg, &frame(button(Vec3::ZERO, true), button(Vec3::X, true)), &pose);
        assert_eq!(t.two_hand_baseline().unwrap().vector, Vec3::X);

        // anchors drift while held; the baseline must not follow
        let drifted =
            |right_down| frame(button(Vec3::ZERO, true), button(Vec3::Z * 2.0, right_down));
        t.update(&cfg, &drifted(true), &pose);
        assert_eq!(t.two_hand_baseline().unwrap().vector, Vec3::X);

        let out = t.update(&cfg, &drifted(false), &pose);
        assert!(out.two_hand.is_none());
        assert!(out.events.contains(&GrabEvent::TwoHandEnded));

        let out = t.update(&cfg, &drifted(true), &pose);
        let two = out.two_hand.unwrap();
        assert_eq!(two.vector, Vec3::Z * 2.0);
        assert_eq!(two.distance, 2.0);
    }

    #[test]
    fn reset_forgets_everything() {
        let cfg = GrabConfig::controllers();
        let mut t = EngagementTracker::new();
        let both = frame(button(Vec3::ZERO, true), button(Vec3::X, true));
        t.update(&cfg, &both, &RigPose::default());
        t.reset();
        assert!(!t.any_grabbing());
        assert!(t.rig_baseline().is_none());
        assert!(t.two_hand_baseline().is_none());
    }
}
