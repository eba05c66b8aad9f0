//! The per-frame entry point tying engagement tracking to rig motion.

use log::{debug, warn};

use super::engagement::{EngagementTracker, GrabEvent};
use super::motion::{MotionIntegrator, MotionReport};
use crate::config::GrabConfig;
use crate::error::ConfigError;
use crate::input::FrameInput;
use crate::rig::Rig;

/// Two-handed grab locomotion.
///
/// Owns the validated configuration and the gesture state.  Call
/// [`update`](Self::update) once per frame with that frame's input; the
/// engagement tracker always runs to completion before the motion integrator
/// reads its state.
///
/// # Example
/// ```rust,ignore
/// use grabmove_core::{FrameInput, GrabConfig, GrabLocomotion, Rig};
///
/// let mut locomotion = GrabLocomotion::new(GrabConfig::hands())?;
/// let mut rig = Rig::default();
/// loop {
///     let input: FrameInput = poll_hands();
///     locomotion.update(&input, &mut rig);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GrabLocomotion {
    config: GrabConfig,
    tracker: EngagementTracker,
    integrator: MotionIntegrator,
    active: bool,
    events: Vec<GrabEvent>,
}

impl GrabLocomotion {
    /// Validates `config`; the controller starts active.
    pub fn new(config: GrabConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            tracker: EngagementTracker::new(),
            integrator: MotionIntegrator::new(),
            active: true,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GrabConfig {
        &self.config
    }

    /// Replace the configuration.  Any grab in progress is dropped so the
    /// next gesture starts from fresh baselines under the new settings.
    pub fn set_config(&mut self, config: GrabConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.tracker.reset();
        Ok(())
    }

    pub fn tracker(&self) -> &EngagementTracker {
        &self.tracker
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn the feature on or off.  Deactivating releases both hands, so
    /// re-activation never resumes a stale gesture.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        debug!("grab locomotion {}", if active { "activated" } else { "deactivated" });
        self.active = active;
        if !active {
            self.tracker.reset();
            self.events.clear();
        }
    }

    /// Active and at least one hand is grabbing.
    pub fn is_driving(&self) -> bool {
        self.active && self.tracker.any_grabbing()
    }

    /// Grab transitions from the most recent [`update`](Self::update).
    pub fn last_events(&self) -> &[GrabEvent] {
        &self.events
    }

    /// Run one frame: engagement first, then motion.
    pub fn update(&mut self, input: &FrameInput, rig: &mut Rig) -> MotionReport {
        self.events.clear();
        if !self.active {
            return MotionReport::idle();
        }
        if input.sanitized_dt() != input.dt {
            warn!("ignoring invalid frame delta {}; smoothing paused this frame", input.dt);
        }

        let engagement = self.tracker.update(&self.config, input, &rig.pose);
        self.events = engagement.events;
        self.integrator.update(&self.config, &self.tracker, input, rig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Hand, HandAnchor, HandInput};
    use crate::locomotion::DragMode;
    use glam::Vec3;

    fn held(p: Vec3) -> HandInput {
        HandInput::pressed(HandAnchor::at(p), true)
    }

    fn left(p: Vec3) -> FrameInput {
        FrameInput::new(held(p), HandInput::missing(), 0.01)
    }

    #[test]
    fn rejects_invalid_config() {
        let err = GrabLocomotion::new(GrabConfig::hands().with_thresholds(0.2, 0.5)).unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOrder { .. }));

        // a button that must exceed 1.0 could never engage
        let err = GrabLocomotion::new(GrabConfig::controllers().with_thresholds(1.0, 0.4));
        assert!(matches!(err, Err(ConfigError::ActivationUnreachable { .. })));
    }

    #[test]
    fn update_reports_events_and_drives() {
        let mut loco = GrabLocomotion::new(GrabConfig::default()).unwrap();
        let mut rig = Rig::default();
        assert!(!loco.is_driving());

        loco.update(&left(Vec3::ZERO), &mut rig);
        assert_eq!(loco.last_events(), &[GrabEvent::Began(Hand::Left)]);
        assert!(loco.is_driving());

        let r = loco.update(&left(Vec3::new(1.0, 0.0, 0.0)), &mut rig);
        assert!(loco.last_events().is_empty());
        assert_eq!(r.mode, DragMode::OneHand(Hand::Left));
        assert_eq!(rig.pose.position, Vec3::new(-0.5, 0.0, 0.0));
    }

    #[test]
    fn inactive_controller_is_inert_and_forgets_grab() {
        let mut loco = GrabLocomotion::new(GrabConfig::default()).unwrap();
        let mut rig = Rig::default();
        loco.update(&left(Vec3::ZERO), &mut rig);
        loco.set_active(false);
        assert!(!loco.is_driving());
        assert!(!loco.tracker().any_grabbing());

        let r = loco.update(&left(Vec3::X), &mut rig);
        assert_eq!(r, MotionReport::idle());
        assert_eq!(rig.pose.position, Vec3::ZERO);

        // re-activation starts a new gesture from the current anchor
        loco.set_active(true);
        loco.update(&left(Vec3::X), &mut rig);
        assert_eq!(loco.tracker().state(Hand::Left).grab_start_world_position, Some(Vec3::X));
        assert_eq!(rig.pose.position, Vec3::ZERO);
    }

    #[test]
    fn set_config_validates_and_resets() {
        let mut loco = GrabLocomotion::new(GrabConfig::default()).unwrap();
        let mut rig = Rig::default();
        loco.update(&left(Vec3::ZERO), &mut rig);

        assert!(loco.set_config(GrabConfig::default().with_max_step(-1.0)).is_err());
        assert!(loco.tracker().any_grabbing(), "rejected config must not disturb state");

        loco.set_config(GrabConfig::hands()).unwrap();
        assert!(!loco.tracker().any_grabbing());
        assert_eq!(loco.config().input_mode, crate::config::InputMode::ContinuousPinch);
    }

    #[test]
    fn nan_dt_does_not_poison_rotation() {
        let mut loco = GrabLocomotion::new(GrabConfig::default()).unwrap();
        let mut rig = Rig::default();
        loco.update(&FrameInput::new(held(Vec3::ZERO), held(Vec3::X), 0.01), &mut rig);
        loco.update(&FrameInput::new(held(Vec3::ZERO), held(Vec3::Z), f32::NAN), &mut rig);
        assert!(rig.pose.rotation.is_finite());
        assert!(rig.pose.position.is_finite());
    }
}
