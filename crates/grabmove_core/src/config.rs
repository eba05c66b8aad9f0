//! Locomotion configuration.
//!
//! Set once at setup, read every frame.  [`GrabConfig::validate`] is the
//! only place a misconfiguration surfaces; the controller refuses to start
//! with an invalid config.
//!
//! # Example
//! ```rust,ignore
//! use grabmove_core::GrabConfig;
//!
//! let config = GrabConfig::hands()
//!     .with_two_hand_scale(true)
//!     .with_scale_range(0.25, 4.0);
//! config.validate()?;
//! ```

use crate::error::ConfigError;

/// How the raw per-hand engagement signal is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputMode {
    /// Grip trigger / button: a single cutoff, no hysteresis.
    #[default]
    Buttons,
    /// Hand tracking pinch strength: two-threshold hysteresis.
    ContinuousPinch,
}

/// Inclusive uniform-scale limits for two-hand scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScaleRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: 0.5, max: 2.0 }
    }
}

impl ScaleRange {
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

/// Tuning for the grab locomotion controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrabConfig {
    pub input_mode: InputMode,

    /// Signal level above which a hand starts grabbing.
    ///
    /// Default: `0.7` (grip trigger)
    pub activation_threshold: f32,

    /// Signal level at or below which a grabbing hand lets go.  Only used in
    /// [`InputMode::ContinuousPinch`].
    ///
    /// Default: `0.4`
    pub release_threshold: f32,

    /// Keep rig translation horizontal.
    pub lock_vertical_movement: bool,

    /// Turn the rig about +Y when both hands rotate around each other.
    pub enable_two_hand_yaw: bool,

    /// Exponential smoothing rate for yaw, per second.  Higher is snappier.
    ///
    /// Default: `12.0`
    pub turn_smoothing_rate: f32,

    /// Hard bound on translation per frame, in metres.  Not scaled by `dt`.
    ///
    /// Default: `0.5`
    pub max_step_per_frame: f32,

    /// Scale the rig by the change in distance between the hands.
    pub enable_two_hand_scale: bool,

    pub scale_range: ScaleRange,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Buttons,
            activation_threshold: 0.7,
            release_threshold: 0.4,
            lock_vertical_movement: true,
            enable_two_hand_yaw: true,
            turn_smoothing_rate: 12.0,
            max_step_per_frame: 0.5,
            enable_two_hand_scale: false,
            scale_range: ScaleRange::default(),
        }
    }
}

impl GrabConfig {
    /// Controller preset: grip-trigger cutoff at `0.7`.
    pub fn controllers() -> Self {
        Self::default()
    }

    /// Hand-tracking preset: pinch engages above `0.6`, releases at `0.4`.
    pub fn hands() -> Self {
        Self {
            input_mode: InputMode::ContinuousPinch,
            activation_threshold: 0.6,
            release_threshold: 0.4,
            ..Default::default()
        }
    }

    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    pub fn with_thresholds(mut self, activation: f32, release: f32) -> Self {
        self.activation_threshold = activation;
        self.release_threshold = release;
        self
    }

    pub fn with_vertical_lock(mut self, lock: bool) -> Self {
        self.lock_vertical_movement = lock;
        self
    }

    pub fn with_two_hand_yaw(mut self, enabled: bool) -> Self {
        self.enable_two_hand_yaw = enabled;
        self
    }

    pub fn with_turn_smoothing(mut self, rate: f32) -> Self {
        self.turn_smoothing_rate = rate;
        self
    }

    pub fn with_max_step(mut self, max_step: f32) -> Self {
        self.max_step_per_frame = max_step;
        self
    }

    pub fn with_two_hand_scale(mut self, enabled: bool) -> Self {
        self.enable_two_hand_scale = enabled;
        self
    }

    pub fn with_scale_range(mut self, min: f32, max: f32) -> Self {
        self.scale_range = ScaleRange { min, max };
        self
    }

    /// Check every invariant the per-frame update relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("activation", self.activation_threshold)?;
        // engagement is a strict `>` against a signal capped at 1.0
        if self.activation_threshold >= 1.0 {
            return Err(ConfigError::ActivationUnreachable {
                value: self.activation_threshold,
            });
        }
        if self.input_mode == InputMode::ContinuousPinch {
            check_unit("release", self.release_threshold)?;
            if self.activation_threshold <= self.release_threshold {
                return Err(ConfigError::ThresholdOrder {
                    activation: self.activation_threshold,
                    release: self.release_threshold,
                });
            }
        }
        check_positive("turn_smoothing_rate", self.turn_smoothing_rate)?;
        check_positive("max_step_per_frame", self.max_step_per_frame)?;

        let ScaleRange { min, max } = self.scale_range;
        if !(min.is_finite() && min > 0.0) {
            return Err(ConfigError::ScaleMinNotPositive { min });
        }
        if !max.is_finite() || min > max {
            return Err(ConfigError::ScaleRangeInverted { min, max });
        }
        Ok(())
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange { name, value })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
