use thiserror::Error;

/// Rejected locomotion configuration.
///
/// Raised only at setup time (construction or `set_config`); the per-frame
/// update never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} threshold {value} is outside [0, 1]")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    #[error("activation threshold {value} is unreachable; a full signal of 1.0 never exceeds it")]
    ActivationUnreachable { value: f32 },

    #[error(
        "activation threshold {activation} must be greater than release threshold {release} \
         in continuous-pinch mode"
    )]
    ThresholdOrder { activation: f32, release: f32 },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("scale range minimum {min} must be positive and finite")]
    ScaleMinNotPositive { min: f32 },

    #[error("scale range is inverted: min {min} > max {max}")]
    ScaleRangeInverted { min: f32, max: f32 },
}
