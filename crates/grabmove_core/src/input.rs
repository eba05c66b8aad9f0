use glam::{Quat, Vec3};

/// Which hand a sample or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// The opposite hand.
    pub fn other(self) -> Self {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

/// Tracked pose of one hand (controller or hand-tracking anchor) in world
/// space.  Only the position drives locomotion; the orientation is carried
/// for callers that want facing information.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandAnchor {
    pub position: Vec3,
    pub rotation: Quat,
}

impl HandAnchor {
    /// Anchor at `position` with identity orientation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Everything the core reads about one hand for a single frame.
///
/// The input collaborator owns the real devices; it hands the core a
/// snapshot every frame.  `anchor == None` means the hand is not tracked,
/// in which case it can never be grabbing regardless of `engagement`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandInput {
    pub anchor: Option<HandAnchor>,
    /// Raw engagement signal in `[0, 1]`: trigger axis, pinch strength, or
    /// `0.0` / `1.0` for a digital button.
    pub engagement: f32,
}

impl HandInput {
    /// Digital button sample.
    pub fn pressed(anchor: HandAnchor, pressed: bool) -> Self {
        Self {
            anchor: Some(anchor),
            engagement: if pressed { 1.0 } else { 0.0 },
        }
    }

    /// Continuous sample (trigger axis or pinch strength).
    pub fn strength(anchor: HandAnchor, strength: f32) -> Self {
        let engagement = if strength.is_finite() { strength.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            anchor: Some(anchor),
            engagement,
        }
    }

    /// Untracked hand.
    pub fn missing() -> Self {
        Self::default()
    }

    /// World position of the anchor, if tracked.
    #[inline]
    pub fn position(&self) -> Option<Vec3> {
        self.anchor.map(|a| a.position)
    }
}

/// Per-frame input snapshot fed into the locomotion update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub left: HandInput,
    pub right: HandInput,
    /// Seconds elapsed since the previous frame.
    pub dt: f32,
}

impl FrameInput {
    pub fn new(left: HandInput, right: HandInput, dt: f32) -> Self {
        Self { left, right, dt }
    }

    /// Sample for the given hand.
    pub fn hand(&self, hand: Hand) -> &HandInput {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    /// Delta time with negative or non-finite values mapped to zero.
    pub fn sanitized_dt(&self) -> f32 {
        if self.dt.is_finite() && self.dt > 0.0 {
            self.dt
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_maps_to_unit_signal() {
        let a = HandAnchor::at(Vec3::ZERO);
        assert_eq!(HandInput::pressed(a, true).engagement, 1.0);
        assert_eq!(HandInput::pressed(a, false).engagement, 0.0);
    }

    #[test]
    fn strength_is_clamped() {
        let a = HandAnchor::at(Vec3::ZERO);
        assert_eq!(HandInput::strength(a, 1.7).engagement, 1.0);
        assert_eq!(HandInput::strength(a, -0.2).engagement, 0.0);
        assert_eq!(HandInput::strength(a, f32::NAN).engagement, 0.0);
    }

    #[test]
    fn missing_hand_has_no_position() {
        assert!(HandInput::missing().position().is_none());
    }

    #[test]
    fn dt_sanitizing() {
        let mut f = FrameInput::default();
        f.dt = -0.5;
        assert_eq!(f.sanitized_dt(), 0.0);
        f.dt = f32::INFINITY;
        assert_eq!(f.sanitized_dt(), 0.0);
        f.dt = 0.016;
        assert_eq!(f.sanitized_dt(), 0.016);
    }

    #[test]
    fn other_hand() {
        assert_eq!(Hand::Left.other(), Hand::Right);
        assert_eq!(Hand::Right.other(), Hand::Left);
    }
}
